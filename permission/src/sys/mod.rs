//! Platform hosts.
//!
//! Android talks to the real permission and telephony APIs through JNI.
//! Every other target gets [`desktop::DesktopHost`], where runtime
//! permissions are implicit and there is no default messaging handler.

/// Android host over an `Activity`.
#[cfg(target_os = "android")]
pub mod android;

/// Host for targets without runtime permissions.
#[cfg(not(target_os = "android"))]
pub mod desktop;
