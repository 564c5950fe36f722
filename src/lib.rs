//! # Messagekit
//!
//! Permission and default-handler plumbing for SMS/MMS messaging apps.
//!
//! - `permission`: the [`PermissionGate`](permission::PermissionGate) that
//!   checks contacts/SMS/phone-state access, drives the system prompt,
//!   interprets its answer and manages default SMS app status.
//! - `dialog`: the desktop acknowledgement alert used for the "permissions
//!   needed" rationale.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! messagekit = { version = "0.1", features = ["permission"] }
//! ```
//!
//! ```rust,no_run
//! # #[cfg(not(target_os = "android"))]
//! # {
//! use messagekit::permission::{PermissionGate, sys::desktop::DesktopHost};
//!
//! let gate = PermissionGate::new(DesktopHost::new("com.example.messenger"));
//! if !gate.is_default_messaging_app() {
//!     gate.request_default_messaging_app();
//! }
//! # }
//! ```

#[cfg(feature = "dialog")]
pub use messagekit_dialog as dialog;

#[cfg(feature = "permission")]
pub use messagekit_permission as permission;
