use messagekit_dialog::DialogError;
use thiserror::Error;

/// Errors reported by a [`Host`](crate::Host).
///
/// None of these escape [`PermissionGate`](crate::PermissionGate); it either
/// degrades them to a boolean or logs and drops them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// The operation has no meaning on this platform.
    #[error("not supported on this platform: {0}")]
    NotSupported(String),

    /// The platform API call failed.
    #[error("platform error: {0}")]
    Platform(String),

    /// A capability identifier that is not part of the messaging set.
    #[error("unknown capability: {0}")]
    UnknownCapability(String),

    /// The rationale alert could not be presented.
    #[error("dialog error: {0}")]
    Dialog(#[from] DialogError),
}
