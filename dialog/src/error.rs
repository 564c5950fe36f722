use thiserror::Error;

/// Errors that can occur when presenting an alert.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// An error occurred in the underlying platform implementation.
    #[error("Platform error: {0}")]
    Platform(String),

    /// Alerts cannot be shown this way on this platform.
    #[error("Not supported: {0}")]
    NotSupported(String),
}
