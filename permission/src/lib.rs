//! Runtime permission gate for a messaging application.
//!
//! [`PermissionGate`] answers three questions for the foreground screen:
//! are the core messaging permissions in place, what did the user answer to
//! the last permission prompt, and is this app the system's default SMS
//! handler. Everything platform-specific sits behind the [`Host`] trait;
//! [`sys`] ships an Android host and a desktop host.
//!
//! ```no_run
//! use messagekit_permission::{PermissionGate, sys::desktop::DesktopHost};
//!
//! async fn startup() {
//!     let gate = PermissionGate::new(DesktopHost::new("com.example.messenger"));
//!
//!     if gate.needs_main_permissions() {
//!         let pending = gate.request_main_permissions();
//!         if let Some(outcome) = pending.outcome().await {
//!             let granted = gate.handle_permission_result(&outcome);
//!             println!("granted: {granted}");
//!         }
//!     }
//! }
//! ```

#![warn(missing_docs)]

mod capability;
mod error;
mod gate;
mod host;
mod outcome;
/// Platform-specific hosts.
pub mod sys;

pub use capability::{Capability, PermissionSet};
pub use error::PermissionError;
pub use gate::{Degradation, PendingRequest, PermissionGate};
pub use host::Host;
pub use messagekit_dialog::{Alert, DialogError};
pub use outcome::{Grant, PermissionOutcome, PermissionRequest, RequestCode};
