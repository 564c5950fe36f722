use crate::{Capability, Grant, PermissionError, PermissionRequest, RequestCode};
use messagekit_dialog::Alert;

/// The operating system and foreground screen the gate talks to.
///
/// Implementations are thin: each method maps onto one platform call.
/// The gate owns all decisions about what to ask and how to react.
pub trait Host {
    /// Live check of a single capability.
    fn check_permission(&self, capability: Capability) -> Grant;

    /// Hand a permission request to the platform.
    ///
    /// Returns as soon as the request is issued; the answer comes back later
    /// through the platform's own callback.
    ///
    /// # Errors
    /// Returns an error if the request could not be issued.
    fn request_permissions(
        &self,
        capabilities: &[Capability],
        request_code: RequestCode,
    ) -> Result<(), PermissionError>;

    /// The app's own package (bundle) identifier.
    ///
    /// # Errors
    /// Returns an error if the platform cannot report it.
    fn package_name(&self) -> Result<String, PermissionError>;

    /// Package currently configured as the default messaging handler.
    ///
    /// `Ok(None)` means no handler is configured.
    ///
    /// # Errors
    /// Returns an error if the default-handler registry cannot be queried.
    fn default_sms_package(&self) -> Result<Option<String>, PermissionError>;

    /// Start the platform flow that lets the user make `package` the default
    /// messaging handler.
    ///
    /// # Errors
    /// Returns an error if the platform refuses to start the flow.
    fn launch_change_default(&self, package: &str) -> Result<(), PermissionError>;

    /// Put `alert` up and return without waiting for it.
    ///
    /// When the user presses the alert's button the host issues `retry`
    /// the same way [`request_permissions`](Self::request_permissions) would.
    ///
    /// # Errors
    /// Returns an error if the alert could not be presented.
    fn show_rationale(&self, alert: &Alert, retry: PermissionRequest)
    -> Result<(), PermissionError>;
}
