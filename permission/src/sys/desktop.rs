use crate::{Capability, Grant, Host, PermissionError, PermissionRequest, RequestCode};
use messagekit_dialog::Alert;

/// Host for desktop targets.
///
/// Desktop operating systems have no runtime permission prompts for these
/// capabilities (everything checks as granted) and no registry of a
/// default messaging handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopHost {
    package: String,
}

impl DesktopHost {
    /// Create a host for the app identified by `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
        }
    }
}

impl Host for DesktopHost {
    fn check_permission(&self, _capability: Capability) -> Grant {
        Grant::Granted
    }

    fn request_permissions(
        &self,
        capabilities: &[Capability],
        request_code: RequestCode,
    ) -> Result<(), PermissionError> {
        log::debug!(
            "{} permissions requested with {request_code}; implicit on desktop",
            capabilities.len()
        );
        Ok(())
    }

    fn package_name(&self) -> Result<String, PermissionError> {
        Ok(self.package.clone())
    }

    fn default_sms_package(&self) -> Result<Option<String>, PermissionError> {
        Err(PermissionError::NotSupported(
            "no default messaging handler registry".into(),
        ))
    }

    fn launch_change_default(&self, _package: &str) -> Result<(), PermissionError> {
        Err(PermissionError::NotSupported(
            "cannot change the default messaging handler".into(),
        ))
    }

    fn show_rationale(
        &self,
        alert: &Alert,
        retry: PermissionRequest,
    ) -> Result<(), PermissionError> {
        let host = self.clone();
        alert.clone().show(move || {
            if let Err(e) =
                host.request_permissions(retry.capabilities.as_slice(), retry.request_code)
            {
                log::error!("permission request after rationale failed: {e}");
            }
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PermissionGate, PermissionOutcome};

    #[test]
    fn nothing_is_missing_on_desktop() {
        let gate = PermissionGate::new(DesktopHost::new("com.example.messenger"));
        assert!(!gate.needs_main_permissions());
    }

    #[test]
    fn missing_registry_counts_as_default() {
        let gate = PermissionGate::new(DesktopHost::new("com.example.messenger"));
        assert!(gate.is_default_messaging_app());
        gate.request_default_messaging_app();
    }

    #[tokio::test]
    async fn granted_outcome_passes_without_alert() {
        let gate = PermissionGate::new(DesktopHost::new("com.example.messenger"));
        let pending = gate.request_main_permissions();
        gate.deliver(PermissionOutcome::new(
            RequestCode::MAIN_PERMISSIONS,
            Vec::new(),
            vec![Grant::Granted; 7],
        ));

        let outcome = pending.outcome().await.expect("outcome delivered");
        assert!(gate.handle_permission_result(&outcome));
    }
}
