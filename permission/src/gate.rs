use crate::{
    Grant, Host, PermissionError, PermissionOutcome, PermissionRequest, PermissionSet, RequestCode,
};
use async_channel::{Receiver, Sender};
use messagekit_dialog::Alert;
use std::fmt;

/// The two places where a host failure is turned into a plain answer
/// instead of being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degradation {
    /// The default-handler registry could not be queried; treated as
    /// "already the default". Headless test runtimes have no registry.
    DefaultHandlerQuery,
    /// The "change default messaging app" flow could not be started; dropped.
    /// Form factors without telephony refuse it.
    DefaultHandlerLaunch,
}

impl Degradation {
    fn absorb(self, error: &PermissionError) {
        log::warn!("{self}: {error}");
    }
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultHandlerQuery => f.write_str("default handler query degraded to true"),
            Self::DefaultHandlerLaunch => f.write_str("default handler launch dropped"),
        }
    }
}

/// Decides when the messaging permissions are missing, drives the platform
/// prompt and interprets its answer.
///
/// One gate is created per foreground screen. It keeps no permission state;
/// every query goes to the [`Host`].
#[derive(Debug)]
pub struct PermissionGate<H> {
    host: H,
    rationale: Alert,
    outcome_tx: Sender<PermissionOutcome>,
    outcome_rx: Receiver<PermissionOutcome>,
}

impl<H: Host> PermissionGate<H> {
    /// Create a gate over `host` with the default rationale alert.
    pub fn new(host: H) -> Self {
        let (outcome_tx, outcome_rx) = async_channel::bounded(1);
        Self {
            host,
            rationale: Alert::permissions_needed(),
            outcome_tx,
            outcome_rx,
        }
    }

    /// Replace the alert shown after the user refuses the main permissions.
    #[must_use]
    pub fn with_rationale(mut self, rationale: Alert) -> Self {
        self.rationale = rationale;
        self
    }

    /// The underlying host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Whether any of the gating capabilities is still missing.
    pub fn needs_main_permissions(&self) -> bool {
        PermissionSet::GATING
            .iter()
            .any(|capability| self.host.check_permission(capability) != Grant::Granted)
    }

    /// Ask the platform for the full main permission set.
    ///
    /// The request is fire-and-forget: a failure to issue it is logged. The
    /// returned handle resolves with the next outcome passed to
    /// [`deliver`](Self::deliver) and may be dropped.
    pub fn request_main_permissions(&self) -> PendingRequest {
        let request = PermissionRequest::MAIN;
        log::info!(
            "requesting {} main permissions with {}",
            request.capabilities.len(),
            request.request_code
        );

        if let Err(e) = self
            .host
            .request_permissions(request.capabilities.as_slice(), request.request_code)
        {
            log::error!("main permission request was not issued: {e}");
        }

        PendingRequest {
            outcome: self.outcome_rx.clone(),
        }
    }

    /// Forward a platform permission callback to whoever awaits a
    /// [`PendingRequest`]. An unread outcome is replaced.
    pub fn deliver(&self, outcome: PermissionOutcome) {
        match self.outcome_tx.force_send(outcome) {
            Ok(Some(stale)) => {
                log::debug!("replaced unread outcome for {}", stale.request_code);
            }
            Ok(None) => {}
            Err(e) => log::error!("permission outcome dropped: {e}"),
        }
    }

    /// Interpret a permission callback.
    ///
    /// Returns `true` only for the main request when the first two results
    /// (contacts and SMS) are both granted; later positions are not looked
    /// at. Otherwise, for the main request, the rationale alert is put up and
    /// `false` is returned without waiting for it; acknowledging the alert
    /// makes the host ask for the main permissions again. Other request codes
    /// return `false` untouched.
    ///
    /// Safe to call from the platform's UI thread.
    pub fn handle_permission_result(&self, outcome: &PermissionOutcome) -> bool {
        if outcome.request_code != RequestCode::MAIN_PERMISSIONS {
            log::debug!("ignoring permission result for {}", outcome.request_code);
            return false;
        }

        if matches!(outcome.grants.as_slice(), [Grant::Granted, Grant::Granted, ..]) {
            log::info!("main permissions granted");
            return true;
        }

        log::warn!("main permissions refused: {:?}", outcome.grants);
        if let Err(e) = self
            .host
            .show_rationale(&self.rationale, PermissionRequest::MAIN)
        {
            log::error!("permission rationale failed: {e}");
        }
        false
    }

    /// Whether this app is the default messaging handler.
    ///
    /// A failing registry query counts as `true`
    /// ([`Degradation::DefaultHandlerQuery`]).
    pub fn is_default_messaging_app(&self) -> bool {
        let query = self.host.package_name().and_then(|own| {
            self.host
                .default_sms_package()
                .map(|default| default.as_deref() == Some(own.as_str()))
        });

        query.unwrap_or_else(|e| {
            Degradation::DefaultHandlerQuery.absorb(&e);
            true
        })
    }

    /// Ask the user to make this app the default messaging handler, unless
    /// it already is.
    ///
    /// Never fails; a refused launch is logged
    /// ([`Degradation::DefaultHandlerLaunch`]).
    pub fn request_default_messaging_app(&self) {
        if self.is_default_messaging_app() {
            log::debug!("already the default messaging app");
            return;
        }

        let launch = self
            .host
            .package_name()
            .and_then(|own| self.host.launch_change_default(&own));

        if let Err(e) = launch {
            Degradation::DefaultHandlerLaunch.absorb(&e);
        }
    }
}

/// Handle for an issued permission request.
#[derive(Debug)]
pub struct PendingRequest {
    outcome: Receiver<PermissionOutcome>,
}

impl PendingRequest {
    /// Wait for the next delivered outcome.
    ///
    /// Resolves to `None` if the gate is dropped first.
    pub async fn outcome(self) -> Option<PermissionOutcome> {
        self.outcome.recv().await.ok()
    }
}
