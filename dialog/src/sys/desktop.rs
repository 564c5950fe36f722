use crate::{Alert, DialogError};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// Show an acknowledgement alert without waiting for it.
///
/// The native dialog runs on its own thread. `on_acknowledge` runs on that
/// thread once the button is pressed; closing the alert any other way
/// drops it.
///
/// # Errors
/// Returns an error if the dialog thread cannot be started.
pub fn show_alert(
    alert: Alert,
    on_acknowledge: impl FnOnce() + Send + 'static,
) -> Result<(), DialogError> {
    std::thread::Builder::new()
        .name("messagekit-alert".into())
        .spawn(move || {
            let mut dialog = MessageDialog::new()
                .set_level(MessageLevel::Warning)
                .set_description(&alert.message)
                .set_buttons(MessageButtons::OkCustom(alert.button.clone()));

            if let Some(title) = &alert.title {
                dialog = dialog.set_title(title);
            }

            match dialog.show() {
                MessageDialogResult::Ok | MessageDialogResult::Custom(_) => on_acknowledge(),
                other => log::debug!("alert closed with {other:?}"),
            }
        })
        .map_err(|e| DialogError::Platform(format!("Failed to start alert thread: {e}")))?;

    Ok(())
}
