#[cfg(not(target_os = "android"))]
mod desktop;
#[cfg(not(target_os = "android"))]
pub use desktop::show_alert;

/// Android draws alerts from the owning activity, which the caller holds.
///
/// # Errors
/// Always returns [`DialogError::NotSupported`](crate::DialogError::NotSupported).
#[cfg(target_os = "android")]
pub fn show_alert(
    _alert: crate::Alert,
    _on_acknowledge: impl FnOnce() + Send + 'static,
) -> Result<(), crate::DialogError> {
    Err(crate::DialogError::NotSupported(
        "Android: present the alert from the activity that owns it".into(),
    ))
}
