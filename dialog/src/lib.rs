//! Native acknowledgement alerts for desktop targets.
//!
//! Android alerts belong to an activity and are drawn by the code that owns
//! it; [`Alert::show`] reports [`DialogError::NotSupported`] there.
//!
//! An [`Alert`] is a modal message with exactly one button. [`Alert::show`]
//! presents it and returns at once; the follow-up action runs when the user
//! presses the button, which suits "you need to do X first" prompts.

#![warn(missing_docs)]

mod error;
mod sys;

pub use error::DialogError;

/// Button label used when none is set.
pub const DEFAULT_BUTTON: &str = "OK";

/// A modal alert with a single acknowledgement button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Optional title shown above the message.
    pub title: Option<String>,
    /// Message content of the alert.
    pub message: String,
    /// Label of the acknowledgement button.
    pub button: String,
}

impl Alert {
    /// Create a new untitled alert with an "OK" button.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
            button: DEFAULT_BUTTON.to_string(),
        }
    }

    /// The rationale shown when the messaging permissions were refused.
    #[must_use]
    pub fn permissions_needed() -> Self {
        Self::new("Contacts, SMS and phone permissions are needed for messaging to work.")
    }

    /// Set the alert title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the acknowledgement button label.
    #[must_use]
    pub fn with_button(mut self, button: impl Into<String>) -> Self {
        self.button = button.into();
        self
    }

    /// Present the alert; `on_acknowledge` runs once its button is pressed.
    ///
    /// Returns as soon as the alert is up.
    ///
    /// # Errors
    /// Returns a [`DialogError`] if the alert could not be presented.
    pub fn show(self, on_acknowledge: impl FnOnce() + Send + 'static) -> Result<(), DialogError> {
        sys::show_alert(self, on_acknowledge)
    }
}
