//! Input state for message composition.
//!
//! Holds the text field contents and turns a send intent into at most one
//! trimmed submission.

/// How the user asked to send.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendIntent {
    /// Pointer activation of the send button.
    Click,
    /// Enter pressed while the input had focus.
    Enter,
}

#[derive(Debug, Default)]
pub struct InputState {
    /// Current message being composed
    pub message_input: String,

    /// Set after a submission so the UI can give focus back to the field
    pub refocus: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim the current input and, if anything is left, clear the field and
    /// return the trimmed text. Whitespace-only input is left untouched.
    pub fn take_submission(&mut self) -> Option<String> {
        let text = self.message_input.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();
        self.message_input.clear();
        self.refocus = true;
        Some(text)
    }
}
