//! Last-known status tracking for the watched homework.

/// Remembers the last status message sent to the chat.
#[derive(Debug, Default)]
pub struct StatusTracker {
    last_message: Option<String>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self { last_message: None }
    }

    /// Store `message` if it differs from the last one.
    ///
    /// Returns `true` when the message is new and should be delivered.
    pub fn update(&mut self, message: &str) -> bool {
        if self.last_message.as_deref() == Some(message) {
            return false;
        }
        self.last_message = Some(message.to_string());
        true
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }
}
