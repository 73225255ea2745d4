//! Notification content construction.

use crate::types::Mode;

/// Title of the session-complete notification.
pub const SESSION_COMPLETE_TITLE: &str = "Timer Complete!";

/// Maximum length of a notification line.
const MAX_LINE_LENGTH: usize = 200;

/// Text of one desktop notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

impl NotificationContent {
    #[must_use]
    pub fn new(title: &str, body: &str) -> Self {
        Self {
            title: sanitize_line(title),
            body: sanitize_line(body),
        }
    }

    /// Content announcing that a `mode` session has finished.
    #[must_use]
    pub fn session_complete(mode: Mode) -> Self {
        Self::new(
            SESSION_COMPLETE_TITLE,
            &format!("Your {} session is complete.", mode.label()),
        )
    }
}

/// Truncates `text` and strips control characters.
pub fn sanitize_line(text: &str) -> String {
    text.chars()
        .take(MAX_LINE_LENGTH)
        .filter(|c| !c.is_control())
        .collect()
}
