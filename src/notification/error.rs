//! Notification system error types.

use thiserror::Error;

/// Errors that can occur in the notification system.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Permission has not been granted (denied, or never requested).
    #[error("notification permission not granted")]
    PermissionDenied,

    /// The desktop notification service rejected or dropped the request.
    #[error("failed to send notification: {0}")]
    SendFailed(String),

    /// No notification service is reachable.
    #[error("notification service not available: {0}")]
    NotAvailable(String),
}

impl NotificationError {
    /// Returns true if this error is related to permissions.
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }

    /// Returns a user-facing hint for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "start without --no-notify to enable notifications",
            Self::SendFailed(_) => "check that your notification daemon is running",
            Self::NotAvailable(_) => "install a desktop notification daemon",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NotificationError::PermissionDenied;
        assert_eq!(err.to_string(), "notification permission not granted");

        let err = NotificationError::SendFailed("dbus closed".to_string());
        assert!(err.to_string().contains("dbus closed"));
    }

    #[test]
    fn test_is_permission_error() {
        assert!(NotificationError::PermissionDenied.is_permission_error());
        assert!(!NotificationError::SendFailed("x".into()).is_permission_error());
        assert!(!NotificationError::NotAvailable("x".into()).is_permission_error());
    }

    #[test]
    fn test_suggestion() {
        assert!(NotificationError::PermissionDenied
            .suggestion()
            .contains("--no-notify"));
    }
}
