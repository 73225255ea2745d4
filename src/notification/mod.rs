//! Desktop notification support.
//!
//! - Permission state, requested once at startup
//! - Delivery through the platform notification service (`notify-rust`)
//! - A mock notifier for tests
//!
//! Notifications are only ever shown when permission is `Granted`. A
//! `Denied` answer is final for the lifetime of the process.

mod content;
pub mod error;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tracing::{debug, info, warn};

pub use self::content::{sanitize_line, NotificationContent, SESSION_COMPLETE_TITLE};
pub use self::error::NotificationError;

use crate::presentation::APP_NAME;

/// Notification permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    /// Not requested yet
    #[default]
    Default,
    Granted,
    Denied,
}

impl Permission {
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Trait for notification delivery implementations.
pub trait Notifier: Send + Sync {
    /// Current permission, without prompting.
    fn permission(&self) -> Permission;

    /// Asks for permission if it has not been decided yet.
    ///
    /// Returns the resulting permission. `Denied` is never re-asked.
    fn request_permission(&self) -> Permission;

    /// Shows a notification.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` unless permission is `Granted`, or
    /// `SendFailed` if the service rejects the request.
    fn notify(&self, content: &NotificationContent) -> Result<(), NotificationError>;
}

/// Notifier backed by the platform notification service.
#[derive(Debug)]
pub struct DesktopNotifier {
    permission: Mutex<Permission>,
}

impl DesktopNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            permission: Mutex::new(Permission::Default),
        }
    }

    /// A notifier that never shows anything (`--no-notify`).
    #[must_use]
    pub fn denied() -> Self {
        Self {
            permission: Mutex::new(Permission::Denied),
        }
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    fn probe_service() -> Permission {
        match notify_rust::get_server_information() {
            Ok(info) => {
                debug!("Notification server: {} {}", info.name, info.version);
                Permission::Granted
            }
            Err(e) => {
                warn!("No notification server answered: {}", e);
                Permission::Denied
            }
        }
    }

    #[cfg(not(all(unix, not(target_os = "macos"))))]
    fn probe_service() -> Permission {
        Permission::Granted
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Permission> {
        self.permission
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for DesktopNotifier {
    fn permission(&self) -> Permission {
        *self.lock()
    }

    fn request_permission(&self) -> Permission {
        let current = self.permission();
        if current != Permission::Default {
            return current;
        }
        // Probe without the lock held so `permission()` never waits on D-Bus
        let answer = Self::probe_service();
        let mut permission = self.lock();
        if *permission == Permission::Default {
            *permission = answer;
            info!("Notification permission: {:?}", *permission);
        }
        *permission
    }

    fn notify(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        if !self.permission().is_granted() {
            return Err(NotificationError::PermissionDenied);
        }

        notify_rust::Notification::new()
            .appname(APP_NAME)
            .summary(&content.title)
            .body(&content.body)
            .show()
            .map(|_| ())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))
    }
}

/// Mock notifier for testing.
#[derive(Debug)]
pub struct MockNotifier {
    permission: Mutex<Permission>,
    answer: Mutex<Permission>,
    notifications: Mutex<Vec<NotificationContent>>,
    requests: Mutex<usize>,
    should_fail: AtomicBool,
    delay: Mutex<Duration>,
}

impl MockNotifier {
    /// A notifier whose permission prompt answers `answer`.
    #[must_use]
    pub fn answering(answer: Permission) -> Self {
        Self {
            permission: Mutex::new(Permission::Default),
            answer: Mutex::new(answer),
            notifications: Mutex::new(Vec::new()),
            requests: Mutex::new(0),
            should_fail: AtomicBool::new(false),
            delay: Mutex::new(Duration::ZERO),
        }
    }

    /// A notifier that already holds permission.
    #[must_use]
    pub fn granted() -> Self {
        let mock = Self::answering(Permission::Granted);
        mock.set_permission(Permission::Granted);
        mock
    }

    pub fn set_permission(&self, permission: Permission) {
        *self.permission.lock().unwrap() = permission;
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Makes `notify` block the calling thread, like a slow D-Bus daemon.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    #[must_use]
    pub fn get_notifications(&self) -> Vec<NotificationContent> {
        self.notifications.lock().unwrap().clone()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    /// Number of times the prompt was actually shown.
    #[must_use]
    pub fn request_count(&self) -> usize {
        *self.requests.lock().unwrap()
    }
}

impl Notifier for MockNotifier {
    fn permission(&self) -> Permission {
        *self.permission.lock().unwrap()
    }

    fn request_permission(&self) -> Permission {
        let mut permission = self.permission.lock().unwrap();
        if *permission == Permission::Default {
            *self.requests.lock().unwrap() += 1;
            *permission = *self.answer.lock().unwrap();
        }
        *permission
    }

    fn notify(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        if !self.permission().is_granted() {
            return Err(NotificationError::PermissionDenied);
        }
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.notifications.lock().unwrap().push(content.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mode;

    mod desktop_notifier_tests {
        use super::*;

        #[test]
        fn test_starts_undecided() {
            assert_eq!(DesktopNotifier::new().permission(), Permission::Default);
        }

        #[test]
        fn test_denied_is_sticky() {
            let notifier = DesktopNotifier::denied();
            assert_eq!(notifier.request_permission(), Permission::Denied);
            assert_eq!(notifier.permission(), Permission::Denied);
        }

        #[test]
        fn test_denied_never_shows() {
            let notifier = DesktopNotifier::denied();
            let err = notifier
                .notify(&NotificationContent::session_complete(Mode::Focus))
                .unwrap_err();
            assert!(err.is_permission_error());
        }

        #[test]
        fn test_undecided_never_shows() {
            let notifier = DesktopNotifier::new();
            assert!(notifier
                .notify(&NotificationContent::session_complete(Mode::Focus))
                .is_err());
        }
    }

    mod mock_notifier_tests {
        use super::*;

        #[test]
        fn test_request_asks_once() {
            let mock = MockNotifier::answering(Permission::Granted);
            assert_eq!(mock.request_permission(), Permission::Granted);
            assert_eq!(mock.request_permission(), Permission::Granted);
            assert_eq!(mock.request_count(), 1);
        }

        #[test]
        fn test_denial_is_final() {
            let mock = MockNotifier::answering(Permission::Denied);
            assert_eq!(mock.request_permission(), Permission::Denied);
            assert_eq!(mock.request_permission(), Permission::Denied);
            assert_eq!(mock.request_count(), 1);
        }

        #[test]
        fn test_records_when_granted() {
            let mock = MockNotifier::granted();
            mock.notify(&NotificationContent::session_complete(Mode::LongBreak))
                .unwrap();

            let sent = mock.get_notifications();
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].body, "Your Long Break session is complete.");
        }

        #[test]
        fn test_failure() {
            let mock = MockNotifier::granted();
            mock.set_should_fail(true);
            assert!(mock
                .notify(&NotificationContent::session_complete(Mode::Focus))
                .is_err());
            assert_eq!(mock.notification_count(), 0);
        }
    }
}
