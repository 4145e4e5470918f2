//! Notifier interface and the in-process implementations

use std::sync::{Arc, Mutex};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{error::NotifyError, state::Phase};
use super::inbox::NotificationInbox;

/// Content of the notification sent when a phase ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseNotification {
    /// The phase that ended
    pub phase: Phase,
    pub title: String,
    pub body: String,
}

impl PhaseNotification {
    pub fn for_ended(phase: Phase) -> Self {
        let (title, body) = match phase {
            Phase::Work => ("Work session complete!", "Time to take a break."),
            Phase::Break => ("Break is over!", "Time to get back to work."),
        };
        Self {
            phase,
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

/// Outbound notification service.
///
/// `schedule_immediate` is fire-and-forget: implementations log failures
/// and never report them back to the timer.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Ask the platform for permission to show notifications
    fn request_permission(&self) -> Result<(), NotifyError>;

    /// Deliver a notification now
    fn schedule_immediate(&self, notification: &PhaseNotification);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn request_permission(&self) -> Result<(), NotifyError> {
        (**self).request_permission()
    }

    fn schedule_immediate(&self, notification: &PhaseNotification) {
        (**self).schedule_immediate(notification)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn request_permission(&self) -> Result<(), NotifyError> {
        (**self).request_permission()
    }

    fn schedule_immediate(&self, notification: &PhaseNotification) {
        (**self).schedule_immediate(notification)
    }
}

/// Notifier that only writes to the log
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn request_permission(&self) -> Result<(), NotifyError> {
        Ok(())
    }

    fn schedule_immediate(&self, notification: &PhaseNotification) {
        info!("Notification: {} - {}", notification.title, notification.body);
    }
}

/// Records every notification into the inbox before passing it on
pub struct InboxNotifier<N> {
    inner: N,
    inbox: Arc<Mutex<NotificationInbox>>,
}

impl<N: Notifier> InboxNotifier<N> {
    pub fn new(inner: N, inbox: Arc<Mutex<NotificationInbox>>) -> Self {
        Self { inner, inbox }
    }
}

impl<N: Notifier> Notifier for InboxNotifier<N> {
    fn request_permission(&self) -> Result<(), NotifyError> {
        self.inner.request_permission()
    }

    fn schedule_immediate(&self, notification: &PhaseNotification) {
        match self.inbox.lock() {
            Ok(mut inbox) => {
                inbox.push(notification, Utc::now());
            }
            Err(e) => warn!("Failed to record notification in inbox: {}", e),
        }
        self.inner.schedule_immediate(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_text_depends_on_phase() {
        let work = PhaseNotification::for_ended(Phase::Work);
        let rest = PhaseNotification::for_ended(Phase::Break);
        assert_eq!(work.title, "Work session complete!");
        assert_eq!(rest.title, "Break is over!");
        assert_ne!(work.body, rest.body);
    }

    #[test]
    fn test_inbox_notifier_records_and_forwards() {
        let inbox = Arc::new(Mutex::new(NotificationInbox::default()));
        let mut inner = MockNotifier::new();
        inner
            .expect_schedule_immediate()
            .withf(|n| n.phase == Phase::Work)
            .times(1)
            .return_const(());

        let notifier = InboxNotifier::new(inner, Arc::clone(&inbox));
        notifier.schedule_immediate(&PhaseNotification::for_ended(Phase::Work));

        let inbox = inbox.lock().unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox.list()[0].title, "Work session complete!");
    }

    #[test]
    fn test_inbox_notifier_delegates_permission() {
        let mut inner = MockNotifier::new();
        inner
            .expect_request_permission()
            .times(1)
            .returning(|| Err(NotifyError::PermissionDenied("no server".into())));

        let notifier = InboxNotifier::new(inner, Arc::new(Mutex::new(NotificationInbox::default())));
        assert_eq!(
            notifier.request_permission(),
            Err(NotifyError::PermissionDenied("no server".into()))
        );
    }
}
