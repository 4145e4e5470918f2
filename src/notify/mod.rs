//! Notification module
//!
//! The timer hands one `PhaseNotification` per finished phase to a `Notifier`.
//! Backends here deliver it to the desktop, the log, and the in-memory inbox.

pub mod desktop;
pub mod inbox;
pub mod notifier;

pub use desktop::DesktopNotifier;
pub use inbox::{InboxItem, NotificationInbox, DEFAULT_INBOX_CAPACITY};
pub use notifier::{InboxNotifier, LogNotifier, Notifier, PhaseNotification};

#[cfg(test)]
pub use notifier::MockNotifier;
