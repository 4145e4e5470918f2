//! Desktop notifications through the platform notification server

use notify_rust::Notification;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::error::NotifyError;
use super::{Notifier, PhaseNotification};

/// Application name shown by the notification server
const APP_NAME: &str = "Hook";

/// Notifier backed by notify-rust
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    runtime: Option<Handle>,
}

impl DesktopNotifier {
    /// Create a notifier; delivery moves to a blocking thread when a tokio runtime is present
    pub fn new() -> Self {
        Self {
            runtime: Handle::try_current().ok(),
        }
    }

    fn show(notification: &PhaseNotification) -> Result<(), NotifyError> {
        Notification::new()
            .appname(APP_NAME)
            .summary(&notification.title)
            .body(&notification.body)
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Dispatch(e.to_string()))
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for DesktopNotifier {
    #[cfg(all(unix, not(target_os = "macos")))]
    fn request_permission(&self) -> Result<(), NotifyError> {
        let server = notify_rust::get_server_information()
            .map_err(|e| NotifyError::PermissionDenied(e.to_string()))?;
        debug!("Notification server: {} {}", server.name, server.version);
        Ok(())
    }

    #[cfg(not(all(unix, not(target_os = "macos"))))]
    fn request_permission(&self) -> Result<(), NotifyError> {
        debug!("No notification permission check on this platform");
        Ok(())
    }

    fn schedule_immediate(&self, notification: &PhaseNotification) {
        let notification = notification.clone();
        match &self.runtime {
            Some(runtime) => {
                runtime.spawn_blocking(move || {
                    if let Err(e) = Self::show(&notification) {
                        warn!("{}", e);
                    }
                });
            }
            None => {
                if let Err(e) = Self::show(&notification) {
                    warn!("{}", e);
                }
            }
        }
    }
}
