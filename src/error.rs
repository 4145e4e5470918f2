//! Error types shared across the timer, notifier and API layers

use thiserror::Error;

/// Errors raised by the focus timer and its collaborators
#[derive(Debug, Error)]
pub enum TimerError {
    /// A mutex guarding timer state was poisoned by a panicking holder
    #[error("timer state lock poisoned: {0}")]
    StatePoisoned(String),

    /// The interval tick source was created outside a tokio runtime
    #[error("no tokio runtime available for the tick source")]
    NoRuntime,

    /// No inbox item carries the requested id
    #[error("notification {0} not found")]
    NotificationNotFound(u64),
}

impl<T> From<std::sync::PoisonError<T>> for TimerError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        TimerError::StatePoisoned(e.to_string())
    }
}

/// Errors raised by notification backends
///
/// Neither kind ever blocks the timer: callers log and move on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// The platform refused notification authorization
    #[error("notification permission denied: {0}")]
    PermissionDenied(String),

    /// Delivering a single notification failed
    #[error("notification dispatch failed: {0}")]
    Dispatch(String),
}
