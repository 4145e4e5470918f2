//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    error::TimerError,
    notify::{InboxItem, InboxNotifier, NotificationInbox, Notifier, DEFAULT_INBOX_CAPACITY},
    timer::{FocusTimer, TickSource},
};
use super::{
    debounce::DEFAULT_DOUBLE_ACTIVATION_WINDOW,
    phase::PhaseDurations,
    session::PhaseEnded,
    stats::FocusStats,
};

/// Settings needed to assemble an `AppState`
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub port: u16,
    pub host: String,
    pub durations: PhaseDurations,
    pub debounce_window: Duration,
    pub inbox_capacity: usize,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            port: 20554,
            host: "127.0.0.1".to_string(),
            durations: PhaseDurations::default(),
            debounce_window: DEFAULT_DOUBLE_ACTIVATION_WINDOW,
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
        }
    }
}

/// Shared state behind the HTTP handlers and background tasks
pub struct AppState {
    /// The focus timer
    pub timer: Arc<FocusTimer>,
    /// Notifications delivered by the timer
    pub inbox: Arc<Mutex<NotificationInbox>>,
    /// Totals of completed phases
    pub stats: Arc<Mutex<FocusStats>>,
    /// Result of the startup permission query, `None` until asked
    pub notifications_permitted: Mutex<Option<bool>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Assemble the timer, inbox and stats. Every notification the timer
    /// sends goes through the inbox before reaching `notifier`.
    pub fn new<N>(options: AppOptions, ticks: Box<dyn TickSource>, notifier: N) -> Self
    where
        N: Notifier + 'static,
    {
        let inbox = Arc::new(Mutex::new(NotificationInbox::new(options.inbox_capacity)));
        let notifier = InboxNotifier::new(notifier, Arc::clone(&inbox));
        let timer = FocusTimer::new(
            options.durations,
            options.debounce_window,
            ticks,
            Arc::new(notifier),
        );

        Self {
            timer,
            inbox,
            stats: Arc::new(Mutex::new(FocusStats::new())),
            notifications_permitted: Mutex::new(None),
            start_time: Instant::now(),
            port: options.port,
            host: options.host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Ask the notifier for permission once and remember the answer
    pub fn check_notification_permission(&self) -> Result<bool, TimerError> {
        let granted = self.timer.request_notification_permission();
        *self.notifications_permitted.lock()? = Some(granted);
        Ok(granted)
    }

    pub fn notifications_permitted(&self) -> Option<bool> {
        self.notifications_permitted.lock().ok().and_then(|p| *p)
    }

    /// Remember the most recent user action
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Fold a finished phase into the focus statistics
    pub fn record_phase_end(&self, ended: &PhaseEnded) -> Result<FocusStats, TimerError> {
        let mut stats = self.stats.lock()?;
        stats.record(ended, Utc::now());
        info!(
            "Completed {} phase ({} work phases, {} min focused)",
            ended.ended,
            stats.completed_work_phases,
            stats.focused_minutes()
        );
        Ok(stats.clone())
    }

    pub fn get_stats(&self) -> Result<FocusStats, TimerError> {
        Ok(self.stats.lock()?.clone())
    }

    /// Inbox contents and the number of unread items
    pub fn list_notifications(&self) -> Result<(Vec<InboxItem>, usize), TimerError> {
        let inbox = self.inbox.lock()?;
        Ok((inbox.list(), inbox.unread_count()))
    }

    pub fn mark_notification_read(&self, id: u64) -> Result<(), TimerError> {
        self.inbox.lock()?.mark_read(id)
    }

    pub fn mark_all_notifications_read(&self) -> Result<(), TimerError> {
        self.inbox.lock()?.mark_all_read();
        Ok(())
    }

    pub fn remove_notification(&self, id: u64) -> Result<InboxItem, TimerError> {
        let item = self.inbox.lock()?.remove(id)?;
        info!("Removed notification {}", id);
        Ok(item)
    }

    pub fn clear_notifications(&self) -> Result<usize, TimerError> {
        let removed = self.inbox.lock()?.clear();
        info!("Cleared {} notifications", removed);
        Ok(removed)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        notify::LogNotifier,
        state::Phase,
        timer::ManualTickSource,
    };

    fn app() -> (AppState, ManualTickSource) {
        let ticks = ManualTickSource::new();
        let options = AppOptions {
            durations: PhaseDurations::from_minutes(1, 1),
            ..AppOptions::default()
        };
        (AppState::new(options, Box::new(ticks.clone()), LogNotifier), ticks)
    }

    #[test]
    fn test_phase_end_lands_in_inbox() {
        let (state, ticks) = app();
        state.timer.start().unwrap();
        ticks.fire_n(60);

        let (items, unread) = state.list_notifications().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(unread, 1);
        assert_eq!(items[0].phase, Phase::Work);

        state.mark_all_notifications_read().unwrap();
        assert_eq!(state.list_notifications().unwrap().1, 0);
        assert_eq!(state.clear_notifications().unwrap(), 1);
    }

    #[test]
    fn test_record_phase_end_updates_stats() {
        let (state, _ticks) = app();
        let stats = state
            .record_phase_end(&PhaseEnded { ended: Phase::Work, next: Phase::Break, duration_seconds: 60 })
            .unwrap();
        assert_eq!(stats.completed_work_phases, 1);
        assert_eq!(state.get_stats().unwrap().focused_seconds, 60);
    }

    #[test]
    fn test_permission_is_remembered() {
        let (state, _ticks) = app();
        assert_eq!(state.notifications_permitted(), None);
        assert!(state.check_notification_permission().unwrap());
        assert_eq!(state.notifications_permitted(), Some(true));
    }

    #[test]
    fn test_last_action_tracking() {
        let (state, _ticks) = app();
        assert_eq!(state.get_last_action().0, None);
        state.record_action("start");
        let (action, at) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("start"));
        assert!(at.is_some());
    }
}
