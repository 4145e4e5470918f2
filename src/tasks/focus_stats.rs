//! Focus statistics background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::{state::AppState, timer::TimerEvent};

/// Background task that folds finished phases into the focus statistics
pub async fn focus_stats_task(state: Arc<AppState>) {
    info!("Starting focus statistics task");

    let mut events = state.timer.subscribe();

    loop {
        match events.recv().await {
            Ok(TimerEvent::PhaseEnded { ended, .. }) => {
                if let Err(e) = state.record_phase_end(&ended) {
                    error!("Failed to record finished phase: {}", e);
                }
            }
            Ok(event) => {
                let snapshot = event.snapshot();
                debug!(
                    "Stats task ignoring event at {} {} ({:?})",
                    snapshot.phase, snapshot.display, snapshot.state
                );
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Stats task lagged behind, skipped {} timer events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Timer event channel closed, stopping focus statistics task");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        notify::LogNotifier,
        state::{AppOptions, PhaseDurations},
        timer::ManualTickSource,
    };

    #[tokio::test(start_paused = true)]
    async fn test_completed_work_phase_is_counted() {
        let ticks = ManualTickSource::new();
        let options = AppOptions {
            durations: PhaseDurations::from_minutes(1, 1),
            ..AppOptions::default()
        };
        let state = Arc::new(AppState::new(options, Box::new(ticks.clone()), LogNotifier));
        let task = tokio::spawn(focus_stats_task(Arc::clone(&state)));
        // Single-threaded runtime: one yield runs the task up to its first recv
        tokio::task::yield_now().await;

        state.timer.start().unwrap();
        ticks.fire_n(120);

        let mut stats = state.get_stats().unwrap();
        for _ in 0..16 {
            if stats.completed_break_phases == 1 {
                break;
            }
            tokio::task::yield_now().await;
            stats = state.get_stats().unwrap();
        }
        assert_eq!(stats.completed_work_phases, 1);
        assert_eq!(stats.completed_break_phases, 1);
        assert_eq!(stats.focused_seconds, 60);

        task.abort();
    }
}
