//! Focus statistics gathered from completed phases

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{phase::Phase, session::PhaseEnded};

/// Running totals of completed Pomodoro phases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FocusStats {
    pub completed_work_phases: u64,
    pub completed_break_phases: u64,
    /// Seconds spent in fully completed work phases
    pub focused_seconds: u64,
    pub last_phase_ended_at: Option<DateTime<Utc>>,
}

impl FocusStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one completed phase into the totals
    pub fn record(&mut self, ended: &PhaseEnded, at: DateTime<Utc>) {
        match ended.ended {
            Phase::Work => {
                self.completed_work_phases += 1;
                self.focused_seconds += ended.duration_seconds;
            }
            Phase::Break => self.completed_break_phases += 1,
        }
        self.last_phase_ended_at = Some(at);
    }

    /// Focused time as whole minutes
    pub fn focused_minutes(&self) -> u64 {
        self.focused_seconds / 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_phase_adds_focus_time() {
        let mut stats = FocusStats::new();
        let now = Utc::now();
        stats.record(
            &PhaseEnded { ended: Phase::Work, next: Phase::Break, duration_seconds: 1500 },
            now,
        );
        assert_eq!(stats.completed_work_phases, 1);
        assert_eq!(stats.focused_minutes(), 25);
        assert_eq!(stats.last_phase_ended_at, Some(now));
    }

    #[test]
    fn test_break_phase_does_not_add_focus_time() {
        let mut stats = FocusStats::new();
        stats.record(
            &PhaseEnded { ended: Phase::Break, next: Phase::Work, duration_seconds: 300 },
            Utc::now(),
        );
        assert_eq!(stats.completed_break_phases, 1);
        assert_eq!(stats.focused_seconds, 0);
    }
}
