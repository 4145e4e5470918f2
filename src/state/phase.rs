//! Pomodoro phases and their durations

use serde::{Deserialize, Serialize};

/// Default work phase length (25 minutes)
pub const DEFAULT_WORK_SECONDS: u64 = 25 * 60;
/// Default break phase length (5 minutes)
pub const DEFAULT_BREAK_SECONDS: u64 = 5 * 60;
/// Shortest phase length in minutes
pub const MIN_PHASE_MINUTES: u64 = 1;
/// Longest phase length in minutes, the full turn of the crown
pub const MAX_PHASE_MINUTES: u64 = 60;

/// One interval of the Pomodoro cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    /// The phase that follows this one
    pub fn next(self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured length of each phase, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub work_seconds: u64,
    pub break_seconds: u64,
}

impl PhaseDurations {
    /// Build durations from minute values clamped to 1..=60 minutes
    pub fn from_minutes(work_minutes: u64, break_minutes: u64) -> Self {
        Self {
            work_seconds: clamp_minutes(work_minutes) * 60,
            break_seconds: clamp_minutes(break_minutes) * 60,
        }
    }

    /// Duration of the given phase in seconds
    pub fn for_phase(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_seconds,
            Phase::Break => self.break_seconds,
        }
    }
}

/// Clamp a minute count to the supported phase range
pub fn clamp_minutes(minutes: u64) -> u64 {
    minutes.clamp(MIN_PHASE_MINUTES, MAX_PHASE_MINUTES)
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            work_seconds: DEFAULT_WORK_SECONDS,
            break_seconds: DEFAULT_BREAK_SECONDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_alternates() {
        assert_eq!(Phase::Work.next(), Phase::Break);
        assert_eq!(Phase::Break.next(), Phase::Work);
        assert_eq!(Phase::Work.next().next(), Phase::Work);
    }

    #[test]
    fn test_default_durations() {
        let durations = PhaseDurations::default();
        assert_eq!(durations.for_phase(Phase::Work), 1500);
        assert_eq!(durations.for_phase(Phase::Break), 300);
    }

    #[test]
    fn test_zero_minutes_clamped() {
        let durations = PhaseDurations::from_minutes(0, 0);
        assert_eq!(durations.work_seconds, 60);
        assert_eq!(durations.break_seconds, 60);
    }

    #[test]
    fn test_huge_minutes_clamped_to_an_hour() {
        let durations = PhaseDurations::from_minutes(4_611_686_018_427_387_904, u64::MAX);
        assert_eq!(durations.work_seconds, 3600);
        assert_eq!(durations.break_seconds, 3600);
    }

    #[test]
    fn test_phase_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Phase::Break).unwrap(), "\"break\"");
    }
}
