//! Focus timer session and its state machine
//!
//! `TimerSession` is a plain value with no clock attached. Whoever owns it
//! decides when a second has passed and calls [`TimerSession::tick`]; the
//! session only keeps the countdown and phase bookkeeping consistent.

use serde::{Deserialize, Serialize};

use super::phase::{clamp_minutes, Phase, PhaseDurations};

/// Whether the countdown is advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
}

/// Emitted when a phase runs out while the timer is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseEnded {
    /// The phase that just finished
    pub ended: Phase,
    /// The phase the session moved into
    pub next: Phase,
    /// How long the finished phase lasted, in seconds
    pub duration_seconds: u64,
}

/// Serializable view of a session at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub state: RunState,
    pub duration_seconds: u64,
    pub remaining_seconds: u64,
    /// Fraction of the phase still left, 1.0 at the start of a phase
    pub progress: f64,
    /// Remaining time as MM:SS
    pub display: String,
    /// Remaining whole minutes, e.g. "24 min"
    pub display_minutes: String,
}

/// The countdown state of a single Pomodoro session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSession {
    durations: PhaseDurations,
    phase: Phase,
    duration_seconds: u64,
    remaining_seconds: u64,
    running: bool,
}

impl TimerSession {
    /// Create an idle session at the start of a work phase
    pub fn new(durations: PhaseDurations) -> Self {
        let duration_seconds = durations.for_phase(Phase::Work);
        Self {
            durations,
            phase: Phase::Work,
            duration_seconds,
            remaining_seconds: duration_seconds,
            running: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run_state(&self) -> RunState {
        if self.running {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    /// Move from idle to running. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Move from running to idle. Returns false if already idle.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Pause when running, start when idle. Returns the new running flag.
    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
        self.running
    }

    /// Return to an idle work phase at its full configured length
    pub fn reset(&mut self) {
        self.phase = Phase::Work;
        self.duration_seconds = self.durations.for_phase(Phase::Work);
        self.remaining_seconds = self.duration_seconds;
        self.running = false;
    }

    /// Advance the countdown by one second.
    ///
    /// Idle sessions ignore ticks. When the countdown reaches zero the session
    /// flips to the next phase in the same call, reloads the countdown, and
    /// keeps running.
    pub fn tick(&mut self) -> Option<PhaseEnded> {
        if !self.running {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return None;
        }

        let ended = PhaseEnded {
            ended: self.phase,
            next: self.phase.next(),
            duration_seconds: self.duration_seconds,
        };
        self.phase = ended.next;
        self.duration_seconds = self.durations.for_phase(self.phase);
        self.remaining_seconds = self.duration_seconds;
        Some(ended)
    }

    /// Set the current phase's length, as the crown does, clamped to 1..=60 minutes.
    ///
    /// Only the current phase changes; the next phase uses its configured length.
    pub fn adjust_minutes(&mut self, minutes: u64) -> u64 {
        self.duration_seconds = clamp_minutes(minutes) * 60;
        self.remaining_seconds = self.duration_seconds;
        self.duration_seconds
    }

    /// Fraction of the current phase still remaining
    pub fn progress(&self) -> f64 {
        if self.duration_seconds == 0 {
            return 0.0;
        }
        self.remaining_seconds as f64 / self.duration_seconds as f64
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            state: self.run_state(),
            duration_seconds: self.duration_seconds,
            remaining_seconds: self.remaining_seconds,
            progress: self.progress(),
            display: format_clock(self.remaining_seconds),
            display_minutes: format_minutes(self.remaining_seconds),
        }
    }
}

impl Default for TimerSession {
    fn default() -> Self {
        Self::new(PhaseDurations::default())
    }
}

/// Format seconds as MM:SS
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format seconds as whole minutes, e.g. "24 min"
pub fn format_minutes(seconds: u64) -> String {
    format!("{} min", seconds / 60)
}
