//! State management module
//!
//! This module contains the timer session state machine, its supporting
//! value types, and the shared application state.

pub mod app_state;
pub mod debounce;
pub mod phase;
pub mod session;
pub mod stats;

// Re-export main types
pub use app_state::{AppOptions, AppState};
pub use debounce::{Activation, ActivationDebouncer};
pub use phase::{Phase, PhaseDurations};
pub use session::{PhaseEnded, RunState, TimerSession, TimerSnapshot};
pub use stats::FocusStats;
