//! Events broadcast by the focus timer

use serde::{Deserialize, Serialize};

use crate::state::{PhaseEnded, TimerSnapshot};

/// A state change of the focus timer, with the snapshot taken right after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    Started { snapshot: TimerSnapshot },
    Paused { snapshot: TimerSnapshot },
    Reset { snapshot: TimerSnapshot },
    Adjusted { snapshot: TimerSnapshot },
    PhaseEnded { ended: PhaseEnded, snapshot: TimerSnapshot },
}

impl TimerEvent {
    pub fn snapshot(&self) -> &TimerSnapshot {
        match self {
            TimerEvent::Started { snapshot }
            | TimerEvent::Paused { snapshot }
            | TimerEvent::Reset { snapshot }
            | TimerEvent::Adjusted { snapshot }
            | TimerEvent::PhaseEnded { snapshot, .. } => snapshot,
        }
    }
}
