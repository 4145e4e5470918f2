//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    notify::InboxItem,
    state::{FocusStats, TimerSnapshot},
};

/// API response structure for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Response for a call that left the timer running
    pub fn running(message: String, timer: TimerSnapshot) -> Self {
        Self::new("running".to_string(), message, timer)
    }

    /// Response for a call that left the timer idle
    pub fn idle(message: String, timer: TimerSnapshot) -> Self {
        Self::new("idle".to_string(), message, timer)
    }

    /// Pick `running` or `idle` from the snapshot
    pub fn from_snapshot(message: String, timer: TimerSnapshot) -> Self {
        match timer.state {
            crate::state::RunState::Running => Self::running(message, timer),
            crate::state::RunState::Idle => Self::idle(message, timer),
        }
    }
}

/// Body of POST /timer/adjust
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustRequest {
    pub minutes: u64,
}

/// One inbox entry with its relative age
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEntry {
    #[serde(flatten)]
    pub item: InboxItem,
    pub age: String,
}

/// Inbox listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsResponse {
    pub unread: usize,
    pub notifications: Vec<NotificationEntry>,
}

/// Status response with timer, statistics and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub stats: FocusStats,
    pub notifications_permitted: Option<bool>,
    pub unread_notifications: usize,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
