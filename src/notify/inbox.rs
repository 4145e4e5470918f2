//! In-memory notification inbox

use std::collections::VecDeque;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::TimerError, state::Phase};
use super::PhaseNotification;

/// Default number of notifications kept before the oldest are evicted
pub const DEFAULT_INBOX_CAPACITY: usize = 50;

/// One delivered notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxItem {
    pub id: u64,
    pub title: String,
    pub body: String,
    /// Phase whose end produced this notification
    pub phase: Phase,
    pub received_at: DateTime<Utc>,
    pub read: bool,
}

impl InboxItem {
    /// Relative age such as "3 min ago" or "2 h ago"
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let minutes = (now - self.received_at).num_minutes().max(0);
        if minutes < 60 {
            format!("{} min ago", minutes)
        } else {
            format!("{} h ago", minutes / 60)
        }
    }
}

/// Bounded list of delivered notifications, newest first
#[derive(Debug, Clone)]
pub struct NotificationInbox {
    items: VecDeque<InboxItem>,
    capacity: usize,
    next_id: u64,
}

impl NotificationInbox {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity: capacity.max(1),
            next_id: 1,
        }
    }

    /// Record a notification and return its id
    pub fn push(&mut self, notification: &PhaseNotification, received_at: DateTime<Utc>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.items.push_front(InboxItem {
            id,
            title: notification.title.clone(),
            body: notification.body.clone(),
            phase: notification.phase,
            received_at,
            read: false,
        });
        self.items.truncate(self.capacity);
        id
    }

    pub fn list(&self) -> Vec<InboxItem> {
        self.items.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.read).count()
    }

    pub fn mark_read(&mut self, id: u64) -> Result<(), TimerError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(TimerError::NotificationNotFound(id))?;
        item.read = true;
        Ok(())
    }

    pub fn mark_all_read(&mut self) {
        for item in self.items.iter_mut() {
            item.read = true;
        }
    }

    pub fn remove(&mut self, id: u64) -> Result<InboxItem, TimerError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(TimerError::NotificationNotFound(id))?;
        self.items
            .remove(index)
            .ok_or(TimerError::NotificationNotFound(id))
    }

    /// Drop every item, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }
}

impl Default for NotificationInbox {
    fn default() -> Self {
        Self::new(DEFAULT_INBOX_CAPACITY)
    }
}
