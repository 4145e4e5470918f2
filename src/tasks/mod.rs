//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod focus_stats;

// Re-export main functions
pub use focus_stats::focus_stats_task;
