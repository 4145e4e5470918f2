//! Focus timer module
//!
//! Drives a `TimerSession` from a tick source and forwards finished phases
//! to the notifier.

pub mod controller;
pub mod events;
pub mod tick;

pub use controller::FocusTimer;
pub use events::TimerEvent;
pub use tick::{IntervalTickSource, ManualTickSource, TickCallback, TickSource};
