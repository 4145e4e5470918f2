//! Hook Timer - A Pomodoro focus timer service
//!
//! This library provides the focus timer state machine behind the Hook watch
//! app, the tick and notification abstractions it runs on, and an HTTP
//! surface for driving it from a presentation layer.

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{NotifyError, TimerError};
pub use state::AppState;
pub use timer::FocusTimer;
pub use utils::signals::shutdown_signal;
