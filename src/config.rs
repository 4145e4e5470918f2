//! Configuration and CLI argument handling

use std::time::Duration;
use clap::{Parser, ValueEnum};

use crate::state::{AppOptions, PhaseDurations};

/// Where phase notifications are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotifierKind {
    /// Desktop notification server
    Desktop,
    /// Log lines only
    Log,
}

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "hook-timer")]
#[command(about = "A Pomodoro focus timer service with phase notifications")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Work phase length in minutes
    #[arg(short, long, default_value = "25", value_parser = clap::value_parser!(u64).range(1..=60))]
    pub work_minutes: u64,

    /// Break phase length in minutes
    #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u64).range(1..=60))]
    pub break_minutes: u64,

    /// Window in which a second crown press counts as a double press, in milliseconds
    #[arg(long, default_value = "300")]
    pub debounce_ms: u64,

    /// Notification backend
    #[arg(short, long, value_enum, default_value = "desktop")]
    pub notifier: NotifierKind,

    /// Number of notifications kept in the inbox
    #[arg(long, default_value = "50")]
    pub inbox_capacity: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Options used to build the application state
    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            port: self.port,
            host: self.host.clone(),
            durations: PhaseDurations::from_minutes(self.work_minutes, self.break_minutes),
            debounce_window: Duration::from_millis(self.debounce_ms),
            inbox_capacity: self.inbox_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pomodoro() {
        let config = Config::try_parse_from(["hook-timer"]).unwrap();
        let options = config.app_options();
        assert_eq!(options.durations.work_seconds, 1500);
        assert_eq!(options.durations.break_seconds, 300);
        assert_eq!(options.debounce_window, Duration::from_millis(300));
        assert_eq!(config.notifier, NotifierKind::Desktop);
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "hook-timer", "-w", "50", "-b", "10", "--notifier", "log", "--verbose",
        ])
        .unwrap();
        let options = config.app_options();
        assert_eq!(options.durations.work_seconds, 3000);
        assert_eq!(options.durations.break_seconds, 600);
        assert_eq!(config.notifier, NotifierKind::Log);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_phase_minutes_out_of_range_rejected() {
        assert!(Config::try_parse_from(["hook-timer", "-w", "4611686018427387904"]).is_err());
        assert!(Config::try_parse_from(["hook-timer", "-w", "0"]).is_err());
        assert!(Config::try_parse_from(["hook-timer", "-b", "61"]).is_err());
        assert!(Config::try_parse_from(["hook-timer", "-w", "60", "-b", "1"]).is_ok());
    }
}
