//! Crown press debouncing

use std::time::{Duration, Instant};

/// Default window in which a second press counts as a double press
pub const DEFAULT_DOUBLE_ACTIVATION_WINDOW: Duration = Duration::from_millis(300);

/// What a crown press resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Single press on an idle timer
    Start,
    /// Double press on a running timer
    Pause,
    /// Nothing to do for this press
    Ignored,
}

/// Collapses rapid crown presses into start/pause decisions.
///
/// A press within `window` of the previous remembered press is a double
/// press: it pauses a running timer and clears the memory. Any other press
/// starts an idle timer and is remembered.
#[derive(Debug, Clone)]
pub struct ActivationDebouncer {
    window: Duration,
    last_activation: Option<Instant>,
}

impl ActivationDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_activation: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Classify a press at `now` given whether the timer is running
    pub fn register(&mut self, now: Instant, running: bool) -> Activation {
        let is_double = self
            .last_activation
            .map(|last| now.saturating_duration_since(last) < self.window)
            .unwrap_or(false);

        if is_double {
            self.last_activation = None;
            if running {
                Activation::Pause
            } else {
                Activation::Ignored
            }
        } else {
            self.last_activation = Some(now);
            if running {
                Activation::Ignored
            } else {
                Activation::Start
            }
        }
    }

    /// Forget the remembered press
    pub fn clear(&mut self) {
        self.last_activation = None;
    }
}

impl Default for ActivationDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_ACTIVATION_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_300ms() {
        assert_eq!(ActivationDebouncer::default().window(), Duration::from_millis(300));
    }

    #[test]
    fn test_single_press_on_idle_starts() {
        let mut debouncer = ActivationDebouncer::default();
        assert_eq!(debouncer.register(Instant::now(), false), Activation::Start);
    }

    #[test]
    fn test_single_press_on_running_is_ignored() {
        let mut debouncer = ActivationDebouncer::default();
        assert_eq!(debouncer.register(Instant::now(), true), Activation::Ignored);
    }

    #[test]
    fn test_double_press_pauses_running_timer() {
        let mut debouncer = ActivationDebouncer::default();
        let t0 = Instant::now();
        assert_eq!(debouncer.register(t0, true), Activation::Ignored);
        assert_eq!(
            debouncer.register(t0 + Duration::from_millis(120), true),
            Activation::Pause
        );
    }

    #[test]
    fn test_presses_outside_window_are_independent() {
        let mut debouncer = ActivationDebouncer::default();
        let t0 = Instant::now();
        assert_eq!(debouncer.register(t0, false), Activation::Start);
        assert_eq!(
            debouncer.register(t0 + Duration::from_millis(300), true),
            Activation::Ignored
        );
    }

    #[test]
    fn test_double_press_clears_memory() {
        let mut debouncer = ActivationDebouncer::default();
        let t0 = Instant::now();
        debouncer.register(t0, true);
        debouncer.register(t0 + Duration::from_millis(100), true);
        // Third press right after a double press starts a fresh sequence
        assert_eq!(
            debouncer.register(t0 + Duration::from_millis(150), false),
            Activation::Start
        );
    }
}
