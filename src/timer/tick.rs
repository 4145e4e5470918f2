//! Tick sources driving the countdown

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::debug;

use crate::error::TimerError;

/// Callback invoked once per tick
pub type TickCallback = Arc<dyn Fn() + Send + Sync>;

/// A repeating time base with at most one active callback.
///
/// `start` replaces any running callback. After `cancel` returns, the
/// previous callback is never invoked again.
pub trait TickSource: Send {
    fn start(&mut self, callback: TickCallback);
    fn cancel(&mut self);
    fn is_active(&self) -> bool;
}

/// Tick source backed by a tokio interval task
#[derive(Debug)]
pub struct IntervalTickSource {
    runtime: Handle,
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl IntervalTickSource {
    /// Create a one-second tick source bound to the current tokio runtime
    pub fn new() -> Result<Self, TimerError> {
        Self::with_period(Duration::from_secs(1))
    }

    pub fn with_period(period: Duration) -> Result<Self, TimerError> {
        let runtime = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;
        Ok(Self {
            runtime,
            period,
            task: None,
        })
    }
}

impl TickSource for IntervalTickSource {
    fn start(&mut self, callback: TickCallback) {
        self.cancel();

        let period = self.period;
        self.task = Some(self.runtime.spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the countdown starts one period later
            ticker.tick().await;
            loop {
                ticker.tick().await;
                callback();
            }
        }));
        debug!("Interval tick source started ({:?})", period);
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Interval tick source cancelled");
        }
    }

    fn is_active(&self) -> bool {
        self.task.as_ref().map(|t| !t.is_finished()).unwrap_or(false)
    }
}

impl Drop for IntervalTickSource {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Tick source fired by hand, for embedding in tests and simulations.
///
/// Clones share the same slot, so a caller can keep one clone and hand the
/// other to a timer.
#[derive(Clone, Default)]
pub struct ManualTickSource {
    callback: Arc<Mutex<Option<TickCallback>>>,
}

impl ManualTickSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke the active callback once. Returns false when nothing is registered.
    pub fn fire(&self) -> bool {
        let callback = match self.callback.lock() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        };
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Fire `count` ticks, stopping early if the callback is cancelled
    pub fn fire_n(&self, count: usize) -> usize {
        let mut fired = 0;
        for _ in 0..count {
            if !self.fire() {
                break;
            }
            fired += 1;
        }
        fired
    }
}

impl std::fmt::Debug for ManualTickSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualTickSource")
            .field("active", &self.is_active())
            .finish()
    }
}

impl TickSource for ManualTickSource {
    fn start(&mut self, callback: TickCallback) {
        if let Ok(mut slot) = self.callback.lock() {
            *slot = Some(callback);
        }
    }

    fn cancel(&mut self) {
        if let Ok(mut slot) = self.callback.lock() {
            *slot = None;
        }
    }

    fn is_active(&self) -> bool {
        self.callback.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, TickCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, Arc::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }))
    }

    #[test]
    fn test_manual_source_fires_until_cancelled() {
        let (count, callback) = counter();
        let mut source = ManualTickSource::new();
        let handle = source.clone();

        assert!(!handle.fire());
        source.start(callback);
        assert_eq!(handle.fire_n(3), 3);
        source.cancel();
        assert!(!handle.fire());
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_interval_source_requires_runtime() {
        assert!(matches!(IntervalTickSource::new(), Err(TimerError::NoRuntime)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_source_ticks_every_second() {
        let (count, callback) = counter();
        let mut source = IntervalTickSource::new().unwrap();
        source.start(callback);
        assert!(source.is_active());

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        source.cancel();
        assert!(!source.is_active());
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_previous_callback() {
        let (first, first_cb) = counter();
        let (second, second_cb) = counter();
        let mut source = IntervalTickSource::new().unwrap();

        source.start(first_cb);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        source.start(second_cb);
        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }
}
