//! The focus timer: session state, tick source and notifier wired together

use std::{
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::{Duration, Instant},
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{
    error::TimerError,
    notify::{Notifier, PhaseNotification},
    state::{Activation, ActivationDebouncer, PhaseDurations, PhaseEnded, TimerSession, TimerSnapshot},
};
use super::{
    events::TimerEvent,
    tick::{TickCallback, TickSource},
};

/// Capacity of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 100;

struct Inner {
    session: TimerSession,
    debouncer: ActivationDebouncer,
    ticks: Box<dyn TickSource>,
    /// Bumped whenever the tick source is (re)started or cancelled.
    /// A tick carrying an older generation is dropped.
    generation: u64,
}

/// Pomodoro timer owning its tick source and notifier.
///
/// All mutation goes through one mutex. Every finished phase produces
/// exactly one call to [`Notifier::schedule_immediate`] and one
/// [`TimerEvent::PhaseEnded`].
pub struct FocusTimer {
    inner: Mutex<Inner>,
    notifier: Arc<dyn Notifier>,
    events: broadcast::Sender<TimerEvent>,
    this: Weak<FocusTimer>,
}

impl FocusTimer {
    pub fn new(
        durations: PhaseDurations,
        debounce_window: Duration,
        ticks: Box<dyn TickSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let debouncer = ActivationDebouncer::new(debounce_window);
        debug!(
            "Focus timer ready: work {}s, break {}s, double press window {:?}",
            durations.work_seconds,
            durations.break_seconds,
            debouncer.window()
        );
        Arc::new_cyclic(|this| Self {
            inner: Mutex::new(Inner {
                session: TimerSession::new(durations),
                debouncer,
                ticks,
                generation: 0,
            }),
            notifier,
            events,
            this: this.clone(),
        })
    }

    /// Subscribe to timer events
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.events.subscribe()
    }

    /// Query notification permission once; denial is logged and otherwise ignored
    pub fn request_notification_permission(&self) -> bool {
        match self.notifier.request_permission() {
            Ok(()) => {
                info!("Notification permission granted");
                true
            }
            Err(e) => {
                warn!("{}; the timer keeps running without notifications", e);
                false
            }
        }
    }

    pub fn snapshot(&self) -> Result<TimerSnapshot, TimerError> {
        Ok(self.lock()?.session.snapshot())
    }

    /// Start counting down. No-op when already running.
    pub fn start(&self) -> Result<TimerSnapshot, TimerError> {
        let mut inner = self.lock()?;
        self.start_locked(&mut inner);
        Ok(inner.session.snapshot())
    }

    /// Stop counting down. No-op when already idle.
    pub fn pause(&self) -> Result<TimerSnapshot, TimerError> {
        let mut inner = self.lock()?;
        self.pause_locked(&mut inner);
        Ok(inner.session.snapshot())
    }

    /// Pause a running timer or start an idle one
    pub fn toggle(&self) -> Result<TimerSnapshot, TimerError> {
        let mut inner = self.lock()?;
        if inner.session.is_running() {
            self.pause_locked(&mut inner);
        } else {
            self.start_locked(&mut inner);
        }
        Ok(inner.session.snapshot())
    }

    /// Cancel ticking and return to an idle, full-length work phase
    pub fn reset(&self) -> Result<TimerSnapshot, TimerError> {
        let mut inner = self.lock()?;
        Self::stop_ticking(&mut inner);
        inner.session.reset();
        inner.debouncer.clear();

        let snapshot = inner.session.snapshot();
        info!("Timer reset to {} ({})", snapshot.phase, snapshot.display);
        self.emit(TimerEvent::Reset { snapshot: snapshot.clone() });
        Ok(snapshot)
    }

    /// Handle a crown press at `now`; a double press pauses, a single press starts
    pub fn activate(&self, now: Instant) -> Result<(Activation, TimerSnapshot), TimerError> {
        let mut inner = self.lock()?;
        let running = inner.session.is_running();
        let activation = inner.debouncer.register(now, running);
        debug!("Crown activation resolved to {:?}", activation);

        match activation {
            Activation::Start => {
                self.start_locked(&mut inner);
            }
            Activation::Pause => {
                self.pause_locked(&mut inner);
            }
            Activation::Ignored => {}
        }
        Ok((activation, inner.session.snapshot()))
    }

    /// Set the current phase length in minutes (clamped to the crown range)
    pub fn adjust_minutes(&self, minutes: u64) -> Result<TimerSnapshot, TimerError> {
        let mut inner = self.lock()?;
        let seconds = inner.session.adjust_minutes(minutes);
        let snapshot = inner.session.snapshot();
        info!("Current {} phase set to {}s", snapshot.phase, seconds);
        self.emit(TimerEvent::Adjusted { snapshot: snapshot.clone() });
        Ok(snapshot)
    }

    /// Apply one tick from the tick source started at `generation`
    fn on_tick(&self, generation: u64) {
        let ended = {
            let mut inner = match self.lock() {
                Ok(inner) => inner,
                Err(e) => {
                    warn!("Dropping tick: {}", e);
                    return;
                }
            };
            if inner.generation != generation || !inner.session.is_running() {
                debug!("Dropping stale tick (generation {})", generation);
                return;
            }

            match inner.session.tick() {
                Some(ended) => {
                    let snapshot = inner.session.snapshot();
                    info!(
                        "{} phase ended, continuing with {} ({})",
                        ended.ended, ended.next, snapshot.display
                    );
                    self.emit(TimerEvent::PhaseEnded { ended, snapshot });
                    ended
                }
                None => {
                    debug!("Tick: {}s remaining", inner.session.remaining_seconds());
                    return;
                }
            }
        };

        self.dispatch(&ended);
    }

    fn dispatch(&self, ended: &PhaseEnded) {
        let notification = PhaseNotification::for_ended(ended.ended);
        self.notifier.schedule_immediate(&notification);
    }

    fn start_locked(&self, inner: &mut Inner) -> bool {
        if !inner.session.start() {
            debug!("Start ignored, timer already running");
            return false;
        }

        Self::stop_ticking(inner);
        let generation = inner.generation;
        let timer = self.this.clone();
        let callback: TickCallback = Arc::new(move || {
            if let Some(timer) = timer.upgrade() {
                timer.on_tick(generation);
            }
        });
        inner.ticks.start(callback);

        let snapshot = inner.session.snapshot();
        info!("Timer started: {} phase, {} remaining", snapshot.phase, snapshot.display);
        self.emit(TimerEvent::Started { snapshot });
        true
    }

    fn pause_locked(&self, inner: &mut Inner) -> bool {
        if !inner.session.pause() {
            debug!("Pause ignored, timer already idle");
            return false;
        }

        Self::stop_ticking(inner);
        let snapshot = inner.session.snapshot();
        info!("Timer paused: {} phase, {} remaining", snapshot.phase, snapshot.display);
        self.emit(TimerEvent::Paused { snapshot });
        true
    }

    fn stop_ticking(inner: &mut Inner) {
        inner.ticks.cancel();
        inner.generation = inner.generation.wrapping_add(1);
    }

    fn emit(&self, event: TimerEvent) {
        // No subscribers is not an error
        let _ = self.events.send(event);
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, TimerError> {
        self.inner.lock().map_err(TimerError::from)
    }
}

impl Drop for FocusTimer {
    fn drop(&mut self) {
        if let Ok(inner) = self.inner.get_mut() {
            inner.ticks.cancel();
        }
    }
}
