//! Trailing-edge debounce over a [`TimerHost`].
//!
//! Each [`Debouncer::trigger`] cancels the pending timer and schedules a new
//! one, so a burst of triggers runs the action once, `delay` after the last
//! trigger of the burst.

use crate::listener::Callback;
use crate::timer::{TimerHost, TimerId};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

pub struct Debouncer {
    delay: Duration,
    timers: Arc<dyn TimerHost>,
    action: Callback,
    state: Mutex<DebounceState>,
}

#[derive(Default)]
struct DebounceState {
    /// Bumped on every trigger and cancel; a firing timer whose generation
    /// is stale does nothing.
    generation: u64,
    timer: Option<TimerId>,
}

impl Debouncer {
    pub fn new(delay: Duration, timers: Arc<dyn TimerHost>, action: Callback) -> Self {
        Self {
            delay,
            timers,
            action,
            state: Mutex::new(DebounceState::default()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the quiet period.
    pub fn trigger(self: &Arc<Self>) {
        let mut state = self.state.lock();
        if let Some(timer) = state.timer.take() {
            self.timers.cancel(timer);
        }
        state.generation += 1;
        let generation = state.generation;

        let this = Arc::clone(self);
        let timer = self
            .timers
            .schedule(self.delay, Box::new(move || this.fire(generation)));
        state.timer = Some(timer);
        log::trace!("Debounce restarted ({:?})", self.delay);
    }

    /// Drop any pending invocation.
    pub fn cancel(&self) {
        let mut state = self.state.lock();
        state.generation += 1;
        if let Some(timer) = state.timer.take() {
            self.timers.cancel(timer);
            log::trace!("Pending debounce cancelled");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state.lock().timer.is_some()
    }

    fn fire(&self, generation: u64) {
        {
            let mut state = self.state.lock();
            if state.generation != generation {
                return;
            }
            state.timer = None;
        }
        (self.action)();
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualTimers;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn setup(delay_ms: u64) -> (Arc<ManualTimers>, Arc<Debouncer>, Arc<AtomicUsize>) {
        let timers = Arc::new(ManualTimers::new());
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let debouncer = Arc::new(Debouncer::new(
            Duration::from_millis(delay_ms),
            timers.clone(),
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        ));
        (timers, debouncer, count)
    }

    #[test]
    fn test_burst_collapses() {
        let (timers, debouncer, count) = setup(100);

        debouncer.trigger();
        timers.advance(Duration::from_millis(30));
        debouncer.trigger();
        timers.advance(Duration::from_millis(30));
        debouncer.trigger();

        timers.advance(Duration::from_millis(99));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        timers.advance(Duration::from_millis(1));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(timers.now(), Duration::from_millis(160));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_separate_bursts_fire_separately() {
        let (timers, debouncer, count) = setup(50);

        debouncer.trigger();
        timers.advance(Duration::from_millis(60));
        debouncer.trigger();
        timers.advance(Duration::from_millis(60));

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cancel_drops_pending() {
        let (timers, debouncer, count) = setup(10);

        debouncer.trigger();
        assert!(debouncer.is_pending());
        debouncer.cancel();
        timers.advance(Duration::from_millis(100));

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_zero_delay_still_deferred() {
        let (timers, debouncer, count) = setup(0);

        debouncer.trigger();
        debouncer.trigger();
        assert_eq!(count.load(Ordering::SeqCst), 0);

        timers.advance(Duration::ZERO);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
