//! Timer hosts for delayed dispatch.
//!
//! The debounce layer only needs "run this once after a delay" and "forget
//! that". [`TokioTimers`] provides that on a tokio runtime; [`ManualTimers`]
//! runs on a virtual clock that the host advances explicitly.

use crate::error::KeasyError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Identifies a scheduled timer on the host that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Deferred work handed to a timer host.
pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// The host's timer facility.
pub trait TimerHost: Send + Sync {
    /// Run `task` once, `delay` from now.
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerId;

    /// Cancel a pending timer. Unknown or already fired ids are ignored.
    fn cancel(&self, id: TimerId);
}

/// Timer host backed by a tokio runtime.
#[derive(Debug)]
pub struct TokioTimers {
    handle: Handle,
    next_id: AtomicU64,
    tasks: Arc<Mutex<HashMap<TimerId, JoinHandle<()>>>>,
}

impl TokioTimers {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            next_id: AtomicU64::new(0),
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Use the runtime the caller is running on.
    ///
    /// # Errors
    /// Returns [`KeasyError::TimerUnavailable`] outside a tokio runtime.
    pub fn current() -> Result<Self, KeasyError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| KeasyError::TimerUnavailable(e.to_string()))
    }

    /// Number of timers scheduled and not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }
}

impl TimerHost for TokioTimers {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        // A deadline past the end of the clock never comes due
        let deadline = tokio::time::Instant::now().checked_add(delay);
        let tasks = Arc::clone(&self.tasks);

        // Hold the lock across spawn so the task cannot remove itself
        // before it has been recorded.
        let mut pending = self.tasks.lock();
        let handle = self.handle.spawn(async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
            tasks.lock().remove(&id);
            task();
        });
        pending.insert(id, handle);
        id
    }

    fn cancel(&self, id: TimerId) {
        if let Some(handle) = self.tasks.lock().remove(&id) {
            handle.abort();
        }
    }
}

/// Timer host driven by a virtual clock.
///
/// Nothing fires until [`ManualTimers::advance`] moves the clock past a
/// timer's deadline. Timers fire in deadline order (ties in scheduling
/// order), with the clock set to each deadline while its task runs.
#[derive(Default)]
pub struct ManualTimers {
    state: Mutex<ManualState>,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    queue: Vec<(Duration, TimerId, TimerTask)>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time, measured from creation.
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    pub fn pending(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Move the clock forward by `by`, firing every timer that comes due.
    ///
    /// Tasks run without the clock's lock held, so they may schedule or
    /// cancel timers; newly scheduled timers that fall inside the window
    /// fire during this same call.
    pub fn advance(&self, by: Duration) {
        let target = self.state.lock().now.saturating_add(by);

        loop {
            let task = {
                let mut state = self.state.lock();
                let next = state
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, (deadline, _, _))| *deadline <= target)
                    .min_by_key(|(_, (deadline, id, _))| (*deadline, *id))
                    .map(|(index, _)| index);

                match next {
                    Some(index) => {
                        let (deadline, id, task) = state.queue.remove(index);
                        state.now = deadline;
                        log::trace!("Manual timer {:?} fired at {:?}", id, deadline);
                        task
                    }
                    None => {
                        state.now = target;
                        break;
                    }
                }
            };
            task();
        }
    }
}

impl std::fmt::Debug for ManualTimers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ManualTimers")
            .field("now", &state.now)
            .field("pending", &state.queue.len())
            .finish()
    }
}

impl TimerHost for ManualTimers {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerId {
        let mut state = self.state.lock();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let deadline = state.now.saturating_add(delay);
        state.queue.push((deadline, id, task));
        id
    }

    fn cancel(&self, id: TimerId) {
        self.state.lock().queue.retain(|(_, queued, _)| *queued != id);
    }
}
