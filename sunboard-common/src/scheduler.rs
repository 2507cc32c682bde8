//! One-shot timer facility the dashboard state machines are driven by.
//!
//! Everything here is single-threaded: callbacks are not `Send` and run on
//! the thread that owns the scheduler. [`ManualScheduler`] is a fake clock
//! for deterministic tests; [`TokioScheduler`] runs callbacks on a
//! `tokio::task::LocalSet`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::trace;

/// Work to run once a timer fires.
pub type TimerCallback = Box<dyn FnOnce() + 'static>;

/// Opaque handle identifying a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Host timer contract.
pub trait Scheduler {
    /// Run `callback` once after `delay`.
    fn schedule_once(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Drop a pending callback. Unknown or already-fired handles are ignored.
    fn cancel(&self, handle: TimerHandle);
}

impl<T: Scheduler + ?Sized> Scheduler for Rc<T> {
    fn schedule_once(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        (**self).schedule_once(delay, callback)
    }

    fn cancel(&self, handle: TimerHandle) {
        (**self).cancel(handle)
    }
}

// ── Manual (fake clock) ──────────────────────────────────────────────────

struct PendingTimer {
    id: u64,
    due: Duration,
    callback: TimerCallback,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl ManualClock {
    /// Remove the earliest timer due at or before `limit` (FIFO on ties).
    fn pop_due(&mut self, limit: Option<Duration>) -> Option<PendingTimer> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| limit.is_none_or(|limit| t.due <= limit))
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(idx, _)| idx)?;
        let timer = self.pending.swap_remove(idx);
        self.now = self.now.max(timer.due);
        Some(timer)
    }
}

/// Deterministic scheduler whose clock only moves when told to.
///
/// Clones share the same clock and queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current fake time since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of callbacks waiting to fire.
    pub fn pending(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Move the clock forward by `delta`, firing every callback that comes
    /// due on the way, including ones scheduled by earlier callbacks.
    ///
    /// Returns how many callbacks ran.
    pub fn advance(&self, delta: Duration) -> usize {
        let target = self.now() + delta;
        let mut fired = 0;
        loop {
            // The borrow must end before the callback runs: callbacks
            // schedule their successors on this same clock.
            let next = self.clock.borrow_mut().pop_due(Some(target));
            let Some(timer) = next else { break };
            trace!(timer = timer.id, due_ms = timer.due.as_millis() as u64, "manual timer fired");
            (timer.callback)();
            fired += 1;
        }
        self.clock.borrow_mut().now = target;
        fired
    }

    /// Jump straight to the next pending callback and run it.
    ///
    /// Returns `false` when nothing is pending.
    pub fn fire_next(&self) -> bool {
        let next = self.clock.borrow_mut().pop_due(None);
        match next {
            Some(timer) => {
                (timer.callback)();
                true
            }
            None => false,
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + delay;
        clock.pending.push(PendingTimer { id, due, callback });
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        self.clock
            .borrow_mut()
            .pending
            .retain(|timer| timer.id != handle.0);
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let clock = self.clock.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &clock.now)
            .field("pending", &clock.pending.len())
            .finish()
    }
}

// ── Tokio ────────────────────────────────────────────────────────────────

type TaskMap = RefCell<HashMap<u64, tokio::task::JoinHandle<()>>>;

/// Scheduler backed by `tokio::time::sleep` on local tasks.
///
/// Must be used from inside a `tokio::task::LocalSet`; `spawn_local`
/// panics anywhere else.
#[derive(Clone, Default)]
pub struct TokioScheduler {
    tasks: Rc<TaskMap>,
    next_id: Rc<Cell<u64>>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers that have not fired or been cancelled.
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_once(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let tasks: Weak<TaskMap> = Rc::downgrade(&self.tasks);
        let task = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            if let Some(tasks) = tasks.upgrade() {
                tasks.borrow_mut().remove(&id);
            }
            callback();
        });
        // The task cannot run before we yield, so inserting afterwards is safe.
        self.tasks.borrow_mut().insert(id, task);
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Some(task) = self.tasks.borrow_mut().remove(&handle.0) {
            task.abort();
        }
    }
}

impl std::fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::init_test_logging;
    use tracing::info;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> TimerCallback) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let make = move |label: &'static str| -> TimerCallback {
            let sink = sink.clone();
            Box::new(move || sink.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn test_manual_fires_in_due_order() {
        init_test_logging();
        info!("TEST START: test_manual_fires_in_due_order");
        let scheduler = ManualScheduler::new();
        let (log, cb) = recorder();

        scheduler.schedule_once(Duration::from_millis(30), cb("c"));
        scheduler.schedule_once(Duration::from_millis(10), cb("a"));
        scheduler.schedule_once(Duration::from_millis(20), cb("b"));

        assert_eq!(scheduler.advance(Duration::from_millis(15)), 1);
        assert_eq!(*log.borrow(), vec!["a"]);
        assert_eq!(scheduler.advance(Duration::from_millis(100)), 2);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(scheduler.now(), Duration::from_millis(115));
        info!("TEST PASS: test_manual_fires_in_due_order");
    }

    #[test]
    fn test_manual_ties_are_fifo() {
        init_test_logging();
        let scheduler = ManualScheduler::new();
        let (log, cb) = recorder();

        scheduler.schedule_once(Duration::ZERO, cb("first"));
        scheduler.schedule_once(Duration::ZERO, cb("second"));
        scheduler.advance(Duration::ZERO);

        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_manual_cancel_drops_callback() {
        init_test_logging();
        let scheduler = ManualScheduler::new();
        let (log, cb) = recorder();

        let handle = scheduler.schedule_once(Duration::from_millis(5), cb("cancelled"));
        scheduler.schedule_once(Duration::from_millis(5), cb("kept"));
        scheduler.cancel(handle);
        // Cancelling twice is harmless.
        scheduler.cancel(handle);

        assert_eq!(scheduler.pending(), 1);
        scheduler.advance(Duration::from_millis(5));
        assert_eq!(*log.borrow(), vec!["kept"]);
    }

    #[test]
    fn test_manual_runs_callbacks_scheduled_during_advance() {
        init_test_logging();
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0u32));

        let inner_scheduler = scheduler.clone();
        let inner_hits = hits.clone();
        scheduler.schedule_once(
            Duration::from_millis(10),
            Box::new(move || {
                inner_hits.set(inner_hits.get() + 1);
                let hits = inner_hits.clone();
                inner_scheduler.schedule_once(
                    Duration::from_millis(10),
                    Box::new(move || hits.set(hits.get() + 1)),
                );
            }),
        );

        assert_eq!(scheduler.advance(Duration::from_millis(25)), 2);
        assert_eq!(hits.get(), 2);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_manual_fire_next_ignores_clock() {
        init_test_logging();
        let scheduler = ManualScheduler::new();
        let (log, cb) = recorder();

        scheduler.schedule_once(Duration::from_secs(60), cb("late"));
        assert!(scheduler.fire_next());
        assert_eq!(scheduler.now(), Duration::from_secs(60));
        assert!(!scheduler.fire_next());
        assert_eq!(*log.borrow(), vec!["late"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_fires_and_cancels() {
        init_test_logging();
        info!("TEST START: test_tokio_scheduler_fires_and_cancels");
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let scheduler = TokioScheduler::new();
                let (log, cb) = recorder();

                scheduler.schedule_once(Duration::from_millis(10), cb("fired"));
                let cancelled = scheduler.schedule_once(Duration::from_millis(10), cb("cancelled"));
                scheduler.cancel(cancelled);
                assert_eq!(scheduler.pending(), 1);

                tokio::time::sleep(Duration::from_millis(20)).await;

                assert_eq!(*log.borrow(), vec!["fired"]);
                assert_eq!(scheduler.pending(), 0);
            })
            .await;
        info!("TEST PASS: test_tokio_scheduler_fires_and_cancels");
    }
}
