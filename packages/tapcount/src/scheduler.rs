//! Deferred execution on the host's event thread.
//!
//! The disambiguator only needs "run this closure after a delay". Scheduled
//! work is fire-and-forget: no implementation hands back a cancellation handle,
//! staleness is handled by [`PendingToken`](crate::PendingToken) comparison.
//!
//! Two implementations are provided:
//!
//! - [`TokioScheduler`] spawns onto the current `tokio::task::LocalSet`
//! - [`ManualScheduler`] is driven by the host's own clock, e.g. once per frame

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::error::TapError;

/// Work scheduled to run once after a delay.
pub type ScheduledTask = Box<dyn FnOnce()>;

/// The host's deferred-execution primitive.
///
/// Tasks must run on the same thread that scheduled them, in the order their
/// deadlines elapse. A zero delay must still run the task on a later turn,
/// never inline.
pub trait Scheduler {
    /// Runs `task` once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: ScheduledTask);
}

// ============================================================================
// TokioScheduler
// ============================================================================

/// Scheduler backed by the tokio timer.
///
/// Tasks are spawned with [`tokio::task::spawn_local`], so scheduling must
/// happen inside a [`tokio::task::LocalSet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    #[must_use]
    pub const fn new() -> Self { Self }

    /// Creates a scheduler after checking that a tokio runtime is entered.
    ///
    /// # Errors
    ///
    /// Returns [`TapError::Scheduler`] when called outside a tokio runtime.
    pub fn try_current() -> Result<Self, TapError> {
        tokio::runtime::Handle::try_current()
            .map(|_| Self)
            .map_err(|err| TapError::Scheduler(err.to_string()))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) {
        // Deadline is taken now so that later taps always sort after earlier ones.
        let deadline = tokio::time::Instant::now() + delay;

        tokio::task::spawn_local(async move {
            if !delay.is_zero() {
                tokio::time::sleep_until(deadline).await;
            }
            task();
        });
    }
}

// ============================================================================
// ManualScheduler
// ============================================================================

/// Scheduler driven by an explicit virtual clock.
///
/// Nothing runs until the host calls [`advance`](Self::advance) or
/// [`run_pending`](Self::run_pending). Clones share the same queue and clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

#[derive(Default)]
struct ManualQueue {
    /// Virtual time elapsed since the scheduler was created.
    now: Duration,
    /// Tie-breaker so equal deadlines run in scheduling order.
    next_seq: u64,
    tasks: BTreeMap<(Duration, u64), ScheduledTask>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration { self.queue.borrow().now }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize { self.queue.borrow().tasks.len() }

    /// Moves the clock forward by `by`, running every task that comes due.
    ///
    /// Tasks run in deadline order with the clock set to their deadline, so
    /// work they schedule is timed from the moment they ran. Tasks scheduled
    /// during the call also run if they fall due before it returns.
    ///
    /// Returns the number of tasks that ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now().saturating_add(by);
        let mut ran = 0;

        loop {
            let task = {
                let mut queue = self.queue.borrow_mut();
                let due = queue
                    .tasks
                    .first_key_value()
                    .map(|(&key, _)| key)
                    .filter(|&(deadline, _)| deadline <= target);
                due.and_then(|key| {
                    queue.now = key.0;
                    queue.tasks.remove(&key)
                })
            };

            // The queue borrow is released here, tasks may schedule more work.
            let Some(task) = task else { break };
            task();
            ran += 1;
        }

        self.queue.borrow_mut().now = target;
        ran
    }

    /// Runs every task due at the current instant without moving the clock.
    pub fn run_pending(&self) -> usize { self.advance(Duration::ZERO) }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) {
        let mut queue = self.queue.borrow_mut();
        let deadline = queue.now.saturating_add(delay);
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.tasks.insert((deadline, seq), task);
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.queue.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &queue.now)
            .field("pending", &queue.tasks.len())
            .finish()
    }
}
