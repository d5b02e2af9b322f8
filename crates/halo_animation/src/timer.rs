//! Frame-driven one-shot timers
//!
//! [`FrameScheduler`] is a deferred-callback queue driven by the host's frame
//! clock. The host calls [`FrameScheduler::advance`] (or
//! [`FrameScheduler::tick`] with an absolute time) once per frame and every
//! timer whose deadline has passed fires exactly once, in deadline order.
//! Because time only moves when the host says so, tests get a fully
//! simulated clock for free.
//!
//! The scheduler is single-threaded. Callbacks run with no internal borrow
//! held, so they may schedule or cancel other timers.
//!
//! ```rust
//! use halo_animation::FrameScheduler;
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let scheduler = FrameScheduler::new();
//! let fired = Rc::new(Cell::new(false));
//!
//! let f = fired.clone();
//! scheduler.schedule(Duration::from_millis(10), move || f.set(true));
//!
//! scheduler.advance(Duration::from_millis(5));
//! assert!(!fired.get());
//! scheduler.advance(Duration::from_millis(5));
//! assert!(fired.get());
//! ```

use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

new_key_type! {
    /// Handle to a pending timer
    pub struct TimerId;
}

struct PendingTimer {
    deadline: Duration,
    /// Tie-breaker so timers with equal deadlines fire in scheduling order
    seq: u64,
    task: Box<dyn FnOnce()>,
}

struct SchedulerInner {
    now: Duration,
    next_seq: u64,
    timers: SlotMap<TimerId, PendingTimer>,
}

impl SchedulerInner {
    /// Remove and return the earliest timer due at the current time
    fn pop_due(&mut self) -> Option<(TimerId, PendingTimer)> {
        let now = self.now;
        let id = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.seq))
            .map(|(id, _)| id)?;
        self.timers.remove(id).map(|t| (id, t))
    }
}

/// Shared handle to a frame-driven timer queue (cheap to clone)
#[derive(Clone)]
pub struct FrameScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl FrameScheduler {
    /// Create a scheduler whose clock starts at zero
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                now: Duration::ZERO,
                next_seq: 0,
                timers: SlotMap::with_key(),
            })),
        }
    }

    /// Current scheduler time
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Run `task` once, `delay` after the current scheduler time
    ///
    /// Deadlines saturate, so `Duration::MAX` means "never" in practice.
    pub fn schedule<F>(&self, delay: Duration, task: F) -> TimerId
    where
        F: FnOnce() + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let deadline = inner.now.saturating_add(delay);
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let id = inner.timers.insert(PendingTimer {
            deadline,
            seq,
            task: Box::new(task),
        });
        tracing::trace!(?id, ?deadline, "timer scheduled");
        id
    }

    /// Cancel a pending timer
    ///
    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&self, id: TimerId) -> bool {
        let removed = self.inner.borrow_mut().timers.remove(id).is_some();
        if removed {
            tracing::trace!(?id, "timer cancelled");
        }
        removed
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.inner.borrow().timers.contains_key(id)
    }

    /// Number of timers that have not fired yet
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Earliest pending deadline, so a host can sleep until it
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner.borrow().timers.values().map(|t| t.deadline).min()
    }

    /// Move the clock forward by `dt` and fire due timers
    ///
    /// Returns the number of timers fired.
    pub fn advance(&self, dt: Duration) -> usize {
        let target = self.now().saturating_add(dt);
        self.tick(target)
    }

    /// Set the clock to `now` (never backwards) and fire due timers
    ///
    /// Returns the number of timers fired.
    pub fn tick(&self, now: Duration) -> usize {
        {
            let mut inner = self.inner.borrow_mut();
            if now > inner.now {
                inner.now = now;
            }
        }

        let mut fired = 0;
        loop {
            let due = self.inner.borrow_mut().pop_due();
            let Some((id, timer)) = due else {
                break;
            };
            tracing::trace!(?id, deadline = ?timer.deadline, "timer fired");
            (timer.task)();
            fired += 1;
        }
        fired
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("FrameScheduler")
            .field("now", &inner.now)
            .field("pending", &inner.timers.len())
            .finish()
    }
}
