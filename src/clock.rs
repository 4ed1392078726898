//! Clock Module - Deferred timer queue and one-shot completion signal
//!
//! Single-threaded, cooperative scheduling. Everything time-based in the
//! crate runs as a fire-and-forget callback on a [`TimerQueue`] that the
//! host pumps with `advance_to`. There is no cancellation: once scheduled,
//! a timer always fires (the page is long-lived for this UI only).
//!
//! Ordering guarantee: callbacks fire in non-decreasing scheduled-time
//! order. Timers sharing a deadline fire in schedule order, but callers
//! must not rely on that.
//!
//! # Example
//!
//! ```ignore
//! use reveal_tui::clock::TimerQueue;
//!
//! let queue = TimerQueue::new();
//! queue.schedule(100, || println!("later"));
//! queue.advance_to(100); // fires the callback
//! ```

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use crate::types::Ticks;

// =============================================================================
// TIMER QUEUE
// =============================================================================

struct TimerEntry {
    fire_at: Ticks,
    /// Schedule-order tiebreak for equal deadlines.
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

// BinaryHeap is a max-heap; reverse the ordering to pop earliest first.
impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl Eq for TimerEntry {}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.fire_at, other.seq).cmp(&(self.fire_at, self.seq))
    }
}

struct QueueInner {
    now: Ticks,
    next_seq: u64,
    timers: BinaryHeap<TimerEntry>,
}

/// Manually pumped timer queue.
///
/// Cheap to clone - clones share the same queue, so scheduled callbacks can
/// carry a handle and schedule follow-up timers while firing.
#[derive(Clone)]
pub struct TimerQueue {
    inner: Rc<RefCell<QueueInner>>,
}

impl TimerQueue {
    /// Create an empty queue at time zero.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(QueueInner {
                now: 0,
                next_seq: 0,
                timers: BinaryHeap::new(),
            })),
        }
    }

    /// Current logical time.
    pub fn now(&self) -> Ticks {
        self.inner.borrow().now
    }

    /// Number of timers still pending.
    pub fn pending(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Deadline of the earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<Ticks> {
        self.inner.borrow().timers.peek().map(|entry| entry.fire_at)
    }

    /// Schedule `callback` to fire `delay` ticks from now.
    pub fn schedule(&self, delay: Ticks, callback: impl FnOnce() + 'static) {
        let mut inner = self.inner.borrow_mut();
        let fire_at = inner.now + delay;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.timers.push(TimerEntry {
            fire_at,
            seq,
            callback: Box::new(callback),
        });
    }

    /// Advance logical time to `deadline`, firing every due timer in order.
    ///
    /// While a timer fires, `now()` reports that timer's deadline, so
    /// follow-up timers it schedules are relative to its own fire time.
    /// Callbacks scheduled by callbacks fire in the same pump if still due.
    pub fn advance_to(&self, deadline: Ticks) {
        loop {
            let entry = {
                let mut inner = self.inner.borrow_mut();
                let due = inner
                    .timers
                    .peek()
                    .is_some_and(|next| next.fire_at <= deadline);
                let Some(entry) = (if due { inner.timers.pop() } else { None }) else {
                    break;
                };
                inner.now = inner.now.max(entry.fire_at);
                entry
            };
            // Borrow released: the callback may schedule more timers.
            (entry.callback)();
        }
        let mut inner = self.inner.borrow_mut();
        inner.now = inner.now.max(deadline);
    }

    /// Advance logical time by `delta` ticks.
    pub fn advance(&self, delta: Ticks) {
        let deadline = self.now() + delta;
        self.advance_to(deadline);
    }

    /// Fire everything still pending, however far out, and return the time
    /// the queue settled at.
    pub fn drain(&self) -> Ticks {
        while let Some(deadline) = self.next_deadline() {
            self.advance_to(deadline);
        }
        self.now()
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// COMPLETION SIGNAL
// =============================================================================

struct CompletionInner {
    settled: bool,
    listener: Option<Box<dyn FnOnce()>>,
}

/// Single-slot, one-shot completion notification.
///
/// Structurally guarantees "fires exactly once, to at most one listener":
/// `settle` is idempotent, a second listener is rejected, and a listener
/// registered after settling runs immediately.
#[derive(Clone)]
pub struct Completion {
    inner: Rc<RefCell<CompletionInner>>,
}

impl Completion {
    /// Create an unsettled completion.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(CompletionInner {
                settled: false,
                listener: None,
            })),
        }
    }

    /// Whether the completion has fired.
    pub fn is_settled(&self) -> bool {
        self.inner.borrow().settled
    }

    /// Register the listener. Returns `false` (and drops `listener`) if a
    /// listener is already registered. Registering after settlement runs the
    /// listener immediately and still counts as the one slot.
    pub fn on_complete(&self, listener: impl FnOnce() + 'static) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.listener.is_some() {
                return false;
            }
            if !inner.settled {
                inner.listener = Some(Box::new(listener));
                return true;
            }
            // Keep the slot occupied so no second listener sneaks in.
            inner.listener = Some(Box::new(|| {}));
        }
        listener();
        true
    }

    /// Fire the completion. A no-op if already settled.
    pub fn settle(&self) {
        let listener = {
            let mut inner = self.inner.borrow_mut();
            if inner.settled {
                return;
            }
            inner.settled = true;
            inner.listener.take()
        };
        if let Some(listener) = listener {
            listener();
        }
    }
}

impl Default for Completion {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_schedule_and_advance() {
        let queue = TimerQueue::new();
        let fired = Rc::new(RefCell::new(Vec::new()));

        for (delay, tag) in [(300u64, "c"), (100, "a"), (200, "b")] {
            let fired = fired.clone();
            queue.schedule(delay, move || fired.borrow_mut().push(tag));
        }

        queue.advance_to(150);
        assert_eq!(*fired.borrow(), vec!["a"]);
        assert_eq!(queue.now(), 150);
        assert_eq!(queue.pending(), 2);

        queue.advance_to(300);
        assert_eq!(*fired.borrow(), vec!["a", "b", "c"]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_equal_deadlines_fire_in_schedule_order() {
        let queue = TimerQueue::new();
        let fired = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let fired = fired.clone();
            queue.schedule(100, move || fired.borrow_mut().push(tag));
        }

        queue.advance_to(100);
        assert_eq!(*fired.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_callback_schedules_followup() {
        let queue = TimerQueue::new();
        let fired = Rc::new(RefCell::new(Vec::new()));

        let fired_outer = fired.clone();
        let handle = queue.clone();
        queue.schedule(100, move || {
            fired_outer.borrow_mut().push(("step", handle.now()));
            let fired_inner = fired_outer.clone();
            let inner_handle = handle.clone();
            handle.schedule(50, move || {
                fired_inner.borrow_mut().push(("chained", inner_handle.now()));
            });
        });

        // Follow-up is relative to the firing timer's deadline, not the
        // pump deadline, and fires within the same pump when due.
        queue.advance_to(1000);
        assert_eq!(*fired.borrow(), vec![("step", 100), ("chained", 150)]);
    }

    #[test]
    fn test_advance_without_timers_moves_clock() {
        let queue = TimerQueue::new();
        queue.advance_to(500);
        assert_eq!(queue.now(), 500);

        queue.advance(250);
        assert_eq!(queue.now(), 750);
    }

    #[test]
    fn test_drain_settles_at_last_deadline() {
        let queue = TimerQueue::new();
        let handle = queue.clone();
        queue.schedule(100, move || handle.schedule(400, || {}));

        assert_eq!(queue.drain(), 500);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_completion_fires_exactly_once() {
        let completion = Completion::new();
        let count = Rc::new(RefCell::new(0));

        let count_listener = count.clone();
        assert!(completion.on_complete(move || *count_listener.borrow_mut() += 1));

        completion.settle();
        completion.settle(); // idempotent
        assert_eq!(*count.borrow(), 1);
        assert!(completion.is_settled());
    }

    #[test]
    fn test_completion_rejects_second_listener() {
        let completion = Completion::new();
        assert!(completion.on_complete(|| {}));
        assert!(!completion.on_complete(|| panic!("second listener must not register")));

        completion.settle();
    }

    #[test]
    fn test_completion_late_listener_runs_immediately() {
        let completion = Completion::new();
        completion.settle();

        let ran = Rc::new(RefCell::new(false));
        let ran_listener = ran.clone();
        assert!(completion.on_complete(move || *ran_listener.borrow_mut() = true));
        assert!(*ran.borrow());

        // The one slot is spent even when registered late.
        assert!(!completion.on_complete(|| {}));
    }
}
