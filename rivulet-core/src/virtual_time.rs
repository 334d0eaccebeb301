// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deterministic virtual clock.
//!
//! [`VirtualTimer`] is an explicit event-driven scheduler: every pending sleep is
//! queued by its readiness time, and logical time only moves when the owner calls
//! [`advance`](VirtualTimer::advance), [`advance_to`](VirtualTimer::advance_to) or
//! [`advance_to_next`](VirtualTimer::advance_to_next). Sleepers whose deadline has
//! been reached are woken in deadline order, ties broken by registration order.
//!
//! # Example
//!
//! ```
//! use futures::FutureExt;
//! use rivulet_core::{Timer, VirtualTimer};
//! use std::time::Duration;
//!
//! let timer = VirtualTimer::new();
//! let mut sleep = timer.sleep_future(Duration::from_secs(1));
//!
//! assert!((&mut sleep).now_or_never().is_none());
//! timer.advance_to_next();
//! assert!(sleep.now_or_never().is_some());
//! assert_eq!(timer.elapsed(), Duration::from_secs(1));
//! ```

use crate::timer::Timer;
use core::cmp::Reverse;
use core::future::Future;
use core::ops::{Add, Sub};
use core::pin::Pin;
use core::task::{Context, Poll, Waker};
use core::time::Duration;
use parking_lot::Mutex;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

/// A point on a [`VirtualTimer`]'s logical time line, measured from the clock's start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualInstant(Duration);

impl VirtualInstant {
    /// The instant the clock starts at.
    pub const START: Self = Self(Duration::ZERO);

    /// Logical time elapsed between the clock's start and this instant.
    #[must_use]
    pub const fn since_start(self) -> Duration {
        self.0
    }
}

impl Add<Duration> for VirtualInstant {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs)
    }
}

impl Sub<VirtualInstant> for VirtualInstant {
    type Output = Duration;

    fn sub(self, rhs: VirtualInstant) -> Duration {
        self.0.saturating_sub(rhs.0)
    }
}

#[derive(Debug, Default)]
struct Scheduler {
    now: VirtualInstant,
    next_id: u64,
    queue: BinaryHeap<Reverse<(VirtualInstant, u64)>>,
    wakers: HashMap<u64, Waker>,
}

impl Scheduler {
    fn register(&mut self, deadline: VirtualInstant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.queue.push(Reverse((deadline, id)));
        id
    }

    /// Earliest deadline that still has a live sleeper, dropping stale queue entries.
    fn next_deadline(&mut self) -> Option<VirtualInstant> {
        while let Some(Reverse((deadline, id))) = self.queue.peek().copied() {
            if self.wakers.contains_key(&id) {
                return Some(deadline);
            }
            self.queue.pop();
        }
        None
    }

    fn advance_to(&mut self, target: VirtualInstant) -> Vec<Waker> {
        if target > self.now {
            self.now = target;
        }

        let mut expired = Vec::new();
        while let Some(Reverse((deadline, id))) = self.queue.peek().copied() {
            if deadline > self.now {
                break;
            }
            self.queue.pop();
            if let Some(waker) = self.wakers.remove(&id) {
                expired.push(waker);
            }
        }
        expired
    }
}

/// Handle to a shared virtual clock. Clones observe and drive the same clock.
#[derive(Clone, Debug, Default)]
pub struct VirtualTimer {
    scheduler: Arc<Mutex<Scheduler>>,
}

impl VirtualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical time elapsed since the clock started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.scheduler.lock().now.since_start()
    }

    /// Number of sleepers currently waiting on this clock.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.lock().wakers.len()
    }

    /// Readiness time of the earliest waiting sleeper, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<VirtualInstant> {
        self.scheduler.lock().next_deadline()
    }

    /// Moves the clock forward by `duration`, waking every sleeper that became ready.
    ///
    /// Returns the number of sleepers woken.
    pub fn advance(&self, duration: Duration) -> usize {
        let target = self.scheduler.lock().now + duration;
        self.advance_to(target)
    }

    /// Moves the clock to `target` (never backwards), waking every sleeper that became ready.
    ///
    /// Returns the number of sleepers woken.
    pub fn advance_to(&self, target: VirtualInstant) -> usize {
        let (expired, now) = {
            let mut scheduler = self.scheduler.lock();
            let expired = scheduler.advance_to(target);
            (expired, scheduler.now)
        };

        let fired = expired.len();
        debug!("virtual clock at {:?}: {} timer(s) fired", now.since_start(), fired);

        // Wake outside the lock, a woken task may poll a sleep on this clock
        for waker in expired {
            waker.wake();
        }
        fired
    }

    /// Jumps straight to the earliest pending deadline and wakes everything due then.
    ///
    /// Returns the new instant, or `None` when no sleeper is waiting.
    pub fn advance_to_next(&self) -> Option<VirtualInstant> {
        let deadline = self.scheduler.lock().next_deadline()?;
        self.advance_to(deadline);
        Some(self.now())
    }
}

impl Timer for VirtualTimer {
    type Sleep = VirtualSleep;

    type Instant = VirtualInstant;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        let deadline = self.now() + duration;
        VirtualSleep {
            scheduler: Arc::clone(&self.scheduler),
            deadline,
            id: None,
        }
    }

    fn now(&self) -> Self::Instant {
        self.scheduler.lock().now
    }
}

/// Future returned by [`VirtualTimer::sleep_future`].
///
/// The sleeper joins the clock's queue on its first poll.
#[derive(Debug)]
pub struct VirtualSleep {
    scheduler: Arc<Mutex<Scheduler>>,
    deadline: VirtualInstant,
    id: Option<u64>,
}

impl VirtualSleep {
    /// The instant at which this sleep completes.
    #[must_use]
    pub const fn deadline(&self) -> VirtualInstant {
        self.deadline
    }
}

impl Future for VirtualSleep {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();

        // Replaced wakers are dropped after the guard: dropping one may drop a task
        // that owns another sleep on this clock.
        let (poll, _stale) = {
            let mut scheduler = this.scheduler.lock();

            if scheduler.now >= this.deadline {
                let stale = this.id.take().and_then(|id| scheduler.wakers.remove(&id));
                (Poll::Ready(()), stale)
            } else {
                let id = match this.id {
                    Some(id) => id,
                    None => {
                        let id = scheduler.register(this.deadline);
                        this.id = Some(id);
                        id
                    }
                };
                let stale = scheduler.wakers.insert(id, cx.waker().clone());
                (Poll::Pending, stale)
            }
        };

        poll
    }
}

impl Drop for VirtualSleep {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            let stale = self.scheduler.lock().wakers.remove(&id);
            drop(stale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::task::{waker, ArcWake};
    use futures::FutureExt;

    struct SleepOwner(#[allow(dead_code)] VirtualSleep);

    impl ArcWake for SleepOwner {
        fn wake_by_ref(_arc_self: &Arc<Self>) {}
    }

    #[test]
    fn sleeps_fire_in_deadline_order() {
        let timer = VirtualTimer::new();
        let mut late = timer.sleep_future(Duration::from_millis(300));
        let mut early = timer.sleep_future(Duration::from_millis(100));

        assert!((&mut late).now_or_never().is_none());
        assert!((&mut early).now_or_never().is_none());
        assert_eq!(timer.pending_timers(), 2);

        assert_eq!(
            timer.advance_to_next().map(VirtualInstant::since_start),
            Some(Duration::from_millis(100))
        );
        assert!((&mut early).now_or_never().is_some());
        assert!((&mut late).now_or_never().is_none());

        assert_eq!(
            timer.advance_to_next().map(VirtualInstant::since_start),
            Some(Duration::from_millis(300))
        );
        assert!(late.now_or_never().is_some());
        assert_eq!(timer.advance_to_next(), None);
    }

    #[test]
    fn dropped_sleep_leaves_no_pending_timer() {
        let timer = VirtualTimer::new();
        let mut sleep = timer.sleep_future(Duration::from_secs(1));
        assert!((&mut sleep).now_or_never().is_none());
        drop(sleep);

        assert_eq!(timer.pending_timers(), 0);
        assert_eq!(timer.next_deadline(), None);
    }

    #[test]
    fn clock_never_moves_backwards() {
        let timer = VirtualTimer::new();
        timer.advance(Duration::from_secs(2));
        timer.advance_to(VirtualInstant::START + Duration::from_secs(1));

        assert_eq!(timer.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn replacing_a_waker_that_owns_another_sleep_does_not_deadlock() {
        let timer = VirtualTimer::new();
        let mut inner = timer.sleep_future(Duration::from_secs(2));
        assert!((&mut inner).now_or_never().is_none());

        let owner = waker(Arc::new(SleepOwner(inner)));
        let mut outer = timer.sleep_future(Duration::from_secs(1));
        assert!(Pin::new(&mut outer)
            .poll(&mut Context::from_waker(&owner))
            .is_pending());
        drop(owner);

        // The clock holds the last reference to `inner`; replacing it drops that sleep
        assert!((&mut outer).now_or_never().is_none());
        assert_eq!(timer.pending_timers(), 1);

        timer.advance_to_next();
        assert!(outer.now_or_never().is_some());
        assert_eq!(timer.pending_timers(), 0);
    }
}
