use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Identifies one scheduled timer. Handles are never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

/// The three one-shot timers a spin can have in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Nominal spin animation has finished
    SpinElapsed,
    /// Settle pause before the reveal has finished
    SettleElapsed,
    /// Celebration lifetime has run out
    CelebrationElapsed,
}

/// Deferred one-shot timer service.
///
/// A scheduler only arms and disarms timers; firing is reported back to the
/// coordinator by handle, which decides whether the timer is still current.
pub trait Scheduler {
    fn after(&mut self, delay: Duration, kind: TimerKind) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

/// Simulated clock. Nothing fires until [`ManualScheduler::pop_due`] is called.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_handle: u64,
    queue: BTreeMap<(Duration, u64), (TimerHandle, TimerKind)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Removes and returns the earliest timer due at or before `until`,
    /// moving the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerHandle, TimerKind)> {
        let (&(deadline, seq), _) = self.queue.iter().next()?;
        if deadline > until {
            return None;
        }
        let fired = self.queue.remove(&(deadline, seq))?;
        self.now = self.now.max(deadline);
        Some(fired)
    }

    /// Moves the clock forward without firing anything.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    fn after(&mut self, delay: Duration, kind: TimerKind) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.queue
            .insert((self.now + delay, self.next_handle), (handle, kind));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.queue.retain(|_, (h, _)| *h != handle);
    }
}
