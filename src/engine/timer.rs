//! One-shot timer abstraction driving playback ticks.
//!
//! The playback controller never sleeps. It asks a [`Scheduler`] to fire once
//! after a delay and the host calls `PlaybackController::tick` when that
//! happens. In the terminal UI the host is the crossterm poll loop, which uses
//! [`DeadlineTimer`] to know how long it may block.

use std::time::{Duration, Instant};

pub trait Scheduler {
    /// Arrange for exactly one tick after `delay`.
    ///
    /// Callers must `cancel` first if a tick is already pending.
    fn schedule(&mut self, delay: Duration);

    /// Drop any pending tick. No-op when nothing is scheduled.
    fn cancel(&mut self);

    fn is_scheduled(&self) -> bool;
}

/// Deadline-based timer polled by an event loop.
#[derive(Debug, Default)]
pub struct DeadlineTimer {
    deadline: Option<Instant>,
}

impl DeadlineTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Time left until the pending tick, or `None` when nothing is scheduled.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

impl Scheduler for DeadlineTimer {
    fn schedule(&mut self, delay: Duration) {
        debug_assert!(self.deadline.is_none(), "timer armed twice");
        self.deadline = Some(Instant::now() + delay);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn is_scheduled(&self) -> bool {
        self.deadline.is_some()
    }
}
