#![forbid(unsafe_code)]

//! Cancellable one-shot deadline used for delayed failure.
//!
//! The timer never runs on its own: it stores a deadline on a monotonic
//! clock and the owner polls it with [`FailureTimer::expire`] whenever time
//! may have passed (on every input event and on every tick of the event
//! loop). Because cancellation simply clears the deadline, a cancel issued
//! before the deadline always suppresses the firing.
//!
//! # Invariants
//!
//! 1. At most one deadline is pending; `schedule` replaces any previous one.
//! 2. `expire` reports a given deadline at most once.
//! 3. `cancel` on an idle timer is a no-op.
//! 4. A deadline past the end of the clock is never pending.

use web_time::{Duration, Instant};

/// A single pending failure deadline, owned by one recognizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailureTimer {
    deadline: Option<Instant>,
}

impl FailureTimer {
    /// Create an idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm the timer to fire `delay` after `now`, replacing any pending deadline.
    ///
    /// Returns the new deadline, or `None` when `now + delay` cannot be
    /// represented; the timer is then left idle and never fires.
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> Option<Instant> {
        self.deadline = now.checked_add(delay);
        self.deadline
    }

    /// Disarm the timer. Returns whether a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Whether a deadline is pending.
    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if any.
    #[inline]
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fire the timer if its deadline has been reached.
    ///
    /// Clears the deadline before returning `true`, so each schedule fires
    /// at most once.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
