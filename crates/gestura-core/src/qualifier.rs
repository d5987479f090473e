#![forbid(unsafe_code)]

//! Click/tap counting that gates interpretation.
//!
//! A recognizer configured for `n` clicks only interprets motion once exactly
//! `n` qualifying presses were counted. Between presses the delayed-failure
//! timer bounds the wait: every press that leaves the count short re-arms it,
//! the press that completes the count disarms it.

use web_time::{Duration, Instant};

use crate::timer::FailureTimer;
use crate::trace;

/// Counts qualifying presses since the last reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickQualifier {
    required: u32,
    count: u32,
    max_interval: Duration,
}

impl ClickQualifier {
    /// Create a qualifier requiring `required` presses, each at most
    /// `max_interval` after the previous one.
    #[must_use]
    pub const fn new(required: u32, max_interval: Duration) -> Self {
        Self {
            required,
            count: 0,
            max_interval,
        }
    }

    /// Presses counted since the last reset.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Presses needed before interpretation.
    #[inline]
    #[must_use]
    pub const fn required(&self) -> u32 {
        self.required
    }

    /// Maximum gap allowed between qualifying presses.
    #[inline]
    #[must_use]
    pub const fn max_interval(&self) -> Duration {
        self.max_interval
    }

    /// Whether exactly the required number of presses was counted.
    #[inline]
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        self.count == self.required
    }

    /// Count a qualifying press and update the failure deadline.
    ///
    /// Returns the new count.
    pub fn register(&mut self, timer: &mut FailureTimer, now: Instant) -> u32 {
        self.count = self.count.saturating_add(1);
        if self.is_satisfied() {
            timer.cancel();
            trace!(count = self.count, "click sequence qualified");
        } else {
            self.await_next(timer, now);
        }
        self.count
    }

    /// Re-arm the failure deadline while waiting for the next press.
    pub fn await_next(&self, timer: &mut FailureTimer, now: Instant) {
        timer.schedule(now, self.max_interval);
        trace!(
            count = self.count,
            required = self.required,
            "awaiting next click"
        );
    }

    /// Forget all counted presses.
    pub fn reset(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(400);

    #[test]
    fn single_click_qualifies_immediately() {
        let t = Instant::now();
        let mut timer = FailureTimer::new();
        let mut q = ClickQualifier::new(1, INTERVAL);

        assert!(!q.is_satisfied());
        assert_eq!(q.register(&mut timer, t), 1);
        assert!(q.is_satisfied());
        assert!(!timer.is_pending());
    }

    #[test]
    fn short_count_arms_timer() {
        let t = Instant::now();
        let mut timer = FailureTimer::new();
        let mut q = ClickQualifier::new(2, INTERVAL);

        q.register(&mut timer, t);
        assert!(!q.is_satisfied());
        assert_eq!(timer.deadline(), Some(t + INTERVAL));
    }

    #[test]
    fn completing_count_cancels_timer() {
        let t = Instant::now();
        let mut timer = FailureTimer::new();
        let mut q = ClickQualifier::new(2, INTERVAL);

        q.register(&mut timer, t);
        q.register(&mut timer, t + Duration::from_millis(150));
        assert!(q.is_satisfied());
        assert!(!timer.is_pending());
    }

    #[test]
    fn overshooting_count_is_not_satisfied() {
        let t = Instant::now();
        let mut timer = FailureTimer::new();
        let mut q = ClickQualifier::new(2, INTERVAL);

        for _ in 0..3 {
            q.register(&mut timer, t);
        }
        assert_eq!(q.count(), 3);
        assert!(!q.is_satisfied());
        assert!(timer.is_pending());
    }

    #[test]
    fn await_next_moves_deadline() {
        let t = Instant::now();
        let later = t + Duration::from_millis(100);
        let mut timer = FailureTimer::new();
        let mut q = ClickQualifier::new(2, INTERVAL);

        q.register(&mut timer, t);
        q.await_next(&mut timer, later);
        assert_eq!(timer.deadline(), Some(later + INTERVAL));
    }

    #[test]
    fn reset_clears_count() {
        let t = Instant::now();
        let mut timer = FailureTimer::new();
        let mut q = ClickQualifier::new(3, INTERVAL);

        q.register(&mut timer, t);
        q.register(&mut timer, t);
        q.reset();
        assert_eq!(q.count(), 0);
        assert_eq!(q.required(), 3);
        assert_eq!(q.max_interval(), INTERVAL);
    }
}
