//! Cancellable deferred tasks for coalescing bursts of input.
//!
//! A [`Debouncer`] owns at most one pending value. Scheduling replaces whatever was pending and
//! restarts the quiet period, so only the most recent value can ever fire. Time is passed in by
//! the caller rather than read from a clock, which lets an event loop drive it with
//! `poll(timeout)` and lets tests step through time without sleeping.

use std::time::{Duration, Instant};

#[derive(Debug)]
struct Pending<T> {
    value: T,
    due: Instant,
}

#[derive(Debug)]
/// Single-slot deferred task that fires once its input has been quiet for a fixed period.
pub struct Debouncer<T> {
    quiet_period: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    #[must_use]
    /// Creates a debouncer with nothing pending.
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    #[must_use]
    /// Length of the quiet period.
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Schedules `value` to fire one quiet period after `now`.
    ///
    /// Returns the value this call superseded, which will now never fire.
    pub fn schedule(&mut self, value: T, now: Instant) -> Option<T> {
        let due = now + self.quiet_period;
        self.pending
            .replace(Pending { value, due })
            .map(|superseded| superseded.value)
    }

    /// Drops the pending value without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    #[must_use]
    /// Whether a value is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    /// Time left before the pending value is due; zero once overdue, `None` when idle.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|pending| pending.due.saturating_duration_since(now))
    }

    /// Takes the pending value if its quiet period has elapsed by `now`.
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        if self.pending.as_ref().is_some_and(|pending| pending.due <= now) {
            self.cancel()
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/debounce.rs"]
mod tests;
