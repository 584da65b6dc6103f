//! Deadline based debouncing of raw input.
//!
//! The debouncer never sleeps. Callers push raw values with the time they
//! arrived, ask for the pending deadline to schedule a wakeup, and poll once
//! it passes. Time is always passed in, so bursts can be replayed exactly.

use std::time::{Duration, Instant};

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(700);

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Coalesces a stream of values into the last one seen after a quiet period.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    settled: T,
    pending: Option<Pending<T>>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            settled: initial,
            pending: None,
        }
    }

    /// Record a raw value. Restarts the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// When the pending value settles, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Settle the pending value once its deadline has passed.
    ///
    /// Returns the new effective value only when it differs from the
    /// previous one.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        if pending.value == self.settled {
            return None;
        }
        self.settled = pending.value.clone();
        Some(pending.value)
    }

    /// The current effective value.
    pub fn settled(&self) -> &T {
        &self.settled
    }

    /// Drop the pending value without settling it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
