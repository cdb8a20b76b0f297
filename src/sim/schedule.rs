/// Explicit timers driven by caller-supplied `Instant`s.
///
/// Nothing here reads the clock on its own, so tests can step time by hand
/// and the main loop can poll both timers from one place.

use std::time::{Duration, Instant};

/// A cancelable repeating task. Fires at most once per `poll`.
#[derive(Clone, Debug)]
pub struct Interval {
    period: Duration,
    next_due: Option<Instant>,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Interval { period, next_due: None }
    }

    /// Arm (or re-arm) the interval. The first fire is one period after `now`.
    /// Re-arming replaces the previous schedule; there is only ever one.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Has a period elapsed? Missed periods are not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}

/// A cancelable one-shot deadline.
#[derive(Clone, Debug, Default)]
pub struct Timeout {
    due: Option<Instant>,
}

impl Timeout {
    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.due = Some(now + after);
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    /// True exactly once, on the first poll at or past the deadline.
    pub fn expired(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
