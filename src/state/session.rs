//! Countdown session bookkeeping

use std::time::Duration;
use tokio::time::Instant;

/// One countdown run, from Start until Stop or completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSession {
    pub start_time: Instant,
    /// Length of the session; the target is `start_time + duration`
    pub duration: Duration,
}

impl TimerSession {
    /// Create a session that ends `duration_seconds` after `start_time`
    pub fn new(start_time: Instant, duration_seconds: u64) -> Self {
        Self {
            start_time,
            duration: Duration::from_secs(duration_seconds),
        }
    }

    /// The instant the session completes, if it is representable
    pub fn target_time(&self) -> Option<Instant> {
        self.start_time.checked_add(self.duration)
    }

    /// Whole seconds left at `now`, rounded up and floored at zero.
    ///
    /// Always derived from the absolute start so late ticks cannot drift.
    /// Works on durations, so lengths past the clock's range never overflow.
    pub fn remaining_at(&self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.start_time);
        let left = self.duration.saturating_sub(elapsed);
        let seconds = (left.as_millis() + 999) / 1000;
        u64::try_from(seconds).unwrap_or(u64::MAX)
    }

    /// Total length of the session in whole seconds
    pub fn duration_seconds(&self) -> u64 {
        self.duration.as_secs()
    }
}
