//! Controller-side Ping/Pong liveness monitor

use std::{collections::VecDeque, time::Duration};
use tokio::time::Instant;

/// How often to probe a timer and how long to wait for its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivenessSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for LivenessSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(15),
        }
    }
}

/// Tracks probes sent to a timer that have not been answered yet.
///
/// A PONG always answers the oldest outstanding probe. PONGs that arrive
/// with nothing outstanding belong to whoever else pinged the timer.
#[derive(Debug, Default)]
pub struct LivenessMonitor {
    outstanding: VecDeque<Instant>,
}

impl LivenessMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a probe sent at `at`
    pub fn probe_sent(&mut self, at: Instant) {
        self.outstanding.push_back(at);
    }

    /// Record a PONG. Returns true when it answered one of our probes.
    pub fn pong_received(&mut self) -> bool {
        self.outstanding.pop_front().is_some()
    }

    /// Number of probes still waiting for a PONG
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    /// The timer is unresponsive once its oldest probe has waited `timeout`
    pub fn is_unresponsive(&self, now: Instant, timeout: Duration) -> bool {
        self.outstanding
            .front()
            .map(|sent| now.saturating_duration_since(*sent) >= timeout)
            .unwrap_or(false)
    }
}
