//! Shared server state

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tasks::LivenessSettings;

/// Counters reported by the status endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStats {
    pub open_connections: usize,
    pub sessions_started: u64,
    pub sessions_completed: u64,
}

/// State shared by every connection and the HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// Recurring tick period handed to every timer instance
    pub tick_period: Duration,
    /// Controller-side Ping/Pong watchdog settings
    pub liveness: LivenessSettings,
    pub stats: Arc<Mutex<ServerStats>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState with zeroed counters
    pub fn new(port: u16, host: String, tick_period: Duration, liveness: LivenessSettings) -> Self {
        Self {
            tick_period,
            liveness,
            stats: Arc::new(Mutex::new(ServerStats::default())),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Apply an update to the counters and remember the action that caused it
    pub fn update_stats<F>(&self, action: &str, updater: F) -> Result<ServerStats, String>
    where
        F: FnOnce(&mut ServerStats),
    {
        let mut stats = self.stats.lock()
            .map_err(|e| format!("Failed to lock server stats: {}", e))?;

        updater(&mut *stats);
        let new_stats = stats.clone();
        drop(stats);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        debug!("Stats after {}: {:?}", action, new_stats);
        Ok(new_stats)
    }

    pub fn connection_opened(&self) -> Result<ServerStats, String> {
        self.update_stats("connect", |stats| stats.open_connections += 1)
    }

    pub fn connection_closed(&self) -> Result<ServerStats, String> {
        self.update_stats("disconnect", |stats| {
            stats.open_connections = stats.open_connections.saturating_sub(1)
        })
    }

    pub fn session_started(&self) -> Result<ServerStats, String> {
        self.update_stats("start", |stats| stats.sessions_started += 1)
    }

    pub fn session_completed(&self) -> Result<ServerStats, String> {
        self.update_stats("complete", |stats| stats.sessions_completed += 1)
    }

    /// Get a copy of the current counters
    pub fn get_stats(&self) -> Result<ServerStats, String> {
        self.stats.lock()
            .map(|stats| stats.clone())
            .map_err(|e| format!("Failed to lock server stats: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

fn format_uptime(duration: Duration) -> String {
    let hours = duration.as_secs() / 3600;
    let minutes = (duration.as_secs() % 3600) / 60;
    let seconds = duration.as_secs() % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
