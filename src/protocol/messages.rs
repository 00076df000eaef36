//! Controller and timer message types

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Commands sent from the controller to a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControllerMessage {
    /// Begin a new countdown session, replacing any running one
    Start { duration: u64 },
    /// Cancel the running session, if any
    Stop,
    /// Liveness probe, always answered with a PONG
    Ping,
}

impl ControllerMessage {
    /// Parse a controller message from JSON text.
    ///
    /// Malformed payloads and unrecognized `type` values yield `None`; the
    /// timer silently ignores them.
    pub fn parse(text: &str) -> Option<Self> {
        match serde_json::from_str(text) {
            Ok(message) => Some(message),
            Err(e) => {
                debug!("Ignoring malformed controller message {:?}: {}", text, e);
                None
            }
        }
    }
}

/// Events emitted by a timer back to its controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimerEvent {
    /// Progress report with whole seconds left
    Tick { remaining: u64 },
    /// The session reached zero
    Complete,
    /// Answer to a PING
    Pong,
}

impl TimerEvent {
    /// Serialize the event as a single-line JSON object
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
