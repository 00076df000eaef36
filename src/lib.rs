//! Countdown Worker - an isolated, message-driven countdown timer
//! 
//! This library runs wall-clock-accurate countdown timers as independent
//! tasks driven by START/STOP/PING messages, and exposes them over a
//! WebSocket endpoint or stdin/stdout.

pub mod config;
pub mod protocol;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use protocol::{ControllerMessage, TimerEvent};
pub use state::AppState;
pub use api::create_router;
pub use tasks::{spawn_countdown_timer, TimerHandle};
pub use utils::signals::shutdown_signal;
