//! Background tasks module
//! 
//! This module contains the countdown timer task, the liveness monitor used
//! to watch it, and the bridge that connects a timer to a transport.

pub mod bridge;
pub mod countdown_timer;
pub mod liveness;

// Re-export main types and functions
pub use bridge::{run_timer_bridge, BridgeExit};
pub use countdown_timer::{spawn_countdown_timer, CountdownTimer, TimerHandle, DEFAULT_TICK_PERIOD};
pub use liveness::{LivenessMonitor, LivenessSettings};
