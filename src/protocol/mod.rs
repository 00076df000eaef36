//! Message protocol module
//! 
//! This module contains the JSON messages exchanged between a controller and
//! a countdown timer.

pub mod messages;

// Re-export main types
pub use messages::{ControllerMessage, TimerEvent};
