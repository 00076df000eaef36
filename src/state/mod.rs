//! State management module
//! 
//! This module contains the countdown session and the shared server state.

pub mod session;
pub mod app_state;

// Re-export main types
pub use session::TimerSession;
pub use app_state::{AppState, ServerStats};
