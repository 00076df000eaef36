//! Controller-facing API module
//! 
//! This module contains the HTTP endpoints, the WebSocket timer endpoint and
//! the stdio transport.

pub mod handlers;
pub mod responses;
pub mod stdio;
pub mod websocket;

use std::sync::Arc;
use axum::{
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
