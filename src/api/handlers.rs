//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{ws::WebSocketUpgrade, State},
    http::StatusCode,
    response::{Json, Response},
};
use tracing::error;

use crate::state::AppState;
use super::{
    responses::{HealthResponse, StatusResponse},
    websocket::handle_socket,
};

/// Handle GET /ws - Upgrade to a WebSocket backed by its own timer
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle GET /status - Return current server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let stats = match state.get_stats() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get server stats: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        stats,
        tick_period_ms: u64::try_from(state.tick_period.as_millis()).unwrap_or(u64::MAX),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
