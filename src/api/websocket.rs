//! WebSocket transport: one timer per connection

use std::{future::ready, sync::Arc};
use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use crate::{state::AppState, tasks::run_timer_bridge};

/// Drive a dedicated timer from a WebSocket until either side goes away
pub async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    if let Err(e) = state.connection_opened() {
        warn!("Failed to record new connection: {}", e);
    }
    info!("Timer connection opened");

    let (sink, stream) = socket.split();

    // Text frames carry controller messages; a close frame or error ends the stream
    let inbound = stream
        .take_while(|frame| ready(matches!(frame, Ok(message) if !matches!(message, Message::Close(_)))))
        .filter_map(|frame| ready(match frame {
            Ok(Message::Text(text)) => Some(text),
            _ => None,
        }));
    let outbound = sink.with(|json: String| ready(Ok::<_, axum::Error>(Message::Text(json))));

    let exit = run_timer_bridge(Arc::clone(&state), inbound, outbound, false).await;

    if let Err(e) = state.connection_closed() {
        warn!("Failed to record closed connection: {}", e);
    }
    info!("Timer connection closed ({:?})", exit);
}
