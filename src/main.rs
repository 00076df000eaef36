//! Countdown Worker - an isolated, message-driven countdown timer
//! 
//! This is the main entry point for the countdown-worker application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_worker::{
    api::{create_router, stdio::run_stdio},
    config::Config,
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdio mode keeps stdout for timer events
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_worker={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting countdown-worker v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: tick={}ms, liveness every {}s (timeout {}s)",
          config.tick_ms, config.liveness_interval, config.liveness_timeout);

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.tick_period(),
        config.liveness(),
    ));

    if config.stdio {
        tokio::select! {
            exit = run_stdio(state) => {
                info!("Stdio timer finished: {:?}", exit);
            }
            _ = shutdown_signal() => {
                info!("Shutdown signal received");
            }
        }
        // Exit without dropping the runtime: a pending blocking stdin read would
        // hold it open. Skipping destructors is deliberate; logs are written to
        // stderr unbuffered, so nothing is left to flush.
        std::process::exit(0);
    }

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET /ws     - WebSocket countdown timer (START/STOP/PING)");
    info!("  GET /status - Connection and session counters");
    info!("  GET /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
