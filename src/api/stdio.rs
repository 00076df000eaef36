//! Stdio transport: newline-delimited JSON on stdin/stdout

use std::sync::Arc;
use futures::{sink, stream};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::{
    state::AppState,
    tasks::{run_timer_bridge, BridgeExit},
};

/// Run a single timer driven by stdin, reporting events on stdout.
///
/// EOF on stdin lets a running session finish before returning.
pub async fn run_stdio(state: Arc<AppState>) -> BridgeExit {
    info!("Reading timer commands from stdin");

    let lines = BufReader::new(io::stdin()).lines();
    let inbound = stream::unfold(lines, |mut lines| async move {
        match lines.next_line().await {
            Ok(Some(line)) => Some((line, lines)),
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                None
            }
        }
    });

    let outbound = sink::unfold(io::stdout(), |mut stdout, json: String| async move {
        stdout.write_all(json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok::<_, io::Error>(stdout)
    });

    run_timer_bridge(state, inbound, outbound, true).await
}
