//! Bridge between a text transport and one countdown timer
//!
//! Inbound lines are parsed as controller messages and forwarded to a
//! freshly spawned timer; timer events are written back as JSON. The bridge
//! also probes the timer periodically and gives up on it when a probe goes
//! unanswered for too long.

use std::{fmt::Display, pin::Pin, sync::Arc};
use futures::{pin_mut, Sink, SinkExt, Stream, StreamExt};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::{
    protocol::{ControllerMessage, TimerEvent},
    state::AppState,
};
use super::{spawn_countdown_timer, LivenessMonitor};

/// Why a bridge stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeExit {
    /// The controller closed its side
    InboundClosed,
    /// Events could no longer be delivered
    OutboundClosed,
    /// A liveness probe went unanswered past the timeout
    Unresponsive,
    /// The timer task ended on its own
    TimerGone,
}

/// Run one timer for the lifetime of a transport.
///
/// With `finish_running_session` set, closing the inbound side lets a running
/// session count down to COMPLETE (or be stopped) before the bridge exits;
/// otherwise the bridge exits as soon as the inbound side closes. Either way,
/// commands already forwarded are processed and their events delivered.
pub async fn run_timer_bridge<I, O>(
    state: Arc<AppState>,
    inbound: I,
    outbound: O,
    finish_running_session: bool,
) -> BridgeExit
where
    I: Stream<Item = String>,
    O: Sink<String>,
    O::Error: Display,
{
    pin_mut!(inbound);
    pin_mut!(outbound);

    let (handle, mut events, timer_task) = spawn_countdown_timer(state.tick_period);
    let settings = state.liveness;
    let mut monitor = LivenessMonitor::new();
    let mut probe = interval_at(Instant::now() + settings.interval, settings.interval);
    probe.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut inbound_open = true;
    let mut session_running = false;

    let exit = loop {
        tokio::select! {
            line = inbound.next(), if inbound_open => match line {
                Some(text) => {
                    let Some(message) = ControllerMessage::parse(&text) else {
                        continue;
                    };
                    match message {
                        ControllerMessage::Start { .. } => {
                            session_running = true;
                            if let Err(e) = state.session_started() {
                                warn!("Failed to record session start: {}", e);
                            }
                        }
                        ControllerMessage::Stop => session_running = false,
                        ControllerMessage::Ping => {}
                    }
                    if let Err(e) = handle.send(message) {
                        error!("Failed to forward controller message: {}", e);
                        break BridgeExit::TimerGone;
                    }
                }
                None => {
                    if finish_running_session && session_running {
                        debug!("Inbound closed, letting the running session finish");
                        inbound_open = false;
                    } else {
                        break BridgeExit::InboundClosed;
                    }
                }
            },

            event = events.recv() => {
                let Some(event) = event else {
                    break BridgeExit::TimerGone;
                };
                if event == TimerEvent::Complete {
                    session_running = false;
                }
                if let Err(e) = forward_event(&state, &mut monitor, &mut outbound, event).await {
                    warn!("{}", e);
                    break BridgeExit::OutboundClosed;
                }
                if !inbound_open && !session_running {
                    break BridgeExit::InboundClosed;
                }
            },

            _ = probe.tick() => {
                let now = Instant::now();
                if monitor.is_unresponsive(now, settings.timeout) {
                    warn!(
                        "Timer did not answer {} liveness probe(s) within {:?}",
                        monitor.outstanding(),
                        settings.timeout
                    );
                    break BridgeExit::Unresponsive;
                }
                monitor.probe_sent(now);
                if let Err(e) = handle.ping() {
                    error!("Failed to send liveness probe: {}", e);
                    break BridgeExit::TimerGone;
                }
            },
        }
    };

    // The timer exits once its queued commands are processed and the handle is gone
    drop(handle);

    if exit == BridgeExit::InboundClosed {
        while let Some(event) = events.recv().await {
            if let Err(e) = forward_event(&state, &mut monitor, &mut outbound, event).await {
                warn!("{}", e);
                break;
            }
        }
    } else {
        timer_task.abort();
    }

    info!("Timer bridge closed: {:?}", exit);
    exit
}

/// Deliver one timer event, swallowing PONGs that answer our own probes
async fn forward_event<O>(
    state: &AppState,
    monitor: &mut LivenessMonitor,
    outbound: &mut Pin<&mut O>,
    event: TimerEvent,
) -> Result<(), String>
where
    O: Sink<String>,
    O::Error: Display,
{
    if event == TimerEvent::Pong && monitor.pong_received() {
        debug!("Liveness probe answered");
        return Ok(());
    }
    if event == TimerEvent::Complete {
        if let Err(e) = state.session_completed() {
            warn!("Failed to record session completion: {}", e);
        }
    }
    outbound
        .send(event.to_json())
        .await
        .map_err(|e| format!("Failed to deliver timer event: {}", e))
}
