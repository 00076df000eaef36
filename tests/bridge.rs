use std::{sync::Arc, time::Duration};
use futures::{channel::mpsc, StreamExt};
use tokio::time::sleep;

use countdown_worker::{
    state::AppState,
    tasks::{run_timer_bridge, BridgeExit, LivenessSettings, DEFAULT_TICK_PERIOD},
    TimerEvent,
};

fn app_state(liveness: LivenessSettings) -> Arc<AppState> {
    Arc::new(AppState::new(0, "127.0.0.1".to_string(), DEFAULT_TICK_PERIOD, liveness))
}

fn parse(json: &str) -> TimerEvent {
    serde_json::from_str(json).unwrap()
}

fn drain(outbound: &mut mpsc::UnboundedReceiver<String>) -> Vec<TimerEvent> {
    let mut events = Vec::new();
    while let Ok(Some(json)) = outbound.try_next() {
        events.push(parse(&json));
    }
    events
}

#[tokio::test(start_paused = true)]
async fn forwards_commands_and_events_as_json() {
    let state = app_state(LivenessSettings::default());
    let (inbound_tx, inbound_rx) = mpsc::unbounded::<String>();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded::<String>();

    let bridge = tokio::spawn(run_timer_bridge(Arc::clone(&state), inbound_rx, outbound_tx, false));

    inbound_tx.unbounded_send(r#"{"type":"START","duration":1}"#.to_string()).unwrap();

    let mut events = Vec::new();
    while let Some(json) = outbound_rx.next().await {
        let event = parse(&json);
        events.push(event);
        if event == TimerEvent::Complete {
            break;
        }
    }

    assert_eq!(events.first(), Some(&TimerEvent::Tick { remaining: 1 }));
    assert_eq!(events.iter().filter(|e| **e == TimerEvent::Complete).count(), 1);

    drop(inbound_tx);
    assert_eq!(bridge.await.unwrap(), BridgeExit::InboundClosed);

    let stats = state.get_stats().unwrap();
    assert_eq!(stats.sessions_started, 1);
    assert_eq!(stats.sessions_completed, 1);
}

#[tokio::test(start_paused = true)]
async fn closed_inbound_lets_running_session_finish_when_asked() {
    let state = app_state(LivenessSettings::default());
    let (inbound_tx, inbound_rx) = mpsc::unbounded::<String>();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded::<String>();

    inbound_tx.unbounded_send(r#"{"type":"START","duration":2}"#.to_string()).unwrap();
    drop(inbound_tx);

    let exit = run_timer_bridge(state, inbound_rx, outbound_tx, true).await;
    assert_eq!(exit, BridgeExit::InboundClosed);

    let events = drain(&mut outbound_rx);
    assert_eq!(events.first(), Some(&TimerEvent::Tick { remaining: 2 }));
    assert_eq!(events.last(), Some(&TimerEvent::Complete));
}

#[tokio::test(start_paused = true)]
async fn closed_inbound_exits_immediately_when_idle() {
    let state = app_state(LivenessSettings::default());
    let (inbound_tx, inbound_rx) = mpsc::unbounded::<String>();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded::<String>();

    inbound_tx.unbounded_send(r#"{"type":"START","duration":30}"#.to_string()).unwrap();
    inbound_tx.unbounded_send(r#"{"type":"STOP"}"#.to_string()).unwrap();
    drop(inbound_tx);

    let exit = run_timer_bridge(state, inbound_rx, outbound_tx, true).await;
    assert_eq!(exit, BridgeExit::InboundClosed);

    let events = drain(&mut outbound_rx);
    assert_eq!(events.first(), Some(&TimerEvent::Tick { remaining: 30 }));
    assert!(!events.contains(&TimerEvent::Complete));
}

#[tokio::test(start_paused = true)]
async fn commands_queued_before_close_still_report() {
    let state = app_state(LivenessSettings::default());
    let (inbound_tx, inbound_rx) = mpsc::unbounded::<String>();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded::<String>();

    inbound_tx.unbounded_send(r#"{"type":"PING"}"#.to_string()).unwrap();
    inbound_tx.unbounded_send(r#"{"type":"START","duration":30}"#.to_string()).unwrap();
    drop(inbound_tx);

    let exit = run_timer_bridge(state, inbound_rx, outbound_tx, false).await;
    assert_eq!(exit, BridgeExit::InboundClosed);
    assert_eq!(
        drain(&mut outbound_rx),
        vec![TimerEvent::Pong, TimerEvent::Tick { remaining: 30 }]
    );
}

#[tokio::test(start_paused = true)]
async fn liveness_probes_are_not_forwarded() {
    let state = app_state(LivenessSettings {
        interval: Duration::from_secs(1),
        timeout: Duration::from_secs(3),
    });
    let (inbound_tx, inbound_rx) = mpsc::unbounded::<String>();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded::<String>();

    let bridge = tokio::spawn(run_timer_bridge(state, inbound_rx, outbound_tx, false));

    sleep(Duration::from_millis(5500)).await;
    assert!(drain(&mut outbound_rx).is_empty());

    inbound_tx.unbounded_send(r#"{"type":"PING"}"#.to_string()).unwrap();
    sleep(Duration::from_secs(3)).await;
    assert_eq!(drain(&mut outbound_rx), vec![TimerEvent::Pong]);

    drop(inbound_tx);
    assert_eq!(bridge.await.unwrap(), BridgeExit::InboundClosed);
}

#[tokio::test(start_paused = true)]
async fn malformed_messages_are_ignored() {
    let state = app_state(LivenessSettings::default());
    let (inbound_tx, inbound_rx) = mpsc::unbounded::<String>();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded::<String>();

    let bridge = tokio::spawn(run_timer_bridge(state, inbound_rx, outbound_tx, false));

    for line in ["garbage", r#"{"type":"PAUSE"}"#, r#"{"type":"START","duration":-4}"#, r#"{"type":"PING"}"#] {
        inbound_tx.unbounded_send(line.to_string()).unwrap();
    }
    sleep(Duration::from_millis(500)).await;

    assert_eq!(drain(&mut outbound_rx), vec![TimerEvent::Pong]);

    drop(inbound_tx);
    assert_eq!(bridge.await.unwrap(), BridgeExit::InboundClosed);
}

#[tokio::test(start_paused = true)]
async fn dropped_outbound_ends_the_bridge() {
    let state = app_state(LivenessSettings::default());
    let (inbound_tx, inbound_rx) = mpsc::unbounded::<String>();
    let (outbound_tx, outbound_rx) = mpsc::unbounded::<String>();
    drop(outbound_rx);

    inbound_tx.unbounded_send(r#"{"type":"START","duration":5}"#.to_string()).unwrap();

    let exit = run_timer_bridge(state, inbound_rx, outbound_tx, false).await;
    assert_eq!(exit, BridgeExit::OutboundClosed);
}
