//! Countdown timer background task
//!
//! Each timer runs as its own tokio task and owns at most one session. The
//! controller drives it through a [`TimerHandle`] and reads [`TimerEvent`]s
//! from the paired receiver; neither side ever waits on the other.

use std::{future::pending, time::Duration};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{
    protocol::{ControllerMessage, TimerEvent},
    state::TimerSession,
};

/// Cadence of progress reports while a session is running
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(100);

/// A session together with the recurring tick that drives it.
///
/// Dropping this value cancels the tick.
#[derive(Debug)]
struct RunningSession {
    session: TimerSession,
    ticker: Interval,
}

/// Countdown timer owning a single optional session
#[derive(Debug)]
pub struct CountdownTimer {
    tick_period: Duration,
    running: Option<RunningSession>,
    events: mpsc::UnboundedSender<TimerEvent>,
}

impl CountdownTimer {
    /// Create an idle timer that reports on `events`
    pub fn new(tick_period: Duration, events: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            tick_period,
            running: None,
            events,
        }
    }

    /// Apply one controller message
    pub fn handle(&mut self, message: ControllerMessage) {
        match message {
            ControllerMessage::Start { duration } => self.start(duration),
            ControllerMessage::Stop => self.stop(),
            ControllerMessage::Ping => self.emit(TimerEvent::Pong),
        }
    }

    /// Begin a new session, discarding any running one
    pub fn start(&mut self, duration_seconds: u64) {
        if self.running.take().is_some() {
            debug!("Replacing running countdown session");
        }

        let now = Instant::now();
        let mut ticker = interval_at(now + self.tick_period, self.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let session = TimerSession::new(now, duration_seconds);
        info!("Countdown started for {}s", session.duration_seconds());
        self.running = Some(RunningSession { session, ticker });

        self.emit(TimerEvent::Tick { remaining: duration_seconds });
    }

    /// Cancel the running session. No-op when idle.
    pub fn stop(&mut self) {
        match self.running.take() {
            Some(running) => info!(
                "Countdown stopped with {}s left",
                running.session.remaining_at(Instant::now())
            ),
            None => debug!("Stop received while idle"),
        }
    }

    /// Report progress for the running session at the current instant
    pub fn on_tick(&mut self) {
        self.on_tick_at(Instant::now());
    }

    fn on_tick_at(&mut self, now: Instant) {
        let Some(running) = &self.running else {
            return;
        };

        let remaining = running.session.remaining_at(now);
        self.emit(TimerEvent::Tick { remaining });

        if remaining == 0 {
            self.running = None;
            info!("Countdown complete");
            self.emit(TimerEvent::Complete);
        }
    }

    fn emit(&self, event: TimerEvent) {
        if let Err(e) = self.events.send(event) {
            debug!("Controller is gone, dropping {:?}", e.0);
        }
    }

    /// Process commands until every [`TimerHandle`] has been dropped
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<ControllerMessage>) {
        debug!("Countdown timer task running");

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(message) => self.handle(message),
                    None => break,
                },
                _ = next_tick(&mut self.running) => self.on_tick(),
            }
        }

        debug!("Countdown timer task finished");
    }
}

/// Resolves on the next recurring tick, or never when idle
async fn next_tick(running: &mut Option<RunningSession>) -> Instant {
    match running {
        Some(running) => running.ticker.tick().await,
        None => pending().await,
    }
}

/// Controller-side handle to a timer task.
///
/// Every method is fire-and-forget; results arrive as [`TimerEvent`]s.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    commands: mpsc::UnboundedSender<ControllerMessage>,
}

impl TimerHandle {
    /// Queue any controller message for the timer
    pub fn send(&self, message: ControllerMessage) -> Result<(), String> {
        self.commands
            .send(message)
            .map_err(|e| format!("Timer task is not running, dropped {:?}", e.0))
    }

    /// Queue a START for a session of `duration_seconds`
    pub fn start(&self, duration_seconds: u64) -> Result<(), String> {
        self.send(ControllerMessage::Start { duration: duration_seconds })
    }

    /// Queue a STOP
    pub fn stop(&self) -> Result<(), String> {
        self.send(ControllerMessage::Stop)
    }

    /// Queue a PING; the timer answers with a PONG event
    pub fn ping(&self) -> Result<(), String> {
        self.send(ControllerMessage::Ping)
    }
}

/// Spawn an isolated timer task.
///
/// The task exits once the returned handle and all its clones are dropped.
pub fn spawn_countdown_timer(
    tick_period: Duration,
) -> (TimerHandle, mpsc::UnboundedReceiver<TimerEvent>, JoinHandle<()>) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let timer = CountdownTimer::new(tick_period, event_tx);
    let task = tokio::spawn(timer.run(command_rx));

    (TimerHandle { commands: command_tx }, event_rx, task)
}
