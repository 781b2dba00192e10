use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use shooter_core::capture::capture;
use shooter_core::constants::CAPTURE_MAX_WIDTH;
use shooter_core::hint::{fallback_hint, HintDebug, HintRequest, HintResult};
use shooter_core::render::render;
use shooter_core::Game;

use crate::autoplay::Autoplay;
use crate::hint_client::HintSource;

pub const TICK: Duration = Duration::from_millis(16);
pub const FIRST_CAPTURE_DELAY: Duration = Duration::from_millis(1000);
pub const CAPTURE_CADENCE: Duration = Duration::from_secs(10);
pub const HINT_DEADLINE: Duration = Duration::from_secs(6);

const THINKING_MESSAGE: &str = "Analyzing tactical options...";
const INITIAL_MESSAGE: &str = "Initializing...";

/// One strategic-hint cycle. A capture can only start from `Idle`, so a
/// second request while one is outstanding is structurally impossible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintCycle {
    Idle,
    Capturing,
    AwaitingHint,
    Displaying,
}

/// The player-visible strings, overwritten once per display cycle.
#[derive(Clone, Debug)]
pub struct DisplayState {
    pub message: Option<String>,
    pub rationale: Option<String>,
    pub debug: Option<HintDebug>,
}

impl DisplayState {
    fn new() -> Self {
        Self {
            message: Some(INITIAL_MESSAGE.to_string()),
            rationale: None,
            debug: None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct OrchestratorConfig {
    pub first_capture_delay: Duration,
    pub capture_cadence: Duration,
    pub hint_deadline: Duration,
    pub autoplay_seed: u32,
    pub autoplay: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            first_capture_delay: FIRST_CAPTURE_DELAY,
            capture_cadence: CAPTURE_CADENCE,
            hint_deadline: HINT_DEADLINE,
            autoplay_seed: 0xDEAD_BEEF,
            autoplay: true,
        }
    }
}

type PendingHint = Pin<Box<dyn Future<Output = HintResult> + Send>>;

/// Owns the game, the render surface, and the hint cycle. Rendering runs on
/// every tick regardless of cycle state; the hint pipeline is single-flight.
pub struct Orchestrator<S> {
    game: Game,
    source: Arc<S>,
    config: OrchestratorConfig,
    cycle: HintCycle,
    capture_armed: bool,
    capture_at: Instant,
    autoplay: Autoplay,
    display: DisplayState,
    cycles_completed: u64,
    ticks: u64,
}

impl<S: HintSource> Orchestrator<S> {
    pub fn new(game: Game, source: S, config: OrchestratorConfig) -> Self {
        Self {
            game,
            source: Arc::new(source),
            cycle: HintCycle::Idle,
            capture_armed: false,
            capture_at: Instant::now() + config.first_capture_delay,
            autoplay: Autoplay::new(config.autoplay_seed),
            display: DisplayState::new(),
            cycles_completed: 0,
            ticks: 0,
            config,
        }
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn cycle(&self) -> HintCycle {
        self.cycle
    }

    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn is_thinking(&self) -> bool {
        self.cycle == HintCycle::AwaitingHint
    }

    /// Drives the session for `max_ticks` ticks (0 = until interrupted).
    pub async fn run(&mut self, max_ticks: u64) {
        let mut ticker = tokio::time::interval(TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut pending: Option<PendingHint> = None;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Some(request) = self.on_tick(Instant::now()) {
                        pending = Some(self.start_cycle(request));
                    }
                    if max_ticks > 0 && self.ticks >= max_ticks {
                        break;
                    }
                }
                result = poll_pending(&mut pending) => {
                    pending = None;
                    self.apply_result(result);
                }
            }
        }
    }

    /// Advances one animation tick. Returns a request when a capture cycle
    /// starts on this tick.
    fn on_tick(&mut self, now: Instant) -> Option<HintRequest> {
        self.ticks += 1;

        if self.config.autoplay && !self.game.is_flying() {
            if let Some(drag) = self.autoplay.next_drag(self.ticks) {
                self.game.launch(drag);
            }
        }
        self.game.step();

        let snapshot = self.game.snapshot();
        // Rendering is decoupled from the hint cycle: the surface is redrawn
        // on every tick whether or not a capture happens.
        let surface = render(&snapshot);

        if self.cycle == HintCycle::Displaying {
            self.cycle = HintCycle::Idle;
            self.capture_at = now + self.config.capture_cadence;
        }

        if !self.capture_armed && now >= self.capture_at {
            self.capture_armed = true;
        }

        if self.capture_armed && self.cycle == HintCycle::Idle {
            self.capture_armed = false;
            self.cycle = HintCycle::Capturing;

            let Some(frame) = capture(&surface, CAPTURE_MAX_WIDTH) else {
                // Dead surface: skip this cycle and try again at the cadence.
                self.cycle = HintCycle::Idle;
                self.capture_at = now + self.config.capture_cadence;
                return None;
            };

            let request = HintRequest::new(&frame, &snapshot);
            self.display.message = Some(THINKING_MESSAGE.to_string());
            self.display.rationale = None;
            self.cycle = HintCycle::AwaitingHint;
            tracing::debug!(
                tick = self.ticks,
                frame_bytes = frame.jpeg.len(),
                "capture cycle started"
            );
            return Some(request);
        }

        None
    }

    /// Races the hint request against the orchestrator deadline. If the
    /// deadline fires first, the loser is detached so its eventual result
    /// can only be logged and discarded, never applied.
    fn start_cycle(&self, request: HintRequest) -> PendingHint {
        let source = Arc::clone(&self.source);
        let deadline = self.config.hint_deadline;

        Box::pin(async move {
            let mut call = Box::pin(async move { source.request_hint(request).await });
            tokio::select! {
                result = &mut call => result,
                _ = tokio::time::sleep(deadline) => {
                    tokio::spawn(async move {
                        let late = call.await;
                        tracing::warn!(
                            message = %late.hint.message,
                            "hint resolved after the deadline and was discarded"
                        );
                    });
                    tracing::warn!(
                        deadline_ms = deadline.as_millis() as u64,
                        "hint cycle deadline exceeded, engaging fallback"
                    );
                    fallback_hint()
                }
            }
        })
    }

    fn apply_result(&mut self, result: HintResult) {
        debug_assert_eq!(self.cycle, HintCycle::AwaitingHint);
        tracing::info!(
            hint = %result.hint.message,
            latency_ms = result.debug.latency,
            fallback = result.debug.error.is_some(),
            "hint displayed"
        );
        self.display.message = Some(result.hint.message.clone());
        self.display.rationale = result.hint.rationale.clone();
        self.display.debug = Some(result.debug);
        self.cycle = HintCycle::Displaying;
        self.cycles_completed += 1;
    }
}

/// Resolves the pending hint when there is one; otherwise parks forever so
/// the tick branch keeps the loop alive.
async fn poll_pending(pending: &mut Option<PendingHint>) -> HintResult {
    match pending.as_mut() {
        Some(fut) => fut.await,
        None => std::future::pending().await,
    }
}
