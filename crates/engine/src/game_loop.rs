//! Fixed-cadence game loop.
//!
//! Each tick: drain input, spawn if needed, apply gravity, hand a snapshot to
//! the frontend, sleep. The session is owned here and touched by no other
//! thread; the only shared state is the input queue and the exit flag.

use std::thread;
use std::time::Instant;

use anyhow::Result;
use tracing::{info, trace, warn};

use crate::config::EngineConfig;
use crate::core::{GameSession, MoveOutcome, RenderSnapshot};
use crate::queue::{ExitFlag, InputQueue};
use crate::types::GameAction;

/// Where snapshots and the game-over notice go.
///
/// Implemented by the terminal renderer; tests use in-memory recorders.
pub trait Frontend {
    /// Draw one tick's snapshot.
    fn render(&mut self, snapshot: &RenderSnapshot) -> Result<()>;

    /// Show the game-over notice. The loop then waits for an acknowledgment.
    fn game_over(&mut self) -> Result<()>;
}

/// How a call to [`GameLoop::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The exit flag was raised while playing.
    Quit,
    /// The game ended and the player acknowledged it.
    GameOver,
}

/// What a single tick did, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub actions_applied: usize,
    pub spawned: bool,
    pub gravity_applied: bool,
    pub lines_cleared: usize,
}

pub struct GameLoop {
    session: GameSession,
    config: EngineConfig,
    exit: ExitFlag,
    snapshot: RenderSnapshot,
    pending: Vec<GameAction>,
    last_gravity: Instant,
}

impl GameLoop {
    pub fn new(session: GameSession, config: EngineConfig, exit: ExitFlag) -> Self {
        Self {
            session,
            config,
            exit,
            snapshot: RenderSnapshot::default(),
            pending: Vec::with_capacity(16),
            last_gravity: Instant::now(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Play until the exit flag is raised or the game ends and is acknowledged.
    ///
    /// A `Restart` acknowledgment clears the board and keeps playing. Losing
    /// the input producer counts as a quit.
    pub fn run(&mut self, queue: &mut InputQueue, frontend: &mut impl Frontend) -> Result<SessionOutcome> {
        info!(
            gravity_ms = self.config.gravity.as_millis() as u64,
            frame_ms = self.config.frame.as_millis() as u64,
            "session started"
        );
        self.last_gravity = Instant::now();

        loop {
            if self.exit.is_raised() {
                info!(pieces = self.session.pieces_spawned(), "quit");
                return Ok(SessionOutcome::Quit);
            }
            if queue.is_disconnected() {
                warn!(pieces = self.session.pieces_spawned(), "input closed");
                self.exit.raise();
                return Ok(SessionOutcome::Quit);
            }

            self.tick(queue, Instant::now());

            self.session.snapshot_into(&mut self.snapshot);
            frontend.render(&self.snapshot)?;
            thread::sleep(self.config.frame);

            if self.session.game_over() {
                info!(pieces = self.session.pieces_spawned(), "game over");
                frontend.game_over()?;

                if self.wait_for_ack(queue) == Some(GameAction::Restart) {
                    self.restart();
                    continue;
                }
                return Ok(SessionOutcome::GameOver);
            }
        }
    }

    /// One tick of game logic at time `now`, without rendering or sleeping.
    pub fn tick(&mut self, queue: &mut InputQueue, now: Instant) -> TickReport {
        let mut report = TickReport::default();

        self.pending.clear();
        let drained = queue.drain_into(&mut self.pending);
        for &action in &self.pending {
            if action == GameAction::Quit {
                self.exit.raise();
                continue;
            }
            if action.is_movement() && self.session.apply_action(action) {
                report.actions_applied += 1;
            }
        }

        if self.session.active().is_none() && !self.session.game_over() {
            report.spawned = self.session.spawn();
        }

        if now.saturating_duration_since(self.last_gravity) >= self.config.gravity {
            let outcome = self.session.move_piece(0, 1);
            report.gravity_applied = outcome != MoveOutcome::Idle;
            if let MoveOutcome::Locked { lines_cleared } = outcome {
                report.lines_cleared = lines_cleared;
            }
            self.last_gravity = now;
        }

        trace!(
            drained,
            applied = report.actions_applied,
            spawned = report.spawned,
            gravity = report.gravity_applied,
            "tick"
        );
        report
    }

    /// Block until the input layer delivers any action, the exit flag rises or
    /// the producer goes away.
    ///
    /// Actions queued before the notice was shown were meant for play and are
    /// dropped.
    fn wait_for_ack(&mut self, queue: &mut InputQueue) -> Option<GameAction> {
        queue.discard_pending();
        loop {
            if let Some(action) = queue.try_recv() {
                if action == GameAction::Quit {
                    self.exit.raise();
                }
                return Some(action);
            }
            if self.exit.is_raised() {
                return None;
            }
            if queue.is_disconnected() {
                warn!("input closed while waiting for acknowledgment");
                self.exit.raise();
                return None;
            }
            thread::sleep(self.config.input_poll);
        }
    }

    fn restart(&mut self) {
        info!("restart");
        self.session.reset();
        self.last_gravity = Instant::now();
    }
}
