//! Console Tetris runner (default binary).
//!
//! Wires the pieces together: the input capture thread feeds the queue, the
//! game loop runs on the main thread and draws through the terminal renderer.
//!
//! Configuration comes from the environment (see `EngineConfig::from_env`).
//! Logs go to `TETRIS_LOG_PATH` when set, since stdout belongs to the board.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use crossterm::event;
use tracing::info;
use tracing_subscriber::EnvFilter;

use console_tetris::core::GameSession;
use console_tetris::engine::{input_channel, EngineConfig, ExitFlag, GameLoop, SessionOutcome};
use console_tetris::input::spawn_capture;
use console_tetris::term::TerminalRenderer;

fn main() -> Result<()> {
    let config = EngineConfig::from_env()?;
    if let Some(path) = config.log_path.as_deref() {
        init_logging(path)?;
    }
    info!(seed = config.seed, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();

    let outcome = result?;
    info!(?outcome, "finished");
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: EngineConfig) -> Result<SessionOutcome> {
    // Keys pressed before the game started are not game input.
    while event::poll(Duration::ZERO)? {
        event::read()?;
    }

    let exit = ExitFlag::new();
    let (sender, mut queue) = input_channel();
    let input = spawn_capture(sender, exit.clone(), config.input_poll)?;

    let session = GameSession::new(config.seed);
    let mut game = GameLoop::new(session, config, exit.clone());
    let outcome = game.run(&mut queue, term);

    // Stop the input thread whichever way the loop ended.
    exit.raise();
    drop(queue);
    input
        .join()
        .map_err(|_| anyhow!("input thread panicked"))??;

    outcome
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("cannot open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))
}
