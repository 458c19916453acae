//! Input capture task.
//!
//! Polls for key events on its own thread, decodes them and pushes the
//! resulting actions into the game loop's queue. It never blocks the game
//! loop: when no key is ready it waits one poll slice and checks again.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent};
use tracing::{debug, info, warn};

use crate::engine::{ExitFlag, InputSender};
use crate::map::{action_for_key, should_quit};
use crate::types::GameAction;

/// Somewhere key events come from.
pub trait KeySource: Send {
    /// Wait up to `timeout` for a key. `Ok(None)` means nothing arrived.
    fn next_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>>;
}

/// Reads the real terminal through crossterm.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

/// Start the capture thread on the terminal.
pub fn spawn_capture(
    sender: InputSender,
    exit: ExitFlag,
    poll: Duration,
) -> Result<JoinHandle<Result<()>>> {
    spawn_capture_from(TerminalKeys, sender, exit, poll)
}

/// Start the capture thread on any key source.
pub fn spawn_capture_from<S: KeySource + 'static>(
    mut source: S,
    sender: InputSender,
    exit: ExitFlag,
    poll: Duration,
) -> Result<JoinHandle<Result<()>>> {
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || capture_loop(&mut source, &sender, &exit, poll))
        .context("failed to spawn input thread")
}

/// Poll, decode and enqueue until quit is seen or the game loop goes away.
///
/// A read error raises the exit flag before it is returned.
pub fn capture_loop(
    source: &mut impl KeySource,
    sender: &InputSender,
    exit: &ExitFlag,
    poll: Duration,
) -> Result<()> {
    while !exit.is_raised() {
        let key = match source.next_key(poll) {
            Ok(Some(key)) => key,
            Ok(None) => continue,
            Err(err) => {
                // Nobody can quit once input is gone.
                warn!(error = %err, "key read failed");
                exit.raise();
                return Err(err);
            }
        };

        if should_quit(key) {
            info!("quit key");
            exit.raise();
            sender.send(GameAction::Quit);
            break;
        }

        if let Some(action) = action_for_key(key) {
            debug!(action = action.as_str(), "key");
            if !sender.send(action) {
                // Game loop is gone.
                break;
            }
        }
    }
    Ok(())
}
