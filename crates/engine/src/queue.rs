//! Input channel between the capture task and the game loop.
//!
//! An unbounded FIFO: the capture thread is the only producer and the game
//! loop the only consumer, draining everything queued once per tick. Both
//! ends are plain synchronous calls, so neither side needs a runtime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::types::GameAction;

/// Create a connected sender / queue pair.
pub fn input_channel() -> (InputSender, InputQueue) {
    let (tx, rx) = mpsc::unbounded_channel::<GameAction>();
    (
        InputSender { tx },
        InputQueue {
            rx,
            disconnected: false,
        },
    )
}

/// Producer side, held by the input capture task.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: mpsc::UnboundedSender<GameAction>,
}

impl InputSender {
    /// Enqueue an action. Returns false once the game loop has gone away.
    pub fn send(&self, action: GameAction) -> bool {
        self.tx.send(action).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer side, owned by the game loop.
#[derive(Debug)]
pub struct InputQueue {
    rx: mpsc::UnboundedReceiver<GameAction>,
    disconnected: bool,
}

impl InputQueue {
    /// Next queued action, without blocking.
    pub fn try_recv(&mut self) -> Option<GameAction> {
        match self.rx.try_recv() {
            Ok(action) => Some(action),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.disconnected = true;
                None
            }
        }
    }

    /// True once a receive found the queue empty with every sender dropped.
    ///
    /// Nothing can arrive after that, so the consumer should stop waiting.
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    /// Move everything currently queued into `out`, oldest first.
    ///
    /// Returns the number of actions drained.
    pub fn drain_into(&mut self, out: &mut Vec<GameAction>) -> usize {
        let before = out.len();
        while let Some(action) = self.try_recv() {
            out.push(action);
        }
        out.len() - before
    }

    /// Drop everything currently queued.
    pub fn discard_pending(&mut self) -> usize {
        let mut n = 0;
        while self.try_recv().is_some() {
            n += 1;
        }
        n
    }
}

/// Shared quit signal read by both tasks.
///
/// Raising it never interrupts a tick; each task checks it at its own loop
/// boundary.
#[derive(Debug, Clone, Default)]
pub struct ExitFlag(Arc<AtomicBool>);

impl ExitFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
