//! Game loop and input channel.
//!
//! Drives a [`core::GameSession`](console_tetris_core::GameSession) at a fixed
//! cadence from a queue of decoded inputs, and hands one snapshot per tick to
//! a [`Frontend`]. Key capture and drawing are not done here; see the input
//! and term crates.
//!
//! # Threads
//!
//! - the input capture task pushes [`types::GameAction`]s through an
//!   [`InputSender`]
//! - the game loop (the caller of [`GameLoop::run`]) drains the
//!   [`InputQueue`] once per tick
//! - an [`ExitFlag`] shared by both ends the session at the next loop boundary

pub mod config;
pub mod game_loop;
pub mod queue;

pub use console_tetris_core as core;
pub use console_tetris_types as types;

pub use config::{ConfigError, EngineConfig};
pub use game_loop::{Frontend, GameLoop, SessionOutcome, TickReport};
pub use queue::{input_channel, ExitFlag, InputQueue, InputSender};
