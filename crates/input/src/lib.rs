//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`types::GameAction`]s and runs the
//! capture thread that feeds them to the game loop. The engine never reads the
//! keyboard itself.

pub mod capture;
pub mod map;

pub use console_tetris_engine as engine;
pub use console_tetris_types as types;

pub use capture::{capture_loop, spawn_capture, spawn_capture_from, KeySource, TerminalKeys};
pub use map::{action_for_key, should_quit};
