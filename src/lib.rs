//! Console Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, benches and
//! integration tests can use `console_tetris::{core, engine, input, term, types}`.

pub use console_tetris_core as core;
pub use console_tetris_engine as engine;
pub use console_tetris_input as input;
pub use console_tetris_term as term;
pub use console_tetris_types as types;
