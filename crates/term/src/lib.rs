//! Terminal renderer.
//!
//! Draws [`core::RenderSnapshot`]s with crossterm and implements the engine's
//! [`engine::Frontend`] so the game loop can drive it directly.

pub mod renderer;

pub use console_tetris_core as core;
pub use console_tetris_engine as engine;
pub use console_tetris_types as types;

pub use renderer::{
    encode_diff_into, encode_full_into, encode_notice_into, glyph, TerminalRenderer,
    EMPTY_GLYPH, FILLED_GLYPH, GAME_OVER_NOTICE,
};
