//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules: the board, the piece catalog, the
//! piece state machine and line clearing. It has **no dependencies** on
//! terminals, threads or clocks, which makes it:
//!
//! - **Deterministic**: the same seed produces the same sequence of pieces
//! - **Testable**: every rule is reachable from plain unit tests
//! - **Portable**: the game loop and renderer are separate crates
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with bounds-checked queries and row operations
//! - [`pieces`]: the seven spawn shapes and clockwise rotation
//! - [`session`]: spawn / move / rotate / lock state machine
//! - [`line_clear`]: full-row detection and compaction
//! - [`rng`]: injectable randomness for piece selection
//! - [`snapshot`]: the per-tick view handed to renderers
//!
//! # Game Rules
//!
//! - Pieces are picked uniformly at random and spawn centered on the top row
//! - Rotation is clockwise only, in place, and rejected if it collides
//! - A piece locks the moment a downward step is blocked (no lock delay)
//! - A spawn that collides ends the game
//!
//! # Example
//!
//! ```
//! use console_tetris_core::{GameSession, MoveOutcome};
//! use console_tetris_types::PieceKind;
//!
//! let mut game = GameSession::new(12345);
//! assert!(game.spawn_kind(PieceKind::O));
//!
//! // Drop the O piece to the floor.
//! let mut steps = 0;
//! while game.move_piece(0, 1) == MoveOutcome::Moved {
//!     steps += 1;
//! }
//! assert_eq!(steps, 18);
//! assert!(game.active().is_none());
//! assert_eq!(game.board().filled_count(), 4);
//! ```

pub mod board;
pub mod line_clear;
pub mod pieces;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use console_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, CellGrid};
pub use line_clear::{clear_full_rows, ClearedRows};
pub use pieces::{all_shapes, rotate_clockwise, spawn_shape, Shape};
pub use rng::{Randomizer, ScriptedRng, SimpleRng};
pub use session::{ActivePiece, GameSession, MoveOutcome};
pub use snapshot::{ActiveSnapshot, RenderSnapshot};
