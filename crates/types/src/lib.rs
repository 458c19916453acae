//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be
//! shared by the engine, the input capture task and the terminal renderer.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRAVITY_MS` | 500 | Interval between forced downward steps |
//! | `FRAME_MS` | 50 | Loop throttle slice between ticks |
//! | `INPUT_POLL_MS` | 10 | Input task poll timeout when no key is ready |
//!
//! # Examples
//!
//! ```
//! use console_tetris_types::{Cell, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//!
//! assert!(Cell::Empty.is_empty());
//! assert_eq!(PieceKind::T.as_str(), "t");
//! assert!(GameAction::SoftDrop.is_movement());
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Board width as `usize`, for array lengths.
pub const BOARD_COLS: usize = BOARD_WIDTH as usize;

/// Board height as `usize`, for array lengths.
pub const BOARD_ROWS: usize = BOARD_HEIGHT as usize;

/// Gravity interval in milliseconds (one row every half second)
pub const GRAVITY_MS: u32 = 500;

/// Game loop throttle in milliseconds.
///
/// This only caps the loop rate; gravity is measured against wall-clock time.
pub const FRAME_MS: u32 = 50;

/// Input task poll timeout in milliseconds.
pub const INPUT_POLL_MS: u32 = 10;


/// State of a single board cell.
///
/// Locked cells do not remember which piece filled them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn is_filled(self) -> bool {
        self == Cell::Filled
    }
}

/// The seven tetromino piece kinds
///
/// - **I**: horizontal bar
/// - **O**: 2x2 square
/// - **T**: T-shaped
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Logical inputs delivered to the game loop.
///
/// The input capture task decodes raw keys into these; the engine never sees
/// raw keyboard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    SoftDrop,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// End the session
    Quit,
    /// Start a fresh board after game over
    Restart,
}

impl GameAction {
    pub const ALL: [GameAction; 6] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::Rotate,
        GameAction::Quit,
        GameAction::Restart,
    ];

    /// Convert to camelCase string (used in log fields)
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::Quit => "quit",
            GameAction::Restart => "restart",
        }
    }

    /// True for actions that drive the active piece.
    ///
    /// The game loop hands only these to the session; the rest are loop
    /// control.
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop | GameAction::Rotate
        )
    }
}
