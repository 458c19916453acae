use crate::board::CellGrid;
use crate::session::ActivePiece;
use crate::types::{Cell, PieceKind, BOARD_COLS, BOARD_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub rows: u8,
    pub cols: u8,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            kind: value.kind,
            x: value.x,
            y: value.y,
            rows: value.shape.rows(),
            cols: value.shape.cols(),
        }
    }
}

/// What the renderer gets once per tick.
///
/// `board` already contains the falling piece's footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderSnapshot {
    pub board: CellGrid,
    pub active: Option<ActiveSnapshot>,
    pub game_over: bool,
}

impl RenderSnapshot {
    pub fn filled_count(&self) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count()
    }
}

impl Default for RenderSnapshot {
    fn default() -> Self {
        Self {
            board: [[Cell::Empty; BOARD_COLS]; BOARD_ROWS],
            active: None,
            game_over: false,
        }
    }
}
