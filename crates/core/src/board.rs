//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is either empty or filled.
//! Uses a flat array for better cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use crate::types::{Cell, BOARD_COLS, BOARD_HEIGHT, BOARD_ROWS, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_COLS * BOARD_ROWS;

/// Row-major cell grid handed to renderers.
pub type CellGrid = [[Cell; BOARD_COLS]; BOARD_ROWS];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * BOARD_COLS + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// True iff (x, y) is on the board and empty.
    ///
    /// Out-of-range coordinates report `false`: they are blocked, never free.
    pub fn is_empty(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Empty))
    }

    /// Write a cell.
    ///
    /// Callers route every coordinate through [`Board::is_empty`] (or a
    /// placement check built on it) first; an out-of-range write is a bug.
    pub fn set_cell(&mut self, x: i8, y: i8, cell: Cell) {
        match Self::index(x, y) {
            Some(idx) => self.cells[idx] = cell,
            None => debug_assert!(false, "set_cell out of range: ({x}, {y})"),
        }
    }

    /// Check if a row is completely filled
    pub fn row_is_full(&self, y: usize) -> bool {
        if y >= BOARD_ROWS {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_filled())
    }

    /// Set every cell of row `y` to empty.
    pub fn clear_row(&mut self, y: usize) {
        if y >= BOARD_ROWS {
            return;
        }
        let start = y * BOARD_COLS;
        self.cells[start..start + BOARD_COLS].fill(Cell::Empty);
    }

    /// Copy row `r - 1` into row `r` for every `r` in `from..=to`, bottom first.
    ///
    /// The block of rows `from - 1..=to - 1` ends up one row lower. Row
    /// `from - 1` keeps its old contents; callers clear it when needed.
    pub fn shift_rows_down(&mut self, from: usize, to: usize) {
        debug_assert!(from >= 1, "shift_rows_down needs a source row above `from`");
        let to = to.min(BOARD_ROWS - 1);
        for row in (from.max(1)..=to).rev() {
            let src_start = (row - 1) * BOARD_COLS;
            let dst_start = row * BOARD_COLS;
            self.cells
                .copy_within(src_start..src_start + BOARD_COLS, dst_start);
        }
    }

    /// Cells of row `y` (left to right). Empty for rows past the bottom.
    pub fn row(&self, y: usize) -> &[Cell] {
        if y >= BOARD_ROWS {
            return &[];
        }
        let start = y * BOARD_COLS;
        &self.cells[start..start + BOARD_COLS]
    }

    /// Number of filled cells on the whole board.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Copy the board into a row-major grid without allocating.
    pub fn write_grid(&self, out: &mut CellGrid) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }

    /// Build a board from text rows, `#` for filled and anything else for empty.
    ///
    /// Rows are aligned to the bottom of the board; missing rows above are empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= BOARD_ROWS, "too many rows: {}", rows.len());
        let mut board = Self::new();
        let top = BOARD_ROWS - rows.len();
        for (i, line) in rows.iter().enumerate() {
            for (x, ch) in line.chars().take(BOARD_COLS).enumerate() {
                if ch == '#' {
                    board.set_cell(x as i8, (top + i) as i8, Cell::Filled);
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
