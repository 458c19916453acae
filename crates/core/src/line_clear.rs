//! Line clearing.
//!
//! Single bottom-to-top pass: when a row is full, everything above it drops
//! one row and the same index is examined again, so stacked full rows cascade
//! without a second sweep.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::BOARD_ROWS;

/// Board indices at which full rows were found, in detection order.
pub type ClearedRows = ArrayVec<usize, BOARD_ROWS>;

/// Remove every full row, compacting the rows above it.
///
/// A cascade reports the same index more than once (two stacked full rows at
/// the bottom yield `[19, 19]`). The length is the number of rows removed.
pub fn clear_full_rows(board: &mut Board) -> ClearedRows {
    let mut cleared = ClearedRows::new();
    let mut y = BOARD_ROWS;

    while y > 0 {
        let row = y - 1;
        if board.row_is_full(row) {
            board.shift_rows_down(1, row);
            board.clear_row(0);
            // Every removal empties row 0, so at most BOARD_ROWS pushes happen.
            cleared.push(row);
            // Re-examine `row`: it now holds what used to sit above it.
            continue;
        }
        y -= 1;
    }

    cleared
}
