//! Pieces module - tetromino catalog and rotation geometry
//!
//! Each piece is defined once, in its spawn orientation, as a small boolean
//! matrix. Every other orientation is derived at runtime by
//! [`rotate_clockwise`]; nothing is pre-tabulated and no piece is special-cased.

use std::fmt;

use crate::types::PieceKind;

/// Largest matrix side any tetromino needs.
pub const MAX_SHAPE_SIDE: usize = 4;

/// Offset of a single filled cell relative to the shape's top-left corner
pub type CellOffset = (i8, i8);

/// Boolean matrix of one tetromino orientation.
///
/// Stored in a fixed 4x4 backing array so rotation never allocates; only the
/// `rows x cols` region is meaningful and only that region takes part in
/// equality.
#[derive(Clone, Copy)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Build a shape from text rows, `#` marking a filled cell.
    ///
    /// # Panics
    ///
    /// If the matrix is empty, larger than 4x4, or ragged.
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(
            !rows.is_empty() && rows.len() <= MAX_SHAPE_SIDE,
            "shape needs 1..=4 rows"
        );
        let cols = rows[0].chars().count();
        assert!(cols > 0 && cols <= MAX_SHAPE_SIDE, "shape needs 1..=4 columns");

        let mut bits = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (r, line) in rows.iter().enumerate() {
            assert_eq!(line.chars().count(), cols, "ragged shape row {r}");
            for (c, ch) in line.chars().enumerate() {
                bits[r][c] = ch == '#';
            }
        }

        Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            bits,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether cell (row, col) is filled. Outside the matrix is never filled.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.bits[row][col]
    }

    /// Iterate filled cells as `(dx, dy)` offsets from the top-left corner.
    pub fn filled_cells(&self) -> impl Iterator<Item = CellOffset> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.bits[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Number of filled cells (4 for every catalog piece).
    pub fn filled_count(&self) -> usize {
        self.filled_cells().count()
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && (0..self.rows as usize).all(|r| {
                self.bits[r][..self.cols as usize] == other.bits[r][..other.cols as usize]
            })
    }
}

impl Eq for Shape {}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = (0..self.rows as usize)
            .map(|r| {
                (0..self.cols as usize)
                    .map(|c| if self.bits[r][c] { '#' } else { '.' })
                    .collect()
            })
            .collect();
        f.debug_tuple("Shape").field(&rows).finish()
    }
}

/// Get the spawn-orientation shape for a piece kind
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&["####"]),
        PieceKind::O => Shape::from_rows(&["##", "##"]),
        PieceKind::T => Shape::from_rows(&[".#.", "###"]),
        PieceKind::S => Shape::from_rows(&[".##", "##."]),
        PieceKind::Z => Shape::from_rows(&["##.", ".##"]),
        PieceKind::J => Shape::from_rows(&["#..", "###"]),
        PieceKind::L => Shape::from_rows(&["..#", "###"]),
    }
}

/// The full catalog, in I, O, T, S, Z, J, L order.
pub fn all_shapes() -> [(PieceKind, Shape); 7] {
    PieceKind::ALL.map(|kind| (kind, spawn_shape(kind)))
}

/// Rotate a shape 90° clockwise.
///
/// A `rows x cols` matrix becomes `cols x rows` with
/// `rotated[c][rows - 1 - r] = original[r][c]`.
pub fn rotate_clockwise(shape: &Shape) -> Shape {
    let rows = shape.rows as usize;
    let cols = shape.cols as usize;
    let mut bits = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];

    for (r, src_row) in shape.bits.iter().enumerate().take(rows) {
        for (c, &filled) in src_row.iter().enumerate().take(cols) {
            bits[c][rows - 1 - r] = filled;
        }
    }

    Shape {
        rows: shape.cols,
        cols: shape.rows,
        bits,
    }
}
