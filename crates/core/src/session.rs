//! Game session module - the piece state machine
//!
//! Ties together the board, the shape catalog, the randomizer and line
//! clearing. The falling piece is always drawn on the board as `Filled`, so the
//! board alone is a complete picture of the game for rendering.
//!
//! States: no active piece -> falling -> (lock) -> no active piece, with game
//! over as the terminal state. The only way into game over is a spawn whose
//! footprint collides.

use std::fmt;

use tracing::debug;

use crate::board::Board;
use crate::line_clear::clear_full_rows;
use crate::pieces::{rotate_clockwise, spawn_shape, Shape};
use crate::rng::{Randomizer, SimpleRng};
use crate::snapshot::{ActiveSnapshot, RenderSnapshot};
use crate::types::{Cell, GameAction, PieceKind, BOARD_WIDTH};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    /// Board column of the shape's top-left cell
    pub x: i8,
    /// Board row of the shape's top-left cell
    pub y: i8,
}

impl ActivePiece {
    /// Place a catalog piece at its spawn anchor: centered, top row.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = spawn_shape(kind);
        Self {
            kind,
            shape,
            x: spawn_x(&shape),
            y: 0,
        }
    }

    /// Board coordinates covered by this piece.
    pub fn footprint(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Whether board cell (x, y) is part of this piece.
    fn covers(&self, x: i8, y: i8) -> bool {
        let (dx, dy) = (x - self.x, y - self.y);
        dx >= 0 && dy >= 0 && self.shape.is_filled(dy as usize, dx as usize)
    }
}

/// Horizontal spawn anchor: shape center on board center.
pub fn spawn_x(shape: &Shape) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape.cols() / 2) as i8
}

/// Result of [`GameSession::move_piece`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece moved.
    Moved,
    /// The move was illegal and nothing changed.
    Blocked,
    /// A downward move was illegal, so the piece locked in place.
    Locked { lines_cleared: usize },
    /// There is no active piece.
    Idle,
}

/// One game: board, falling piece and game-over flag.
pub struct GameSession {
    board: Board,
    active: Option<ActivePiece>,
    game_over: bool,
    rng: Box<dyn Randomizer>,
    pieces_spawned: u32,
}

impl GameSession {
    /// Create a session whose pieces come from a seeded [`SimpleRng`]
    pub fn new(seed: u32) -> Self {
        Self::with_randomizer(Box::new(SimpleRng::new(seed)))
    }

    pub fn with_randomizer(rng: Box<dyn Randomizer>) -> Self {
        Self {
            board: Board::new(),
            active: None,
            game_over: false,
            rng,
            pieces_spawned: 0,
        }
    }

    /// Back to an empty board with no piece. The randomizer keeps its position.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.game_over = false;
        self.pieces_spawned = 0;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions.
    ///
    /// Writing over the active piece's footprint leaves the session in a state
    /// it would never reach by itself; set up the board before spawning.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn snapshot_into(&self, out: &mut RenderSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let mut s = RenderSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a uniformly random piece.
    ///
    /// Returns false (and does nothing) when a piece is already falling or
    /// the game is over. A blocked spawn ends the game without touching the
    /// board.
    pub fn spawn(&mut self) -> bool {
        if self.game_over || self.active.is_some() {
            return false;
        }
        let kind = self.rng.next_kind();
        self.spawn_kind(kind)
    }

    /// Spawn a specific piece; same rules as [`GameSession::spawn`].
    pub fn spawn_kind(&mut self, kind: PieceKind) -> bool {
        if self.game_over || self.active.is_some() {
            return false;
        }

        let piece = ActivePiece::spawn(kind);
        if !self.can_place(&piece.shape, piece.x, piece.y) {
            debug!(kind = kind.as_str(), x = piece.x, "spawn blocked");
            self.game_over = true;
            return false;
        }

        self.stamp(&piece, Cell::Filled);
        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        debug!(kind = kind.as_str(), x = piece.x, "spawned piece");
        true
    }

    /// Whether `shape` anchored at (x, y) lands only on in-range empty cells.
    ///
    /// The active piece's own footprint counts as empty, so a piece never
    /// collides with itself.
    pub fn can_place(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.filled_cells().all(|(dx, dy)| {
            let (bx, by) = (x + dx, y + dy);
            self.board.is_empty(bx, by)
                || (self.board.get(bx, by).is_some()
                    && self.active.as_ref().is_some_and(|p| p.covers(bx, by)))
        })
    }

    /// Move the active piece by (dx, dy).
    ///
    /// A blocked downward step (`dy == 1`) locks the piece and clears full
    /// rows; any other blocked move is a no-op.
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> MoveOutcome {
        let Some(piece) = self.active else {
            return MoveOutcome::Idle;
        };

        let moved = ActivePiece {
            x: piece.x + dx,
            y: piece.y + dy,
            ..piece
        };

        if self.can_place(&moved.shape, moved.x, moved.y) {
            self.replace_active(&piece, moved);
            return MoveOutcome::Moved;
        }

        if dy == 1 {
            return self.lock();
        }

        MoveOutcome::Blocked
    }

    /// Rotate the active piece clockwise in place. No wall kicks.
    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };

        let rotated = ActivePiece {
            shape: rotate_clockwise(&piece.shape),
            ..piece
        };

        if !self.can_place(&rotated.shape, rotated.x, rotated.y) {
            debug!(kind = piece.kind.as_str(), x = piece.x, y = piece.y, "rotation rejected");
            return false;
        }

        self.replace_active(&piece, rotated);
        true
    }

    /// Apply one decoded input.
    ///
    /// Returns true if the board changed. `Quit` and `Restart` belong to the
    /// game loop and are ignored here.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1, 0) == MoveOutcome::Moved,
            GameAction::MoveRight => self.move_piece(1, 0) == MoveOutcome::Moved,
            GameAction::SoftDrop => matches!(
                self.move_piece(0, 1),
                MoveOutcome::Moved | MoveOutcome::Locked { .. }
            ),
            GameAction::Rotate => self.rotate(),
            GameAction::Quit | GameAction::Restart => false,
        }
    }

    /// Leave the footprint filled, clear full rows, drop the active piece.
    fn lock(&mut self) -> MoveOutcome {
        let Some(piece) = self.active.take() else {
            return MoveOutcome::Idle;
        };

        let cleared = clear_full_rows(&mut self.board);
        debug!(
            kind = piece.kind.as_str(),
            y = piece.y,
            lines_cleared = cleared.len(),
            "piece locked"
        );

        MoveOutcome::Locked {
            lines_cleared: cleared.len(),
        }
    }

    fn replace_active(&mut self, old: &ActivePiece, new: ActivePiece) {
        self.stamp(old, Cell::Empty);
        self.stamp(&new, Cell::Filled);
        self.active = Some(new);
    }

    fn stamp(&mut self, piece: &ActivePiece, cell: Cell) {
        for (x, y) in piece.footprint() {
            self.board.set_cell(x, y, cell);
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("board", &self.board)
            .field("active", &self.active)
            .field("game_over", &self.game_over)
            .field("pieces_spawned", &self.pieces_spawned)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    fn session_with(kinds: &[PieceKind]) -> GameSession {
        GameSession::with_randomizer(Box::new(ScriptedRng::new(kinds.to_vec())))
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = GameSession::new(12345);
        assert!(session.active().is_none());
        assert!(!session.game_over());
        assert_eq!(session.board().filled_count(), 0);
    }

    #[test]
    fn test_spawn_centers_each_kind() {
        for kind in PieceKind::ALL {
            let piece = ActivePiece::spawn(kind);
            let expected = 5 - (piece.shape.cols() / 2) as i8;
            assert_eq!(piece.x, expected, "{:?}", kind);
            assert_eq!(piece.y, 0);
        }
        assert_eq!(ActivePiece::spawn(PieceKind::I).x, 3);
        assert_eq!(ActivePiece::spawn(PieceKind::O).x, 4);
        assert_eq!(ActivePiece::spawn(PieceKind::T).x, 4);
    }

    #[test]
    fn test_spawn_draws_footprint() {
        let mut session = session_with(&[PieceKind::T]);
        assert!(session.spawn());
        assert_eq!(session.board().filled_count(), 4);
        assert_eq!(session.board().get(5, 0), Some(Cell::Filled));
        assert_eq!(session.board().get(4, 1), Some(Cell::Filled));
        assert_eq!(session.board().get(5, 1), Some(Cell::Filled));
        assert_eq!(session.board().get(6, 1), Some(Cell::Filled));
        assert_eq!(session.pieces_spawned(), 1);
    }

    #[test]
    fn test_spawn_while_active_is_noop() {
        let mut session = session_with(&[PieceKind::O, PieceKind::I]);
        assert!(session.spawn());
        assert!(!session.spawn());
        assert_eq!(session.active().unwrap().kind, PieceKind::O);
    }

    #[test]
    fn test_piece_does_not_collide_with_itself() {
        let mut session = session_with(&[PieceKind::S]);
        session.spawn();
        assert_eq!(session.move_piece(1, 0), MoveOutcome::Moved);
        assert_eq!(session.move_piece(0, 1), MoveOutcome::Moved);
        assert_eq!(session.board().filled_count(), 4);
    }

    #[test]
    fn test_horizontal_block_is_noop() {
        let mut session = session_with(&[PieceKind::O]);
        session.spawn();
        for _ in 0..4 {
            assert_eq!(session.move_piece(-1, 0), MoveOutcome::Moved);
        }
        let before = session.board().clone();
        assert_eq!(session.move_piece(-1, 0), MoveOutcome::Blocked);
        assert_eq!(session.board(), &before);
        assert_eq!(session.active().unwrap().x, 0);
    }

    #[test]
    fn test_upward_block_does_not_lock() {
        let mut session = session_with(&[PieceKind::O]);
        session.spawn();
        assert_eq!(session.move_piece(0, -1), MoveOutcome::Blocked);
        assert!(session.active().is_some());
    }

    #[test]
    fn test_move_without_piece_is_idle() {
        let mut session = GameSession::new(1);
        assert_eq!(session.move_piece(0, 1), MoveOutcome::Idle);
        assert!(!session.rotate());
    }

    #[test]
    fn test_lock_keeps_footprint() {
        let mut session = session_with(&[PieceKind::O]);
        session.spawn();
        while session.move_piece(0, 1) == MoveOutcome::Moved {}
        assert!(session.active().is_none());
        assert_eq!(session.board().get(4, 18), Some(Cell::Filled));
        assert_eq!(session.board().get(5, 19), Some(Cell::Filled));
        assert_eq!(session.board().filled_count(), 4);
    }

    #[test]
    fn test_rotate_t_in_open_space() {
        let mut session = session_with(&[PieceKind::T]);
        session.spawn();
        session.move_piece(0, 1);
        assert!(session.rotate());
        let piece = session.active().unwrap();
        assert_eq!((piece.shape.rows(), piece.shape.cols()), (3, 2));
        assert_eq!(session.board().filled_count(), 4);
    }

    #[test]
    fn test_rotate_o_applies_identity() {
        let mut session = session_with(&[PieceKind::O]);
        session.spawn();
        let before = session.board().clone();
        assert!(session.rotate());
        assert_eq!(session.board(), &before);
    }

    #[test]
    fn test_apply_action_ignores_loop_controls() {
        let mut session = session_with(&[PieceKind::O]);
        session.spawn();
        let before = session.board().clone();
        assert!(!session.apply_action(GameAction::Quit));
        assert!(!session.apply_action(GameAction::Restart));
        assert_eq!(session.board(), &before);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = session_with(&[PieceKind::O]);
        session.spawn();
        session.board_mut().set_cell(0, 19, Cell::Filled);
        session.reset();
        assert!(session.active().is_none());
        assert!(!session.game_over());
        assert_eq!(session.board().filled_count(), 0);
    }

    #[test]
    fn test_snapshot_includes_active_piece() {
        let mut session = session_with(&[PieceKind::O]);
        session.spawn();
        session.move_piece(0, 1);

        let snap = session.snapshot();
        assert_eq!(snap.filled_count(), 4);
        assert_eq!(snap.board[1][4], Cell::Filled);
        assert_eq!(snap.board[2][5], Cell::Filled);
        let active = snap.active.unwrap();
        assert_eq!((active.kind, active.x, active.y), (PieceKind::O, 4, 1));
        assert!(!snap.game_over);
    }
}
