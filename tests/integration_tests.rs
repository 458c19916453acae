//! Integration tests for the piece state machine

use console_tetris::core::{Board, GameSession, MoveOutcome, ScriptedRng, SimpleRng};
use console_tetris::types::{Cell, GameAction, PieceKind, BOARD_WIDTH};

fn scripted(kinds: &[PieceKind]) -> GameSession {
    GameSession::with_randomizer(Box::new(ScriptedRng::new(kinds.to_vec())))
}

fn filled(session: &GameSession) -> Vec<(i8, i8)> {
    let mut out = Vec::new();
    for y in 0..20 {
        for x in 0..10 {
            if session.board().get(x, y) == Some(Cell::Filled) {
                out.push((x, y));
            }
        }
    }
    out
}

fn soft_drop(session: &mut GameSession, times: usize) {
    for i in 0..times {
        assert_eq!(
            session.move_piece(0, 1),
            MoveOutcome::Moved,
            "soft drop {} should move",
            i + 1
        );
    }
}

#[test]
fn test_o_piece_spawns_centered_on_top() {
    let mut session = scripted(&[PieceKind::O]);
    assert!(session.spawn());
    assert_eq!(filled(&session), vec![(4, 0), (5, 0), (4, 1), (5, 1)]);
}

#[test]
fn test_spawn_keeps_piece_on_board() {
    let mut session = GameSession::new(99);
    for _ in 0..50 {
        session.reset();
        assert!(session.spawn());
        let piece = session.active().unwrap();
        assert!(piece.x >= 0);
        assert!(piece.x <= BOARD_WIDTH as i8 - piece.shape.cols() as i8);
        assert_eq!(piece.y, 0);
    }
}

#[test]
fn test_two_o_pieces_stack() {
    let mut session = scripted(&[PieceKind::O]);

    session.spawn();
    soft_drop(&mut session, 18);
    assert_eq!(filled(&session), vec![(4, 18), (5, 18), (4, 19), (5, 19)]);
    assert_eq!(
        session.move_piece(0, 1),
        MoveOutcome::Locked { lines_cleared: 0 }
    );
    assert!(session.active().is_none());

    assert!(session.spawn());
    soft_drop(&mut session, 16);
    assert_eq!(
        session.move_piece(0, 1),
        MoveOutcome::Locked { lines_cleared: 0 }
    );
    assert_eq!(
        filled(&session),
        vec![
            (4, 16),
            (5, 16),
            (4, 17),
            (5, 17),
            (4, 18),
            (5, 18),
            (4, 19),
            (5, 19)
        ]
    );
}

#[test]
fn test_double_clear_shifts_first_piece_down_two() {
    let mut session = scripted(&[PieceKind::O]);
    *session.board_mut() = Board::from_rows(&["..########", "..########"]);

    // First O rests on the prefilled rows.
    session.spawn();
    soft_drop(&mut session, 16);
    assert_eq!(
        session.move_piece(0, 1),
        MoveOutcome::Locked { lines_cleared: 0 }
    );

    // Second O goes to the gap on the left and completes both rows.
    session.spawn();
    for _ in 0..4 {
        assert_eq!(session.move_piece(-1, 0), MoveOutcome::Moved);
    }
    assert_eq!(session.move_piece(-1, 0), MoveOutcome::Blocked);
    soft_drop(&mut session, 18);
    assert_eq!(
        session.move_piece(0, 1),
        MoveOutcome::Locked { lines_cleared: 2 }
    );

    assert_eq!(filled(&session), vec![(4, 18), (5, 18), (4, 19), (5, 19)]);
}

#[test]
fn test_clear_above_leaves_rows_below_untouched() {
    let mut session = scripted(&[PieceKind::O]);
    // Row 15 has a marker, rows 16-17 are full except the O's columns,
    // rows 18-19 are partly filled and must survive unchanged.
    *session.board_mut() = Board::from_rows(&[
        "#.........",
        "####..####",
        "####..####",
        "#.#.##..#.",
        ".#..##.#.#",
    ]);
    let bottom_before: Vec<Cell> = [18usize, 19]
        .iter()
        .flat_map(|&y| session.board().row(y).to_vec())
        .collect();

    session.spawn();
    soft_drop(&mut session, 16);
    assert_eq!(
        session.move_piece(0, 1),
        MoveOutcome::Locked { lines_cleared: 2 }
    );

    let bottom_after: Vec<Cell> = [18usize, 19]
        .iter()
        .flat_map(|&y| session.board().row(y).to_vec())
        .collect();
    assert_eq!(bottom_before, bottom_after);

    // Marker fell by two, everything above it is empty.
    assert_eq!(session.board().get(0, 17), Some(Cell::Filled));
    assert_eq!(session.board().filled_count(), 1 + 5 + 5);
    for y in 0..17 {
        assert!(session.board().row(y).iter().all(|c| c.is_empty()), "row {}", y);
    }
}

#[test]
fn test_blocked_spawn_is_game_over_without_mutation() {
    let mut session = scripted(&[PieceKind::T]);
    for x in 1..10 {
        session.board_mut().set_cell(x, 0, Cell::Filled);
    }
    let before = session.board().clone();

    assert!(!session.spawn());
    assert!(session.game_over());
    assert!(session.active().is_none());
    assert_eq!(session.board(), &before);

    // Terminal: nothing spawns any more.
    assert!(!session.spawn());
    assert_eq!(session.board(), &before);
}

#[test]
fn test_rotation_at_wall_is_rejected() {
    let mut session = scripted(&[PieceKind::I]);
    session.spawn();
    soft_drop(&mut session, 1);
    assert!(session.rotate()); // vertical now
    assert_eq!(session.active().unwrap().shape.cols(), 1);

    while session.move_piece(1, 0) == MoveOutcome::Moved {}
    let piece = *session.active().unwrap();
    assert_eq!(piece.x, BOARD_WIDTH as i8 - 1);

    let before = session.board().clone();
    assert!(!session.rotate());
    assert_eq!(session.active().unwrap(), &piece);
    assert_eq!(session.board(), &before);
}

#[test]
fn test_rotation_into_stack_is_rejected() {
    let mut session = scripted(&[PieceKind::T]);
    session.spawn();
    soft_drop(&mut session, 1);
    // T at (4, 1); its rotation needs (4, 3) free.
    session.board_mut().set_cell(4, 3, Cell::Filled);
    let before = session.board().clone();
    assert!(!session.rotate());
    assert_eq!(session.board(), &before);
}

#[test]
fn test_rejected_moves_leave_board_unchanged() {
    // Random play: every rejected move or rotation leaves the board as it was.
    // Pieces have four cells and a clear removes ten, so the count stays even.
    let mut session = GameSession::new(2024);
    let mut rng = SimpleRng::new(7);
    let actions = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::Rotate,
    ];

    for _ in 0..5000 {
        if session.game_over() {
            break;
        }
        if session.active().is_none() {
            session.spawn();
            continue;
        }

        let before = session.board().clone();
        let action = actions[rng.next_range(4) as usize];
        let changed = session.apply_action(action);
        if !changed {
            assert_eq!(session.board(), &before, "{:?} was rejected", action);
        }
        if session.active().is_some() {
            assert_eq!(session.board().filled_count() % 2, 0);
        }
    }
}

#[test]
fn test_apply_action_maps_moves() {
    let mut session = scripted(&[PieceKind::O]);
    session.spawn();

    assert!(session.apply_action(GameAction::MoveLeft));
    assert_eq!(session.active().unwrap().x, 3);
    assert!(session.apply_action(GameAction::MoveRight));
    assert!(session.apply_action(GameAction::MoveRight));
    assert_eq!(session.active().unwrap().x, 5);
    assert!(session.apply_action(GameAction::SoftDrop));
    assert_eq!(session.active().unwrap().y, 1);
}

#[test]
fn test_restart_gives_fresh_board() {
    let mut session = scripted(&[PieceKind::O]);
    session.spawn();
    soft_drop(&mut session, 18);
    session.move_piece(0, 1);
    assert_eq!(session.board().filled_count(), 4);

    session.reset();
    assert_eq!(session.board().filled_count(), 0);
    assert!(session.spawn());
}
