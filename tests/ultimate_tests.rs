//! Ultimate-mode integration tests: forced-board flow, sub-board wins
//! feeding the meta board, and full games to a meta result.

use hypergrid::{EngineError, IllegalMove, Mark, Status, UltimateBoard};

// =============================================================================
// Forced-Board Flow Tests
// =============================================================================

#[test]
fn test_first_move_is_unconstrained() {
    let u = UltimateBoard::new(&[3, 3]).unwrap();
    assert_eq!(u.forced_board(), None);
    assert_eq!(u.legal_moves().len(), 81);
}

#[test]
fn test_projection_wraps_modulo_sub_count() {
    // 2D: the intra cell index itself picks the next board.
    let mut u = UltimateBoard::new(&[3, 3]).unwrap();
    let outcome = u.apply_move(2, 7, Mark::X).unwrap();
    assert_eq!(outcome.forced, Some(7));
}

#[test]
fn test_3d_projection_uses_first_coordinate() {
    let mut u = UltimateBoard::new(&[3, 3, 3]).unwrap();
    assert_eq!(u.sub_count(), 3);

    // Cell 26 of a 3x3x3 sub-cube is (2, 2, 2); axis 0 picks board 2.
    let outcome = u.apply_move(0, 26, Mark::X).unwrap();
    assert_eq!(outcome.forced, Some(2));

    // Cell 4 is (0, 1, 1); axis 0 picks board 0.
    let outcome = u.apply_move(2, 4, Mark::O).unwrap();
    assert_eq!(outcome.forced, Some(0));
}

#[test]
fn test_constraint_lifts_when_target_is_decided() {
    let mut u = UltimateBoard::new(&[2, 2]).unwrap();

    u.apply_move(3, 0, Mark::X).unwrap();
    u.apply_move(0, 3, Mark::O).unwrap();
    // Any two marks line up on a 2x2, so this decides sub-board 3.
    let outcome = u.apply_move(3, 1, Mark::X).unwrap();
    assert!(matches!(
        outcome.sub_status,
        Status::Won { mark: Mark::X, .. }
    ));
    assert_eq!(outcome.forced, Some(1));

    // O now plays the cell that projects onto the decided board 3:
    // the constraint lifts instead of forcing a dead board.
    let outcome = u.apply_move(1, 3, Mark::O).unwrap();
    assert_eq!(outcome.forced, None);

    let moves = u.legal_moves();
    assert!(moves.iter().any(|&(b, _)| b == 0));
    assert!(moves.iter().any(|&(b, _)| b == 2));
    assert!(moves.iter().all(|&(b, _)| b != 3));
}

#[test]
fn test_decided_board_rejects_even_when_unconstrained() {
    let mut u = UltimateBoard::new(&[2, 2]).unwrap();
    u.apply_move(3, 0, Mark::X).unwrap();
    u.apply_move(0, 3, Mark::O).unwrap();
    u.apply_move(3, 1, Mark::X).unwrap();
    u.apply_move(1, 3, Mark::O).unwrap();
    assert_eq!(u.forced_board(), None);

    let err = u.apply_move(3, 2, Mark::X).unwrap_err();
    assert_eq!(err, EngineError::IllegalMove(IllegalMove::Terminal));
}

// =============================================================================
// Meta-Board Tests
// =============================================================================

#[test]
fn test_sub_board_win_marks_meta_cell() {
    let mut u = UltimateBoard::new(&[2, 2]).unwrap();
    u.apply_move(3, 0, Mark::X).unwrap();
    u.apply_move(0, 3, Mark::O).unwrap();
    u.apply_move(3, 1, Mark::X).unwrap();

    assert_eq!(u.meta().cell(3), Some(Mark::X));
    assert_eq!(u.meta().occupied(), 1);
    assert_eq!(u.status(), Status::Active);
}

#[test]
fn test_meta_line_wins_the_game() {
    let mut u = UltimateBoard::new(&[2, 2]).unwrap();

    u.apply_move(3, 0, Mark::X).unwrap();
    u.apply_move(0, 3, Mark::O).unwrap();
    u.apply_move(3, 1, Mark::X).unwrap(); // X takes meta cell 3
    u.apply_move(1, 0, Mark::O).unwrap();
    u.apply_move(0, 0, Mark::X).unwrap();
    u.apply_move(0, 1, Mark::O).unwrap(); // O takes meta cell 0
    u.apply_move(1, 1, Mark::X).unwrap();
    let outcome = u.apply_move(1, 2, Mark::O).unwrap(); // O takes meta cell 1

    // Meta cells 0 and 1 form the top row of the 2x2 meta board.
    assert!(matches!(
        outcome.sub_status,
        Status::Won { mark: Mark::O, .. }
    ));
    assert!(matches!(outcome.status, Status::Won { mark: Mark::O, .. }));
    assert!(matches!(u.status(), Status::Won { mark: Mark::O, .. }));
    assert_eq!(outcome.forced, None);
    assert!(u.legal_moves().is_empty());

    let err = u.apply_move(2, 0, Mark::X).unwrap_err();
    assert_eq!(err, EngineError::IllegalMove(IllegalMove::Terminal));
}

// =============================================================================
// Rejection Tests
// =============================================================================

#[test]
fn test_rejections_leave_state_untouched() {
    let mut u = UltimateBoard::new(&[3, 3]).unwrap();
    u.apply_move(0, 4, Mark::X).unwrap();

    // Wrong sub-board, wrong turn, bad board index, occupied cell.
    assert!(u.apply_move(0, 5, Mark::O).is_err());
    assert!(u.apply_move(4, 0, Mark::X).is_err());
    assert!(u.apply_move(9, 0, Mark::O).is_err());
    assert!(u.apply_move(4, 9, Mark::O).is_err());

    assert_eq!(u.forced_board(), Some(4));
    assert_eq!(u.to_move(), Mark::O);
    assert_eq!(u.sub(0).occupied(), 1);
    assert_eq!(u.sub(4).occupied(), 0);
    assert_eq!(u.meta().occupied(), 0);
}

#[test]
fn test_occupied_cell_in_forced_board() {
    let mut u = UltimateBoard::new(&[3, 3]).unwrap();
    u.apply_move(0, 0, Mark::X).unwrap();
    u.apply_move(0, 1, Mark::O).unwrap();

    // Occupied rejections inside the forced board name the intra cell.
    assert_eq!(u.forced_board(), Some(1));
    u.apply_move(1, 5, Mark::X).unwrap();
    u.apply_move(5, 1, Mark::O).unwrap();
    let err = u.apply_move(1, 5, Mark::X).unwrap_err();
    assert_eq!(err, EngineError::IllegalMove(IllegalMove::Occupied(5)));
}
