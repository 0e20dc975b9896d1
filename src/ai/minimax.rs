//! Depth-limited minimax with alpha-beta pruning.
//!
//! The search mutates one scratch board in place: place a mark, recurse,
//! remove the mark. The undo runs before any pruning exit, so the buffer
//! is byte-identical once a node returns. Wins score `WIN_SCORE - depth`,
//! so faster wins (and slower losses) rank higher; draws and positions
//! at the depth cap score zero.

use tracing::trace;

use crate::board::BoardState;
use crate::core::Mark;
use crate::grid::CellIndex;

/// Exceeds any configurable search depth, so a win at maximum depth
/// still outranks every neutral score.
const WIN_SCORE: i32 = 64;

/// Find the best cell for `mark` on `board`, returning it with its
/// minimax score. `None` only when the board has no empty cell.
pub(super) fn search(
    board: &mut BoardState,
    mark: Mark,
    max_depth: u32,
) -> Option<(CellIndex, i32)> {
    let total = board.grid().total_cells();
    let mut best: Option<(CellIndex, i32)> = None;
    let mut alpha = i32::MIN;

    for cell in 0..total {
        if board.cell(cell).is_some() {
            continue;
        }
        board.place(cell, mark);
        let score = evaluate(board, mark, cell, mark, 1, max_depth, alpha, i32::MAX);
        board.unplace(cell);

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((cell, score));
        }
        alpha = alpha.max(score);
    }

    trace!(?best, %mark, max_depth, "minimax root");
    best
}

/// Score the position after `placed_mark` just played `placed`, from the
/// perspective of `ai`. `depth` counts plies already played below the
/// root.
#[allow(clippy::too_many_arguments)]
fn evaluate(
    board: &mut BoardState,
    ai: Mark,
    placed: CellIndex,
    placed_mark: Mark,
    depth: u32,
    max_depth: u32,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if board.wins_at(placed, placed_mark) {
        let score = WIN_SCORE - depth as i32;
        return if placed_mark == ai { score } else { -score };
    }
    if board.is_full() || depth >= max_depth {
        return 0;
    }

    let to_move = placed_mark.opposite();
    let maximizing = to_move == ai;
    let total = board.grid().total_cells();
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for cell in 0..total {
        if board.cell(cell).is_some() {
            continue;
        }
        board.place(cell, to_move);
        let score = evaluate(board, ai, cell, to_move, depth + 1, max_depth, alpha, beta);
        board.unplace(cell);

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if beta <= alpha {
            break;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn board_3x3() -> BoardState {
        BoardState::new(Grid::new(&[3, 3]).unwrap())
    }

    #[test]
    fn test_takes_immediate_win() {
        let mut b = board_3x3();
        b.apply_move(0, Mark::X).unwrap();
        b.apply_move(3, Mark::O).unwrap();
        b.apply_move(1, Mark::X).unwrap();
        b.apply_move(4, Mark::O).unwrap();

        let (cell, score) = search(&mut b, Mark::X, 9).unwrap();
        assert_eq!(cell, 2);
        assert_eq!(score, WIN_SCORE - 1);
    }

    #[test]
    fn test_blocks_forced_loss() {
        let mut b = board_3x3();
        b.apply_move(0, Mark::X).unwrap();
        b.apply_move(4, Mark::O).unwrap();
        b.apply_move(1, Mark::X).unwrap();

        let (cell, _) = search(&mut b, Mark::O, 9).unwrap();
        assert_eq!(cell, 2);
    }

    #[test]
    fn test_full_search_from_empty_is_a_draw() {
        let mut b = board_3x3();
        let (_, score) = search(&mut b, Mark::X, 9).unwrap();
        assert_eq!(score, 0);
    }

    #[test]
    fn test_prefers_faster_win() {
        // X can win on the top row now, or set up a slower win elsewhere.
        // The depth term must make the immediate win score higher.
        let mut b = board_3x3();
        b.apply_move(0, Mark::X).unwrap();
        b.apply_move(6, Mark::O).unwrap();
        b.apply_move(1, Mark::X).unwrap();
        b.apply_move(7, Mark::O).unwrap();

        let (cell, score) = search(&mut b, Mark::X, 9).unwrap();
        assert_eq!(cell, 2);
        assert_eq!(score, WIN_SCORE - 1);
    }

    #[test]
    fn test_board_restored_after_search() {
        let mut b = board_3x3();
        b.apply_move(4, Mark::X).unwrap();
        b.apply_move(0, Mark::O).unwrap();
        let before: Vec<_> = (0..9).map(|i| b.cell(i)).collect();

        let _ = search(&mut b, Mark::X, 6);

        let after: Vec<_> = (0..9).map(|i| b.cell(i)).collect();
        assert_eq!(before, after);
        assert_eq!(b.occupied(), 2);
    }

    #[test]
    fn test_depth_cap_still_takes_wins() {
        // The win check runs before the cap, so even max_depth 1 finds
        // an immediate winning move.
        let mut b = board_3x3();
        b.apply_move(0, Mark::X).unwrap();
        b.apply_move(3, Mark::O).unwrap();
        b.apply_move(1, Mark::X).unwrap();
        b.apply_move(4, Mark::O).unwrap();

        let (cell, _) = search(&mut b, Mark::X, 1).unwrap();
        assert_eq!(cell, 2);
    }

    #[test]
    fn test_depth_cap_bounds_work_on_larger_grids() {
        let mut b = BoardState::new(Grid::new(&[4, 4]).unwrap());
        let (cell, score) = search(&mut b, Mark::X, 3).unwrap();
        assert!(b.cell(cell).is_none());
        assert_eq!(score, 0);
    }
}
