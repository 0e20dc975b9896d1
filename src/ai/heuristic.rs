//! Tactical ladder opponent.
//!
//! Works on a scratch copy of the board through the internal
//! place/probe/unplace hooks. The ladder:
//!
//! 1. take an immediate win,
//! 2. block the opponent's immediate win,
//! 3. take the center cell,
//! 4. take a corner cell,
//! 5. play uniformly at random.

use crate::board::BoardState;
use crate::core::{GameRng, Mark};
use crate::grid::{CellIndex, Coords, Grid};

pub(super) fn choose(
    board: &mut BoardState,
    mark: Mark,
    legal: &[CellIndex],
    rng: &mut GameRng,
) -> Option<CellIndex> {
    if let Some(cell) = immediate_win(board, mark, legal) {
        return Some(cell);
    }
    if let Some(cell) = immediate_win(board, mark.opposite(), legal) {
        return Some(cell);
    }
    if let Some(cell) = center_cell(board.grid()) {
        if board.cell(cell).is_none() && legal.contains(&cell) {
            return Some(cell);
        }
    }
    let corners: Vec<CellIndex> = corner_cells(board.grid())
        .into_iter()
        .filter(|c| board.cell(*c).is_none() && legal.contains(c))
        .collect();
    if let Some(cell) = rng.choose(&corners) {
        return Some(*cell);
    }
    rng.choose(legal).copied()
}

/// Find a cell in `legal` where placing `mark` completes a line.
/// Each candidate is placed, probed, and removed again.
pub(super) fn immediate_win(
    board: &mut BoardState,
    mark: Mark,
    legal: &[CellIndex],
) -> Option<CellIndex> {
    for &cell in legal {
        board.place(cell, mark);
        let wins = board.wins_at(cell, mark);
        board.unplace(cell);
        if wins {
            return Some(cell);
        }
    }
    None
}

/// The floored midpoint of every axis. Grids with an even axis length
/// have no exact center, so this lands on the lower-middle cell.
fn center_cell(grid: &Grid) -> Option<CellIndex> {
    let coords: Coords = grid.dimensions().iter().map(|&d| d / 2).collect();
    grid.coords_to_index(&coords).ok()
}

/// All cells whose every coordinate is 0 or the axis maximum.
fn corner_cells(grid: &Grid) -> Vec<CellIndex> {
    let dims = grid.dimensions();
    let n = dims.len();
    let mut corners = Vec::with_capacity(1 << n);
    for combo in 0..(1usize << n) {
        let coords: Coords = dims
            .iter()
            .enumerate()
            .map(|(axis, &d)| if combo & (1 << axis) == 0 { 0 } else { d - 1 })
            .collect();
        if let Ok(index) = grid.coords_to_index(&coords) {
            corners.push(index);
        }
    }
    corners
}

#[cfg(test)]
mod tests {
    use super::*;

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

        let legal = b.legal_moves();
        let mut rng = GameRng::new(0);
        // X completes the top row at 2 rather than blocking O.
        assert_eq!(choose(&mut b, Mark::X, &legal, &mut rng), Some(2));
    }

    #[test]
    fn test_blocks_opponent_win() {
        let mut b = board_3x3();
        b.apply_move(0, Mark::X).unwrap();
        b.apply_move(8, Mark::O).unwrap();
        b.apply_move(1, Mark::X).unwrap();

        let legal = b.legal_moves();
        let mut rng = GameRng::new(0);
        // O has no win of its own; it must block X at 2.
        assert_eq!(choose(&mut b, Mark::O, &legal, &mut rng), Some(2));
    }

    #[test]
    fn test_prefers_center_when_no_tactics() {
        let mut b = board_3x3();
        let legal = b.legal_moves();
        let mut rng = GameRng::new(0);
        assert_eq!(choose(&mut b, Mark::X, &legal, &mut rng), Some(4));
    }

    #[test]
    fn test_prefers_corner_when_center_taken() {
        let mut b = board_3x3();
        b.apply_move(4, Mark::X).unwrap();
        let legal = b.legal_moves();
        let mut rng = GameRng::new(0);
        let cell = choose(&mut b, Mark::O, &legal, &mut rng).unwrap();
        assert!([0, 2, 6, 8].contains(&cell));
    }

    #[test]
    fn test_probe_leaves_board_untouched() {
        let mut b = board_3x3();
        b.apply_move(0, Mark::X).unwrap();
        b.apply_move(4, Mark::O).unwrap();
        b.apply_move(1, Mark::X).unwrap();
        let before: Vec<_> = (0..9).map(|i| b.cell(i)).collect();

        let legal = b.legal_moves();
        let mut rng = GameRng::new(0);
        let _ = choose(&mut b, Mark::O, &legal, &mut rng);

        let after: Vec<_> = (0..9).map(|i| b.cell(i)).collect();
        assert_eq!(before, after);
        assert_eq!(b.occupied(), 3);
    }

    #[test]
    fn test_center_of_even_axis_is_floored() {
        let grid = Grid::new(&[4, 4]).unwrap();
        // (2, 2) flattens to 2 * 4 + 2.
        assert_eq!(center_cell(&grid), Some(10));
    }

    #[test]
    fn test_corners_of_cube() {
        let grid = Grid::new(&[3, 3, 3]).unwrap();
        let mut corners = corner_cells(&grid);
        corners.sort_unstable();
        assert_eq!(corners, vec![0, 2, 6, 8, 18, 20, 24, 26]);
    }
}
