//! Computer opponents.
//!
//! Three tiers, selectable independently of board size:
//!
//! - **Random**: uniform choice among legal moves.
//! - **Heuristic**: win-now, block-now, then positional preference
//!   (center, corners), then random.
//! - **Minimax**: depth-limited minimax with alpha-beta pruning over a
//!   shared scratch buffer (simulate, recurse, undo — never copying the
//!   board per branch).
//!
//! `choose_move` is a pure function of the given state and config: the
//! only internal state is the depth-limited search itself, and the
//! seeded RNG makes the random paths reproducible.

mod heuristic;
mod minimax;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::board::BoardState;
use crate::core::{GameRng, Mark};
use crate::grid::CellIndex;
use crate::ultimate::UltimateBoard;

/// AI difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Uniform random among legal moves.
    Random,
    /// Tactical ladder: win, block, center, corner, random.
    Heuristic,
    /// Depth-limited minimax with alpha-beta pruning.
    Minimax,
}

/// AI configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Which tier to play.
    pub difficulty: Difficulty,

    /// Maximum search depth in plies for the minimax tier. Boards beyond
    /// the classic 3x3 make full-depth search infeasible, so the cap is
    /// always applied; positions at the cap score as neutral.
    pub max_depth: u32,

    /// Seed for the random tier and random tie-breaking.
    pub seed: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Heuristic,
            max_depth: 6,
            seed: 42,
        }
    }
}

impl AiConfig {
    /// Select a difficulty tier.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the minimax depth cap.
    #[must_use]
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Choose a move for `mark` on a flat board.
///
/// Returns `None` only when the board has zero legal moves — with
/// correct terminal detection upstream that signals an internal
/// inconsistency in the caller, not a normal outcome.
#[must_use]
pub fn choose_move(board: &BoardState, mark: Mark, config: &AiConfig) -> Option<CellIndex> {
    let legal = board.legal_moves();
    if legal.is_empty() {
        return None;
    }

    let mut rng = GameRng::new(config.seed);
    let chosen = match config.difficulty {
        Difficulty::Random => rng.choose(&legal).copied(),
        Difficulty::Heuristic => {
            let mut scratch = board.clone();
            heuristic::choose(&mut scratch, mark, &legal, &mut rng)
        }
        Difficulty::Minimax => {
            let mut scratch = board.clone();
            minimax::search(&mut scratch, mark, config.max_depth).map(|(cell, _)| cell)
        }
    };

    trace!(?chosen, %mark, difficulty = ?config.difficulty, "move selected");
    chosen
}

/// Choose a (sub-board, intra-cell) move for `mark` in an Ultimate game.
///
/// All tiers honor the forced-board constraint. The minimax tier
/// evaluates each candidate sub-board independently and plays the best
/// local result.
#[must_use]
pub fn choose_move_ultimate(
    game: &UltimateBoard,
    mark: Mark,
    config: &AiConfig,
) -> Option<(usize, CellIndex)> {
    let legal = game.legal_moves();
    if legal.is_empty() {
        return None;
    }

    let mut rng = GameRng::new(config.seed);
    match config.difficulty {
        Difficulty::Random => rng.choose(&legal).copied(),
        Difficulty::Heuristic => {
            // Completing a sub-board (or denying the opponent one)
            // dominates any positional preference.
            if let Some(found) = find_sub_board_win(game, &legal, mark) {
                return Some(found);
            }
            if let Some(found) = find_sub_board_win(game, &legal, mark.opposite()) {
                return Some(found);
            }
            // Fall back to the flat ladder within the first candidate
            // sub-board (the forced one whenever a constraint exists).
            let board = legal.first().map(|&(b, _)| b)?;
            let cells: Vec<CellIndex> = legal
                .iter()
                .filter(|&&(b, _)| b == board)
                .map(|&(_, c)| c)
                .collect();
            let mut scratch = game.sub(board).clone();
            heuristic::choose(&mut scratch, mark, &cells, &mut rng).map(|c| (board, c))
        }
        Difficulty::Minimax => {
            let mut best: Option<(usize, CellIndex)> = None;
            let mut best_score = i32::MIN;
            for board in candidate_boards(&legal) {
                let mut scratch = game.sub(board).clone();
                if let Some((cell, score)) = minimax::search(&mut scratch, mark, config.max_depth)
                {
                    if best.is_none() || score > best_score {
                        best = Some((board, cell));
                        best_score = score;
                    }
                }
            }
            best
        }
    }
}

/// Distinct sub-boards appearing in a legal-move list, in order.
fn candidate_boards(legal: &[(usize, CellIndex)]) -> Vec<usize> {
    let mut boards = Vec::new();
    for &(b, _) in legal {
        if boards.last() != Some(&b) {
            boards.push(b);
        }
    }
    boards
}

/// Find a legal move that completes a line for `mark` inside its
/// sub-board, probing hypothetically and restoring state.
fn find_sub_board_win(
    game: &UltimateBoard,
    legal: &[(usize, CellIndex)],
    mark: Mark,
) -> Option<(usize, CellIndex)> {
    for board in candidate_boards(legal) {
        let mut scratch = game.sub(board).clone();
        let cells: Vec<CellIndex> = legal
            .iter()
            .filter(|&&(b, _)| b == board)
            .map(|&(_, c)| c)
            .collect();
        if let Some(cell) = heuristic::immediate_win(&mut scratch, mark, &cells) {
            return Some((board, cell));
        }
    }
    None
}
