//! Ultimate (board-of-boards) meta-game composition.
//!
//! One full board nests inside each cell of a derived meta board one
//! dimension lower: winning a sub-board marks the matching meta cell,
//! and the meta board is evaluated with the ordinary rules engine over
//! its own line set. The position just played projects onto a forced
//! next sub-board; if that target is already decided (won or full), the
//! constraint lifts and any undecided sub-board may be played.
//!
//! Meta geometry, preserved from the historical variants:
//! - `D == 2`: `S*S` sub-boards, meta grid `[g, g]` with
//!   `g = ceil(sqrt(sub_count))` — the familiar 3x3 meta for 3x3 boards.
//! - `D == 3`: `S` sub-cubes, one-dimensional meta grid `[S]`.
//! - `D > 3`: meta grid of `D - 1` axes of length `S`.
//!
//! The forced-board projection wraps modulo the sub-board count. This is
//! the documented normalization of the original rule set, not an error.

use std::sync::Arc;

use tracing::debug;

use crate::board::{BoardState, Status};
use crate::core::Mark;
use crate::error::{EngineError, IllegalMove, Result};
use crate::grid::{CellIndex, Grid};

/// Result of a successfully applied Ultimate move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UltimateOutcome {
    /// Overall game status after the move.
    pub status: Status,
    /// Status of the sub-board that was just played.
    pub sub_status: Status,
    /// The sub-board the next move is constrained to, if any.
    pub forced: Option<usize>,
}

/// A board-of-boards with a derived meta board.
#[derive(Clone, Debug)]
pub struct UltimateBoard {
    sub_grid: Arc<Grid>,
    subs: Vec<BoardState>,
    meta: BoardState,
    forced: Option<usize>,
    to_move: Mark,
    status: Status,
}

fn ceil_sqrt(n: usize) -> u16 {
    let mut root = (n as f64).sqrt() as usize;
    while root * root < n {
        root += 1;
    }
    root as u16
}

impl UltimateBoard {
    /// Create a fresh Ultimate game over sub-boards with the given axis
    /// lengths. All axes must share one length and there must be at
    /// least two of them; anything else fails with `InvalidGrid`.
    pub fn new(dimensions: &[u16]) -> Result<Self> {
        let sub_grid = Arc::new(Grid::new(dimensions)?);

        let ndims = dimensions.len();
        let size = dimensions[0];
        if ndims < 2 {
            return Err(EngineError::InvalidGrid(
                "ultimate mode needs at least two axes".to_string(),
            ));
        }
        if dimensions.iter().any(|&d| d != size) {
            return Err(EngineError::InvalidGrid(
                "ultimate mode requires equal axis lengths".to_string(),
            ));
        }

        let (sub_count, meta_dims): (usize, Vec<u16>) = match ndims {
            2 => {
                let count = (size as usize) * (size as usize);
                let g = ceil_sqrt(count);
                (count, vec![g, g])
            }
            3 => (size as usize, vec![size]),
            _ => (
                (size as usize).pow(ndims as u32 - 1),
                vec![size; ndims - 1],
            ),
        };

        let subs = (0..sub_count)
            .map(|_| BoardState::with_grid(Arc::clone(&sub_grid)))
            .collect();
        let meta = BoardState::new(Grid::new(&meta_dims)?);

        Ok(Self {
            sub_grid,
            subs,
            meta,
            forced: None,
            to_move: Mark::X,
            status: Status::Active,
        })
    }

    /// Number of sub-boards (= meta board cell count).
    #[must_use]
    pub fn sub_count(&self) -> usize {
        self.subs.len()
    }

    /// Cell count of one sub-board.
    #[must_use]
    pub fn sub_cells(&self) -> usize {
        self.sub_grid.total_cells()
    }

    /// A sub-board by index.
    #[must_use]
    pub fn sub(&self, board: usize) -> &BoardState {
        &self.subs[board]
    }

    /// The derived meta board.
    #[must_use]
    pub fn meta(&self) -> &BoardState {
        &self.meta
    }

    /// The sub-board the next move must be played in, or `None` when
    /// unconstrained.
    #[must_use]
    pub const fn forced_board(&self) -> Option<usize> {
        self.forced
    }

    /// Whose turn it is. Enforced here, unlike on plain boards.
    #[must_use]
    pub const fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Overall game status. A `Won` line id refers to the meta grid.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Combine (sub-board, intra-cell) into one flat index, sub-board
    /// most significant.
    #[must_use]
    pub fn combine_index(&self, board: usize, cell: CellIndex) -> CellIndex {
        board * self.sub_cells() + cell
    }

    /// Split a flat combined index into (sub-board, intra-cell).
    pub fn split_index(&self, index: CellIndex) -> Result<(usize, CellIndex)> {
        let total = self.sub_count() * self.sub_cells();
        if index >= total {
            return Err(EngineError::IndexOutOfRange { index, total });
        }
        Ok((index / self.sub_cells(), index % self.sub_cells()))
    }

    /// All playable (sub-board, intra-cell) pairs, honoring the forced
    /// constraint. Empty when the game is over.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<(usize, CellIndex)> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        let boards: Vec<usize> = match self.forced {
            Some(b) => vec![b],
            None => (0..self.subs.len())
                .filter(|&b| !self.subs[b].status().is_terminal())
                .collect(),
        };
        boards
            .into_iter()
            .flat_map(|b| {
                self.subs[b]
                    .legal_moves()
                    .into_iter()
                    .map(move |c| (b, c))
            })
            .collect()
    }

    /// Apply a move at `cell` of sub-board `board` for `mark`.
    ///
    /// Rejects without mutating when the game is over, it is not
    /// `mark`'s turn, a different sub-board is forced, the target
    /// sub-board is already decided, or the cell is occupied.
    pub fn apply_move(
        &mut self,
        board: usize,
        cell: CellIndex,
        mark: Mark,
    ) -> Result<UltimateOutcome> {
        if self.status.is_terminal() {
            return Err(IllegalMove::Terminal.into());
        }
        if mark != self.to_move {
            return Err(IllegalMove::OutOfTurn(mark).into());
        }
        if board >= self.subs.len() {
            return Err(EngineError::IndexOutOfRange {
                index: board,
                total: self.subs.len(),
            });
        }
        if let Some(required) = self.forced {
            if board != required {
                return Err(IllegalMove::WrongSubBoard { required }.into());
            }
        }
        if self.subs[board].status().is_terminal() {
            // Decided sub-boards accept no moves even when unconstrained.
            return Err(IllegalMove::Terminal.into());
        }

        // Cell occupancy and index range are checked by the sub-board;
        // nothing above mutated, so a rejection here is still a no-op.
        let sub_outcome = self.subs[board].apply_move(cell, mark)?;

        if let Status::Won { mark: winner, .. } = sub_outcome.status {
            debug!(board, %winner, "sub-board won");
            self.meta.apply_move(board, winner)?;
        }

        self.forced = self.project_forced(cell);
        self.to_move = mark.opposite();
        self.status = self.evaluate_overall();

        if self.status.is_terminal() {
            debug!(status = ?self.status, "ultimate game over");
            self.forced = None;
        }

        Ok(UltimateOutcome {
            status: self.status,
            sub_status: self.subs[board].status(),
            forced: self.forced,
        })
    }

    /// Project the intra-board position just played onto the next forced
    /// sub-board, lifting the constraint when the target is decided.
    ///
    /// `D == 2`: the intra cell index itself (mod sub count — a no-op for
    /// the classic square layout). `D >= 3`: the first intra-board
    /// coordinate, mod sub count. The modulo is the preserved wraparound
    /// normalization of the original rules.
    fn project_forced(&self, cell: CellIndex) -> Option<usize> {
        let target = if self.sub_grid.num_dimensions() == 2 {
            cell % self.subs.len()
        } else {
            // index_to_coords cannot fail: `cell` was just played.
            let coords = self.sub_grid.index_to_coords(cell).ok()?;
            coords[0] as usize % self.subs.len()
        };

        if self.subs[target].status().is_terminal() {
            None
        } else {
            Some(target)
        }
    }

    /// Overall result: a meta win ends the game; otherwise the game is
    /// drawn once every sub-board is decided with no meta winner.
    fn evaluate_overall(&self) -> Status {
        if let Status::Won { .. } = self.meta.status() {
            return self.meta.status();
        }
        if let Some((mark, line)) = self.meta.check_winner() {
            // Reachable only on hypothetical meta states; kept for the
            // same no-assumption discipline as the flat rules engine.
            return Status::Won { mark, line };
        }
        if self.subs.iter().all(|s| s.status().is_terminal()) {
            return Status::Drawn;
        }
        Status::Active
    }
}
