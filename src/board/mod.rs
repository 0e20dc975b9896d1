//! Board state and rules engine.
//!
//! A `BoardState` owns a shared `Grid`, the cell occupancy, a
//! whose-turn indicator, and its life-cycle status. The state machine is
//! `Active -> Active` (non-terminal move), `Active -> Won` (a line is
//! uniformly marked), `Active -> Drawn` (full board, no line). `Won` and
//! `Drawn` are terminal: the board accepts no further moves until a
//! fresh one is constructed.
//!
//! Every rejected operation is a no-op; the engine never unmarks a cell.
//! Turn alternation is tracked but not enforced here — callers own it in
//! plain mode, and Ultimate mode enforces it at the composer level.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Mark;
use crate::error::{EngineError, IllegalMove, Result};
use crate::grid::{CellIndex, Grid, Line};

/// Life-cycle status of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The board accepts moves.
    Active,
    /// A line was completed; `line` is its id for highlighting.
    Won { mark: Mark, line: u32 },
    /// Every cell is occupied and no line was completed.
    Drawn,
}

impl Status {
    /// Whether the board accepts no further moves.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Status::Active)
    }

    /// The winning mark, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Mark> {
        match self {
            Status::Won { mark, .. } => Some(mark),
            _ => None,
        }
    }
}

/// Result of a successfully applied move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Status after the move.
    pub status: Status,
    /// Id of the completed line, when the move won.
    pub winning_line: Option<u32>,
}

/// One playable board of arbitrary dimensionality.
#[derive(Clone, Debug)]
pub struct BoardState {
    grid: Arc<Grid>,
    cells: Vec<Option<Mark>>,
    occupied: usize,
    to_move: Mark,
    status: Status,
}

impl BoardState {
    /// Create a fresh board over a grid, X to move.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self::with_grid(Arc::new(grid))
    }

    /// Create a fresh board sharing an existing grid (Ultimate mode
    /// creates many boards over the same geometry).
    #[must_use]
    pub fn with_grid(grid: Arc<Grid>) -> Self {
        let cells = vec![None; grid.total_cells()];
        Self {
            grid,
            cells,
            occupied: 0,
            to_move: Mark::X,
            status: Status::Active,
        }
    }

    /// The underlying grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Shared handle to the grid.
    #[must_use]
    pub fn grid_handle(&self) -> Arc<Grid> {
        Arc::clone(&self.grid)
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Whose turn the board believes it is. Advisory in plain mode.
    #[must_use]
    pub const fn to_move(&self) -> Mark {
        self.to_move
    }

    /// The mark at a cell, if any. Out-of-range indices read as empty.
    #[must_use]
    pub fn cell(&self, index: CellIndex) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    /// Number of occupied cells.
    #[must_use]
    pub const fn occupied(&self) -> usize {
        self.occupied
    }

    /// Whether every cell holds a mark.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupied == self.grid.total_cells()
    }

    /// The completed line, for presentation highlighting.
    #[must_use]
    pub fn winning_line(&self) -> Option<&Line> {
        match self.status {
            Status::Won { line, .. } => Some(self.grid.line(line)),
            _ => None,
        }
    }

    /// All playable cell indices. Empty when the board is terminal.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<CellIndex> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Apply a move at `index` for `mark`.
    ///
    /// Rejects without mutating when the board is terminal, the index is
    /// out of range, or the cell is occupied. On success the cell is
    /// marked, win/draw detection runs over the lines through that cell,
    /// and the new status is returned.
    pub fn apply_move(&mut self, index: CellIndex, mark: Mark) -> Result<MoveOutcome> {
        if self.status.is_terminal() {
            return Err(IllegalMove::Terminal.into());
        }
        if index >= self.grid.total_cells() {
            return Err(EngineError::IndexOutOfRange {
                index,
                total: self.grid.total_cells(),
            });
        }
        if self.cells[index].is_some() {
            return Err(IllegalMove::Occupied(index).into());
        }

        self.cells[index] = Some(mark);
        self.occupied += 1;
        self.to_move = mark.opposite();

        let won = self
            .grid
            .lines_through(index)
            .iter()
            .find(|&&id| self.line_uniformly(id, mark));

        if let Some(&line) = won {
            self.status = Status::Won { mark, line };
            debug!(index, %mark, line, "board won");
        } else if self.is_full() {
            self.status = Status::Drawn;
            debug!(index, %mark, "board drawn");
        }

        Ok(MoveOutcome {
            status: self.status,
            winning_line: match self.status {
                Status::Won { line, .. } => Some(line),
                _ => None,
            },
        })
    }

    /// Scan all lines in generation order for a full line of one mark.
    ///
    /// Returns the first match deterministically. A legal game can
    /// produce at most one new winning line per move, but hypothetical
    /// boards may hold several; no single-winner assumption is made.
    #[must_use]
    pub fn check_winner(&self) -> Option<(Mark, u32)> {
        for (id, line) in self.grid.lines().iter().enumerate() {
            if let Some(mark) = self.cell(line.cells()[0]) {
                if line.cells().iter().all(|&c| self.cells[c] == Some(mark)) {
                    return Some((mark, id as u32));
                }
            }
        }
        None
    }

    /// Draw is computed, not cached, so it stays correct on hypothetical
    /// boards: full with no winner.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.check_winner().is_none()
    }

    fn line_uniformly(&self, line: u32, mark: Mark) -> bool {
        self.grid
            .line(line)
            .cells()
            .iter()
            .all(|&c| self.cells[c] == Some(mark))
    }

    // === Hypothetical placement (AI search only) ===
    //
    // These bypass the rules path so the search engine can simulate and
    // restore a shared buffer. Every `place` must be paired with exactly
    // one `unplace` before the buffer is observed again.

    /// Place a mark without legality checks or status transitions.
    pub(crate) fn place(&mut self, index: CellIndex, mark: Mark) {
        debug_assert!(self.cells[index].is_none());
        self.cells[index] = Some(mark);
        self.occupied += 1;
    }

    /// Undo a hypothetical placement.
    pub(crate) fn unplace(&mut self, index: CellIndex) {
        debug_assert!(self.cells[index].is_some());
        self.cells[index] = None;
        self.occupied -= 1;
    }

    /// Whether `mark` completes a line through `index`.
    pub(crate) fn wins_at(&self, index: CellIndex, mark: Mark) -> bool {
        self.grid
            .lines_through(index)
            .iter()
            .any(|&id| self.line_uniformly(id, mark))
    }
}
