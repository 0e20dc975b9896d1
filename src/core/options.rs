//! Variant configuration.
//!
//! The five historical variants (2D, fixed 3D, generic N-D, Ultimate 2D/3D)
//! collapse into one engine parameterized by an immutable `GameOptions`
//! value: the grid dimensions plus an ultimate-mode flag. A session holds
//! exactly one game instance; reset constructs a fresh one rather than
//! clearing in place.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::BoardState;
use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::ultimate::UltimateBoard;

/// Immutable configuration for one game variant.
///
/// ## Example
///
/// ```
/// use hypergrid::GameOptions;
///
/// let classic = GameOptions::new(&[3, 3]).unwrap();
/// let cube = GameOptions::new(&[3, 3, 3]).unwrap();
/// let ultimate = GameOptions::new(&[3, 3]).unwrap().with_ultimate();
///
/// assert_eq!(classic.dimensions(), &[3, 3]);
/// assert!(!cube.ultimate());
/// assert!(ultimate.ultimate());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    dimensions: SmallVec<[u16; 4]>,
    ultimate: bool,
}

impl GameOptions {
    /// Create options for a board with the given axis lengths.
    ///
    /// Fails with `InvalidGrid` if `dimensions` is empty or any entry
    /// is below 2.
    pub fn new(dimensions: &[u16]) -> Result<Self> {
        Grid::validate(dimensions)?;
        Ok(Self {
            dimensions: SmallVec::from_slice(dimensions),
            ultimate: false,
        })
    }

    /// Enable Ultimate (board-of-boards) mode.
    #[must_use]
    pub fn with_ultimate(mut self) -> Self {
        self.ultimate = true;
        self
    }

    /// Axis lengths of the (sub-)board.
    #[must_use]
    pub fn dimensions(&self) -> &[u16] {
        &self.dimensions
    }

    /// Whether Ultimate mode is enabled.
    #[must_use]
    pub const fn ultimate(&self) -> bool {
        self.ultimate
    }

    /// Start a fresh game for these options.
    ///
    /// Ultimate mode requires all axes to share one length (the meta
    /// board geometry is derived from it); anything else is rejected
    /// with `InvalidGrid`.
    pub fn start(&self) -> Result<Game> {
        if self.ultimate {
            Ok(Game::Ultimate(UltimateBoard::new(&self.dimensions)?))
        } else {
            Ok(Game::Single(BoardState::new(Grid::new(&self.dimensions)?)))
        }
    }
}

/// A running game instance, one per session.
#[derive(Clone, Debug)]
pub enum Game {
    /// A single flat board of any dimensionality.
    Single(BoardState),
    /// A board-of-boards with a derived meta board.
    Ultimate(UltimateBoard),
}
