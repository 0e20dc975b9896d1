//! N-dimensional grid and coordinate engine.
//!
//! A `Grid` is an N-dimensional hyper-rectangle described by its axis
//! lengths. Cells are addressed either by a flat `CellIndex` in
//! `[0, total_cells)` or by an N-tuple of coordinates; the two views are
//! bijective via mixed-radix encoding with axis 0 most significant
//! (axis 0 varies slowest).
//!
//! All winning lines are generated once at construction and are immutable
//! afterwards; a per-cell reverse map lets the rules engine evaluate only
//! the lines passing through the cell that just changed.

mod lines;

pub use lines::{Line, LineKind};

use smallvec::SmallVec;

use crate::error::{EngineError, Result};

/// Coordinate tuple, one component per axis.
pub type Coords = SmallVec<[u16; 4]>;

/// Flat cell index.
pub type CellIndex = usize;

/// An N-dimensional grid with precomputed winning lines.
#[derive(Clone, Debug)]
pub struct Grid {
    dimensions: SmallVec<[u16; 4]>,
    total_cells: usize,
    lines: Vec<Line>,
    /// For each cell, the ids of all lines containing it.
    lines_through: Vec<SmallVec<[u32; 8]>>,
}

/// Mixed-radix encoding with axis 0 most significant: scan from the last
/// axis to the first, accumulating the place-value multiplier.
pub(crate) fn flat_index(dimensions: &[u16], coords: &[u16]) -> usize {
    let mut index = 0;
    let mut multiplier = 1;
    for (i, &c) in coords.iter().enumerate().rev() {
        index += c as usize * multiplier;
        multiplier *= dimensions[i] as usize;
    }
    index
}

impl Grid {
    /// Validate a dimension list without building a grid.
    pub(crate) fn validate(dimensions: &[u16]) -> Result<()> {
        if dimensions.is_empty() {
            return Err(EngineError::InvalidGrid(
                "dimension list must not be empty".to_string(),
            ));
        }
        if let Some(&bad) = dimensions.iter().find(|&&d| d < 2) {
            return Err(EngineError::InvalidGrid(format!(
                "every axis must have length >= 2, got {bad}"
            )));
        }
        Ok(())
    }

    /// Create a grid and generate all of its winning lines.
    ///
    /// Fails with `InvalidGrid` if `dimensions` is empty or any entry
    /// is below 2.
    pub fn new(dimensions: &[u16]) -> Result<Self> {
        Self::validate(dimensions)?;

        let total_cells = dimensions.iter().map(|&d| d as usize).product();
        let lines = lines::generate(dimensions);

        let mut lines_through: Vec<SmallVec<[u32; 8]>> = vec![SmallVec::new(); total_cells];
        for (id, line) in lines.iter().enumerate() {
            for &cell in line.cells() {
                lines_through[cell].push(id as u32);
            }
        }

        Ok(Self {
            dimensions: SmallVec::from_slice(dimensions),
            total_cells,
            lines,
            lines_through,
        })
    }

    /// Axis lengths.
    #[must_use]
    pub fn dimensions(&self) -> &[u16] {
        &self.dimensions
    }

    /// Number of axes.
    #[must_use]
    pub fn num_dimensions(&self) -> usize {
        self.dimensions.len()
    }

    /// Total cell count (product of all axis lengths).
    #[must_use]
    pub const fn total_cells(&self) -> usize {
        self.total_cells
    }

    /// All winning lines, in generation order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// A single line by id.
    #[must_use]
    pub fn line(&self, id: u32) -> &Line {
        &self.lines[id as usize]
    }

    /// Ids of all lines passing through a cell.
    #[must_use]
    pub fn lines_through(&self, cell: CellIndex) -> &[u32] {
        &self.lines_through[cell]
    }

    /// Map a coordinate tuple to its flat cell index.
    ///
    /// Fails with `InvalidCoordinate` on wrong arity or any component
    /// outside its axis range.
    pub fn coords_to_index(&self, coords: &[u16]) -> Result<CellIndex> {
        if !self.is_valid_position(coords) {
            return Err(EngineError::InvalidCoordinate {
                coords: coords.to_vec(),
                dimensions: self.dimensions.to_vec(),
            });
        }
        Ok(flat_index(&self.dimensions, coords))
    }

    /// Map a flat cell index back to its coordinate tuple.
    ///
    /// Fails with `IndexOutOfRange` when `index >= total_cells`.
    pub fn index_to_coords(&self, index: CellIndex) -> Result<Coords> {
        if index >= self.total_cells {
            return Err(EngineError::IndexOutOfRange {
                index,
                total: self.total_cells,
            });
        }

        let mut coords: Coords = SmallVec::from_elem(0, self.dimensions.len());
        let mut remaining = index;
        for i in (0..self.dimensions.len()).rev() {
            let d = self.dimensions[i] as usize;
            coords[i] = (remaining % d) as u16;
            remaining /= d;
        }
        Ok(coords)
    }

    /// Total validation predicate: right arity and every component in
    /// range. Never errors; used to guard the other operations.
    #[must_use]
    pub fn is_valid_position(&self, coords: &[u16]) -> bool {
        coords.len() == self.dimensions.len()
            && coords.iter().zip(&self.dimensions).all(|(&c, &d)| c < d)
    }
}
