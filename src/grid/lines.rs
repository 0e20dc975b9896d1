//! Winning-line generation.
//!
//! Produces the exhaustive, duplicate-free set of winning lines for a
//! grid in three passes:
//!
//! 1. **Axis lines** — for each axis, one line per fixed assignment of
//!    every other axis. Count: Σ over axes of `total_cells / len(axis)`.
//! 2. **Planar diagonals** — for each unordered axis pair of *equal*
//!    length, the main and anti diagonal per fixed assignment of the
//!    remaining axes. Unequal pairs are skipped entirely: a rectangular
//!    sub-plane has no full-length corner-to-corner diagonal.
//! 3. **Hyper-diagonals** — only when every axis shares one length and
//!    there are more than two axes. Sign combinations are enumerated with
//!    the first axis fixed forward, so each geometric diagonal appears
//!    exactly once (2^(D-1) lines). The classic 3x3x3 grid therefore
//!    yields 27 + 18 + 4 = 49 lines.
//!
//! The rules engine treats a line as an unordered set of cells; the
//! stored order is simply traversal order.

use smallvec::SmallVec;

use super::{flat_index, CellIndex};

/// How a line runs through the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// Parallel to one axis.
    Axis(usize),
    /// Diagonal across a pair of equal-length axes.
    PlanarDiagonal,
    /// Corner-to-corner through every axis at once.
    HyperDiagonal,
}

/// A winning combination: `size` distinct cells that, uniformly marked,
/// constitute a win.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    cells: SmallVec<[CellIndex; 4]>,
    kind: LineKind,
}

impl Line {
    fn new(cells: SmallVec<[CellIndex; 4]>, kind: LineKind) -> Self {
        Self { cells, kind }
    }

    /// The cells of this line, in traversal order.
    #[must_use]
    pub fn cells(&self) -> &[CellIndex] {
        &self.cells
    }

    /// Number of cells (always the relevant axis length).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Lines are never empty; kept for clippy's `len` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The geometric kind of this line.
    #[must_use]
    pub const fn kind(&self) -> LineKind {
        self.kind
    }
}

/// Enumerate every assignment of the axes *not* listed in `varying`,
/// calling `visit` with the varying axes left at zero. Odometer order,
/// last axis fastest.
fn for_each_fixed(dimensions: &[u16], varying: &[usize], mut visit: impl FnMut(&[u16])) {
    let n = dimensions.len();
    let mut coords = vec![0u16; n];
    'outer: loop {
        visit(&coords);
        let mut i = n;
        while i > 0 {
            i -= 1;
            if varying.contains(&i) {
                continue;
            }
            coords[i] += 1;
            if coords[i] < dimensions[i] {
                continue 'outer;
            }
            coords[i] = 0;
        }
        return;
    }
}

/// Generate all winning lines for a dimension list (assumed valid).
pub(super) fn generate(dimensions: &[u16]) -> Vec<Line> {
    let mut lines = Vec::new();
    axis_lines(dimensions, &mut lines);
    planar_diagonals(dimensions, &mut lines);
    hyper_diagonals(dimensions, &mut lines);
    lines
}

fn axis_lines(dimensions: &[u16], out: &mut Vec<Line>) {
    for d in 0..dimensions.len() {
        for_each_fixed(dimensions, &[d], |fixed| {
            let mut coords = fixed.to_vec();
            let cells = (0..dimensions[d])
                .map(|k| {
                    coords[d] = k;
                    flat_index(dimensions, &coords)
                })
                .collect();
            out.push(Line::new(cells, LineKind::Axis(d)));
        });
    }
}

fn planar_diagonals(dimensions: &[u16], out: &mut Vec<Line>) {
    for d1 in 0..dimensions.len() {
        for d2 in (d1 + 1)..dimensions.len() {
            // Diagonals require equal axis lengths.
            if dimensions[d1] != dimensions[d2] {
                continue;
            }
            let size = dimensions[d1];

            for_each_fixed(dimensions, &[d1, d2], |fixed| {
                let mut coords = fixed.to_vec();

                // Main diagonal: both axes increase together.
                let main = (0..size)
                    .map(|k| {
                        coords[d1] = k;
                        coords[d2] = k;
                        flat_index(dimensions, &coords)
                    })
                    .collect();
                out.push(Line::new(main, LineKind::PlanarDiagonal));

                // Anti diagonal: one axis runs backwards.
                let anti = (0..size)
                    .map(|k| {
                        coords[d1] = k;
                        coords[d2] = size - 1 - k;
                        flat_index(dimensions, &coords)
                    })
                    .collect();
                out.push(Line::new(anti, LineKind::PlanarDiagonal));
            });
        }
    }
}

fn hyper_diagonals(dimensions: &[u16], out: &mut Vec<Line>) {
    let n = dimensions.len();
    if n <= 2 {
        // The two classic corner diagonals of a 2D board are already
        // covered by the planar pass.
        return;
    }
    let size = dimensions[0];
    if dimensions.iter().any(|&d| d != size) {
        return;
    }

    // Axis 0 always runs forward; the remaining axes take every
    // forward/reverse combination. Fixing axis 0 removes the reversed
    // traversal of each geometric diagonal.
    let mut coords = vec![0u16; n];
    for signs in 0..(1usize << (n - 1)) {
        let cells = (0..size)
            .map(|k| {
                coords[0] = k;
                for axis in 1..n {
                    let reversed = signs & (1 << (axis - 1)) != 0;
                    coords[axis] = if reversed { size - 1 - k } else { k };
                }
                flat_index(dimensions, &coords)
            })
            .collect();
        out.push(Line::new(cells, LineKind::HyperDiagonal));
    }
}
