//! Errors for grid construction and matrix allocation.

use exodus_core::Coord;
use std::error::Error;
use std::fmt;

/// Errors arising from grid construction or matrix storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Attempted to build a grid or matrix with zero cells.
    EmptyGrid,
    /// `rows * cols` does not fit in `usize`.
    DimensionOverflow {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },
    /// The backing buffer could not be allocated.
    AllocationFailed {
        /// Number of cells requested.
        cells: usize,
    },
    /// A coordinate lies outside the grid.
    CoordOutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Grid rows.
        rows: usize,
        /// Grid columns.
        cols: usize,
    },
    /// A text row has a different width than the first row.
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A text cell is neither `#` nor `.`.
    UnknownGlyph {
        /// Position of the glyph.
        coord: Coord,
        /// The glyph itself.
        glyph: char,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::DimensionOverflow { rows, cols } => {
                write!(f, "grid dimensions {rows}x{cols} overflow usize")
            }
            Self::AllocationFailed { cells } => {
                write!(f, "failed to allocate matrix of {cells} cells")
            }
            Self::CoordOutOfBounds { coord, rows, cols } => {
                write!(f, "coordinate {coord} out of bounds: [0, {rows}) x [0, {cols})")
            }
            Self::RaggedRow {
                row,
                expected,
                found,
            } => {
                write!(f, "row {row} has {found} cells, expected {expected}")
            }
            Self::UnknownGlyph { coord, glyph } => {
                write!(f, "unknown glyph {glyph:?} at {coord}")
            }
        }
    }
}

impl Error for GridError {}
