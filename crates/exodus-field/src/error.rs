//! Error types for floor-field computation.
//!
//! Two classes of failure exist: invalid arguments, which are rejected
//! before anything is mutated, and allocation failures, which are fatal
//! for the call that hit them. Nothing in this crate retries.

use std::error::Error;
use std::fmt;

use exodus_core::{Coord, ExitId};
use exodus_grid::GridError;

use crate::combine::FieldKind;
use crate::config::ConfigError;

/// Errors from exit registration and field solves.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldError {
    /// The field configuration failed validation.
    Config(ConfigError),
    /// A grid or matrix operation failed.
    Grid(GridError),
    /// A matrix or occupied-cell buffer could not be allocated.
    AllocationFailed {
        /// Which buffer was being allocated.
        what: &'static str,
        /// Number of elements requested.
        len: usize,
    },
    /// An exit location lies outside the grid.
    ExitOutOfBounds {
        /// The offending location.
        coord: Coord,
        /// Grid rows.
        rows: usize,
        /// Grid columns.
        cols: usize,
    },
    /// The location already belongs to a registered exit.
    DuplicateExit {
        /// The contested location.
        coord: Coord,
        /// The exit that already owns it.
        existing: ExitId,
    },
    /// No exit with this ID is registered.
    UnknownExit {
        /// The unrecognised ID.
        exit: ExitId,
    },
    /// A solve was requested on an exit-set with no exits.
    EmptyExitSet,
    /// A matrix or grid does not have the exit-set's dimensions.
    ShapeMismatch {
        /// `(rows, cols)` of the exit-set.
        expected: (usize, usize),
        /// `(rows, cols)` that was supplied.
        found: (usize, usize),
    },
    /// Fields of this kind have not been computed for the current
    /// exit-set yet.
    NotComputed {
        /// The missing field kind.
        kind: FieldKind,
    },
    /// An active pedestrian stands outside the grid.
    PedestrianOutOfBounds {
        /// Index of the pedestrian in the snapshot.
        index: usize,
        /// Its position.
        coord: Coord,
    },
    /// Static relaxation did not reach a fixpoint within the configured
    /// sweep limit.
    SweepLimitExceeded {
        /// The configured limit.
        limit: u32,
    },
    /// Open cells remain unreachable from an exit after its static field
    /// reached the fixpoint.
    ExitUnreachable {
        /// The exit whose field has gaps.
        exit: ExitId,
        /// Number of open cells left unvisited.
        unvisited: usize,
    },
}

impl FieldError {
    /// Whether this error is an allocation failure rather than a rejected
    /// argument.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::AllocationFailed { what, len } => {
                write!(f, "failed to allocate {what} ({len} elements)")
            }
            Self::ExitOutOfBounds { coord, rows, cols } => {
                write!(f, "exit {coord} outside grid [0, {rows}) x [0, {cols})")
            }
            Self::DuplicateExit { coord, existing } => {
                write!(f, "location {coord} already belongs to exit {existing}")
            }
            Self::UnknownExit { exit } => write!(f, "unknown exit: {exit}"),
            Self::EmptyExitSet => write!(f, "exit-set has no exits"),
            Self::ShapeMismatch { expected, found } => write!(
                f,
                "shape mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            Self::NotComputed { kind } => write!(f, "{kind} fields not computed"),
            Self::PedestrianOutOfBounds { index, coord } => {
                write!(f, "pedestrian {index} at {coord} is outside the grid")
            }
            Self::SweepLimitExceeded { limit } => {
                write!(f, "static relaxation exceeded {limit} sweeps")
            }
            Self::ExitUnreachable { exit, unvisited } => {
                write!(f, "exit {exit} cannot reach {unvisited} open cells")
            }
        }
    }
}

impl Error for FieldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for FieldError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GridError> for FieldError {
    fn from(e: GridError) -> Self {
        match e {
            GridError::AllocationFailed { cells } => Self::AllocationFailed {
                what: "field matrix",
                len: cells,
            },
            other => Self::Grid(other),
        }
    }
}
