//! Exodus: a floor-field engine for cellular-automaton pedestrian
//! evacuation.
//!
//! This is the facade crate re-exporting the public API of the exodus
//! sub-crates. Movement rules live outside the engine: callers read the
//! combined final field and move each pedestrian toward lower potential.
//!
//! # Quick start
//!
//! ```rust
//! use exodus::prelude::*;
//!
//! // A 5x7 room with a door in the west wall.
//! let grid = Grid::parse("#######\n#.....#\n#.....#\n#.....#\n#######").unwrap();
//! assert_eq!(grid.dims(), (5, 7));
//!
//! let mut exits = ExitSet::new(&grid, FieldConfig::default().with_alfa(0.5)).unwrap();
//! let door = exits.register_exit(Coord::new(2, 0)).unwrap();
//! exits.compute_static_fields(&grid).unwrap();
//! exits.check_accessibility(&grid).unwrap();
//!
//! let crowd = [Pedestrian::new(2, 1), Pedestrian::new(2, 3)];
//! exits.compute_dynamic_and_final_fields(&grid, &crowd).unwrap();
//!
//! let field = exits.combined_final().unwrap();
//! assert_eq!(field[(2, 0)], Potential::Exit);
//! // Static distance 1, one pedestrian at or ahead of this cell.
//! assert_eq!(field[(2, 1)], Potential::Value(1.5));
//! assert_eq!(exits.exit(door).unwrap().cells(), &[Coord::new(2, 0)]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `exodus-core` | IDs, coordinates, cell potentials, pedestrians |
//! | [`grid`] | `exodus-grid` | Grid skeleton, matrices, neighbourhood |
//! | [`field`] | `exodus-field` | Solvers, exit registry, combination |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types (`exodus-core`).
pub use exodus_core as types;

/// Grid skeleton and matrix storage (`exodus-grid`).
///
/// [`grid::Grid`] is the wall/open skeleton; [`grid::Matrix`] is the flat
/// storage behind every field.
pub use exodus_grid as grid;

/// Floor-field solvers and the exit registry (`exodus-field`).
///
/// Most callers only need [`field::ExitSet`], also in the [`prelude`].
pub use exodus_field as field;

/// Common imports for typical exodus usage.
pub mod prelude {
    // Core types
    pub use exodus_core::{Congestion, Coord, ExitId, Pedestrian, Potential, StepId};

    // Grid
    pub use exodus_grid::{CellKind, Grid, GridError, Matrix};

    // Fields
    pub use exodus_field::{
        Exit, ExitSet, FieldConfig, FieldError, FieldKind, StaticSolveMetrics, StepMetrics,
    };
}
