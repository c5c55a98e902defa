//! Floor-field solvers for exodus.
//!
//! Each exit owns three fields over the grid: a static field holding the
//! geodesic cost to the exit, a dynamic field counting competing
//! pedestrians, and a final field merging the two. The [`ExitSet`]
//! registry drives the solvers and reduces every exit's fields to the
//! combined static and combined final fields that movement logic reads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod combine;
pub mod config;
pub mod dynamic_field;
pub mod error;
pub mod exit;
pub mod exit_set;
pub mod metrics;
pub mod order;
pub mod preference;
pub mod static_field;

pub use combine::{FieldCombiner, FieldKind};
pub use config::{ConfigError, FieldConfig, DEFAULT_DIAGONAL_WEIGHT};
pub use dynamic_field::DynamicFieldSolver;
pub use error::FieldError;
pub use exit::Exit;
pub use exit_set::ExitSet;
pub use metrics::{StaticSolveMetrics, StepMetrics};
pub use order::{lookup_ties, CellOrderIndex, OccupiedCell, TieLookup};
pub use preference::{exit_preference, PREFERENCE_TOLERANCE};
pub use static_field::{unvisited_open_cells, StaticFieldSolver, ORTHOGONAL_WEIGHT};
