//! Core types for the exodus floor-field engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: identifiers and
//! coordinates, the values a floor-field cell can hold, and the
//! pedestrian snapshot consumed by the dynamic field.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod pedestrian;
pub mod potential;

pub use id::{Coord, ExitId, StepId};
pub use pedestrian::{active_pedestrians, Pedestrian};
pub use potential::{Congestion, Potential};
