//! Grid geometry and matrix storage for exodus floor fields.
//!
//! This crate defines the immutable [`Grid`] skeleton (every cell is a
//! wall or open floor), the flat row-major [`Matrix`] used for every
//! floor field, and the 8-connected [`neighbourhood`] with its
//! corner-cutting test.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod matrix;
pub mod neighbourhood;

pub use error::GridError;
pub use grid::{CellKind, Grid};
pub use matrix::Matrix;
pub use neighbourhood::{Neighbour, StepKind};
