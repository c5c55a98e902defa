//! Solve metrics for static relaxation and per-step updates.
//!
//! All durations are in microseconds.

use exodus_core::StepId;

/// Metrics from one static-field solve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticSolveMetrics {
    /// Full sweeps run, including the final sweep that changed nothing.
    pub sweeps: u32,
    /// Relaxations that lowered (or first assigned) a cell's potential.
    pub relaxations: u64,
    /// Open cells still unvisited at the fixpoint.
    pub unvisited_cells: usize,
    /// Wall-clock time for the solve, in microseconds.
    pub elapsed_us: u64,
}

/// Metrics from one dynamic/final update of an exit-set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// The step these metrics describe.
    pub step: StepId,
    /// Pedestrians not yet exited in the snapshot.
    pub active_pedestrians: usize,
    /// Occupied cells each exit ranked, in registration order. Pedestrians
    /// on cells an exit cannot reach are left out of that exit's count.
    pub ranked_per_exit: Vec<usize>,
    /// Time spent in dynamic and final field computation across all exits.
    pub fields_us: u64,
    /// Time spent combining the final fields.
    pub combine_us: u64,
    /// Wall-clock time for the whole update.
    pub total_us: u64,
}
