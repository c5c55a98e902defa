//! Static floor field: weighted geodesic distance to one exit.
//!
//! The solver is a label-correcting relaxation, not Dijkstra. Every sweep
//! visits the whole grid and lets each cell that already holds a cost
//! offer `cost + step_weight` to its 8 neighbours. A neighbour accepts
//! the offer only if it is unvisited or the offer is strictly smaller.
//! Sweeps repeat until one changes nothing.
//!
//! Each sweep reads the current generation and writes a scratch
//! generation, which is then copied back. Costs only ever decrease and
//! are bounded below by zero, so the loop terminates.
//!
//! # Corner cutting
//!
//! ```text
//!   E #
//!   # D
//! ```
//!
//! A diagonal step from `E` to `D` is rejected when *both* flanking cells
//! are walls. `D` may still be reached by another route.

use std::time::Instant;

use exodus_core::{Coord, Potential};
use exodus_grid::neighbourhood::{neighbours, StepKind};
use exodus_grid::{CellKind, Grid, Matrix};

use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::metrics::StaticSolveMetrics;

/// Cost of an orthogonal step.
pub const ORTHOGONAL_WEIGHT: f64 = 1.0;

/// Computes the static field of one exit.
#[derive(Clone, Debug)]
pub struct StaticFieldSolver {
    diagonal_weight: f64,
    max_sweeps: Option<u32>,
}

impl StaticFieldSolver {
    /// A solver with the given diagonal weight, running to the fixpoint.
    pub fn new(diagonal_weight: f64) -> Self {
        Self {
            diagonal_weight,
            max_sweeps: None,
        }
    }

    /// A solver using the weight and sweep limit of `config`.
    pub fn from_config(config: &FieldConfig) -> Self {
        Self {
            diagonal_weight: config.diagonal_weight,
            max_sweeps: config.max_sweeps,
        }
    }

    /// The diagonal step weight.
    pub fn diagonal_weight(&self) -> f64 {
        self.diagonal_weight
    }

    /// Solve the static field for an exit occupying `exit_cells`, writing
    /// into `field`.
    ///
    /// On return every wall cell is [`Potential::Wall`], every exit cell is
    /// [`Potential::Exit`], every open cell reachable from the exit holds
    /// its minimum path cost, and unreachable open cells are
    /// [`Potential::Unvisited`]. Exit cells may sit on walls of the
    /// skeleton (doors); they are overridden.
    ///
    /// # Errors
    ///
    /// - [`FieldError::EmptyExitSet`] if `exit_cells` is empty.
    /// - [`FieldError::ExitOutOfBounds`] if an exit cell is off the grid.
    /// - [`FieldError::ShapeMismatch`] if `field` and `grid` differ in shape.
    /// - [`FieldError::AllocationFailed`] if the scratch matrix cannot be
    ///   allocated.
    /// - [`FieldError::SweepLimitExceeded`] if a sweep limit is configured
    ///   and reached before the fixpoint.
    pub fn solve(
        &self,
        grid: &Grid,
        exit_cells: &[Coord],
        field: &mut Matrix<Potential>,
    ) -> Result<StaticSolveMetrics, FieldError> {
        let started = Instant::now();
        let (rows, cols) = grid.dims();

        if exit_cells.is_empty() {
            return Err(FieldError::EmptyExitSet);
        }
        if let Some(&coord) = exit_cells.iter().find(|&&c| !grid.contains(c)) {
            return Err(FieldError::ExitOutOfBounds { coord, rows, cols });
        }
        if field.dims() != grid.dims() {
            return Err(FieldError::ShapeMismatch {
                expected: grid.dims(),
                found: field.dims(),
            });
        }

        for (coord, kind) in grid.cells().iter() {
            field[coord] = if kind == CellKind::Wall {
                Potential::Wall
            } else {
                Potential::Unvisited
            };
        }
        for &coord in exit_cells {
            field[coord] = Potential::Exit;
        }

        let mut next = Matrix::filled(rows, cols, Potential::Unvisited)?;
        next.copy_from(field);

        let mut sweeps = 0u32;
        let mut relaxations = 0u64;
        loop {
            if let Some(limit) = self.max_sweeps {
                if sweeps >= limit {
                    return Err(FieldError::SweepLimitExceeded { limit });
                }
            }
            sweeps += 1;
            let changes = self.sweep(field, &mut next);
            field.copy_from(&next);
            relaxations += changes;
            log::trace!("static sweep {sweeps}: {changes} changes");
            if changes == 0 {
                break;
            }
        }

        Ok(StaticSolveMetrics {
            sweeps,
            relaxations,
            unvisited_cells: unvisited_open_cells(grid, field),
            elapsed_us: started.elapsed().as_micros() as u64,
        })
    }

    /// One full relaxation sweep from `current` into `next`. Returns the
    /// number of cells changed.
    fn sweep(&self, current: &Matrix<Potential>, next: &mut Matrix<Potential>) -> u64 {
        let (rows, cols) = current.dims();
        let mut changes = 0;

        for (origin, potential) in current.iter() {
            let Some(base) = potential.cost() else {
                continue;
            };
            for nb in neighbours(origin, rows, cols) {
                let target = current[nb.coord];
                if target.is_wall() || target.is_exit() {
                    continue;
                }
                let weight = match nb.kind {
                    StepKind::Orthogonal => ORTHOGONAL_WEIGHT,
                    StepKind::Diagonal => {
                        if let Some([a, b]) = nb.flanks {
                            if current[a].is_wall() && current[b].is_wall() {
                                continue;
                            }
                        }
                        self.diagonal_weight
                    }
                };
                let candidate = base + weight;
                let accept = match next[nb.coord] {
                    Potential::Unvisited => true,
                    Potential::Value(v) => candidate < v,
                    Potential::Wall | Potential::Exit => false,
                };
                if accept {
                    next[nb.coord] = Potential::Value(candidate);
                    changes += 1;
                }
            }
        }
        changes
    }
}

impl Default for StaticFieldSolver {
    fn default() -> Self {
        Self::from_config(&FieldConfig::default())
    }
}

/// Count open cells of `grid` that `field` leaves unvisited.
///
/// Applied to one exit's static field this detects an exit that cannot
/// reach part of the floor; applied to the combined static field it counts
/// floor no exit reaches.
pub fn unvisited_open_cells(grid: &Grid, field: &Matrix<Potential>) -> usize {
    grid.open_cells()
        .filter(|&c| field.get(c).is_some_and(Potential::is_unvisited))
        .count()
}
