//! The exit-set: registry and lifecycle of all exits for one scenario.
//!
//! Lifecycle per scenario:
//!
//! 1. [`register_exit`](ExitSet::register_exit) (and optionally
//!    [`expand_exit`](ExitSet::expand_exit)) for every exit.
//! 2. [`compute_static_fields`](ExitSet::compute_static_fields) once,
//!    which also builds the combined static field.
//! 3. [`check_accessibility`](ExitSet::check_accessibility) to reject
//!    exit-sets where some exit cannot reach the whole floor.
//! 4. [`compute_dynamic_and_final_fields`](ExitSet::compute_dynamic_and_final_fields)
//!    every time step, which rebuilds the combined final field.
//! 5. [`release`](ExitSet::release) (or drop) to tear everything down.
//!
//! The exit-set owns every matrix outright. The grid and pedestrian
//! snapshot are passed in by reference on each call and must not change
//! shape between calls.

use std::time::Instant;

use exodus_core::{active_pedestrians, Coord, ExitId, Pedestrian, Potential, StepId};
use exodus_grid::{Grid, Matrix};
use indexmap::IndexMap;

use crate::combine::{FieldCombiner, FieldKind};
use crate::config::FieldConfig;
use crate::dynamic_field::{check_positions, DynamicFieldSolver};
use crate::error::FieldError;
use crate::exit::Exit;
use crate::metrics::{StaticSolveMetrics, StepMetrics};
use crate::preference::exit_preference;
use crate::static_field::{unvisited_open_cells, StaticFieldSolver};

/// All exits of one scenario together with their combined fields.
#[derive(Debug)]
pub struct ExitSet {
    config: FieldConfig,
    rows: usize,
    cols: usize,
    exits: Vec<Exit>,
    /// Every exit cell mapped to the exit that owns it, in registration order.
    owners: IndexMap<Coord, ExitId>,
    combined_static: Option<Matrix<Potential>>,
    combined_final: Option<Matrix<Potential>>,
    static_metrics: Vec<StaticSolveMetrics>,
    last_step: StepMetrics,
    step: StepId,
}

impl ExitSet {
    /// Create an empty exit-set for grids shaped like `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Config`] if `config` fails validation.
    pub fn new(grid: &Grid, config: FieldConfig) -> Result<Self, FieldError> {
        config.validate()?;
        let (rows, cols) = grid.dims();
        Ok(Self {
            config,
            rows,
            cols,
            exits: Vec::new(),
            owners: IndexMap::new(),
            combined_static: None,
            combined_final: None,
            static_metrics: Vec::new(),
            last_step: StepMetrics::default(),
            step: StepId::default(),
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// `(rows, cols)` of every field in this set.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of registered exits.
    pub fn len(&self) -> usize {
        self.exits.len()
    }

    /// Whether no exit is registered.
    pub fn is_empty(&self) -> bool {
        self.exits.is_empty()
    }

    /// Exits in registration order.
    pub fn exits(&self) -> &[Exit] {
        &self.exits
    }

    /// Look up an exit by ID.
    pub fn exit(&self, id: ExitId) -> Option<&Exit> {
        self.exits.get(id.0 as usize)
    }

    /// The exit owning the cell at `coord`, if any.
    pub fn owner_of(&self, coord: Coord) -> Option<ExitId> {
        self.owners.get(&coord).copied()
    }

    /// Combined static field, once [`compute_static_fields`](Self::compute_static_fields)
    /// has run.
    pub fn combined_static(&self) -> Option<&Matrix<Potential>> {
        self.combined_static.as_ref()
    }

    /// Combined final field from the latest step.
    pub fn combined_final(&self) -> Option<&Matrix<Potential>> {
        self.combined_final.as_ref()
    }

    /// Per-exit metrics of the latest static solve, in registration order.
    pub fn static_metrics(&self) -> &[StaticSolveMetrics] {
        &self.static_metrics
    }

    /// Metrics of the latest dynamic/final update.
    pub fn last_step_metrics(&self) -> &StepMetrics {
        &self.last_step
    }

    /// Number of dynamic/final updates since the static fields were built.
    pub fn step_id(&self) -> StepId {
        self.step
    }

    /// Register a new exit at `coord` and allocate its fields.
    ///
    /// Registering invalidates any previously computed fields.
    ///
    /// # Errors
    ///
    /// - [`FieldError::ExitOutOfBounds`] if `coord` is off the grid.
    /// - [`FieldError::DuplicateExit`] if `coord` already belongs to an exit.
    /// - [`FieldError::AllocationFailed`] if the field matrices cannot be
    ///   allocated. The set is unchanged in every error case.
    pub fn register_exit(&mut self, coord: Coord) -> Result<ExitId, FieldError> {
        self.check_free(coord)?;
        let id = ExitId(self.exits.len() as u32);
        let exit = Exit::new(id, coord, self.rows, self.cols)?;

        self.exits.push(exit);
        self.owners.insert(coord, id);
        self.invalidate();
        log::debug!("registered exit {id} at {coord}");
        Ok(id)
    }

    /// Widen exit `id` with the cell at `coord`.
    ///
    /// # Errors
    ///
    /// [`FieldError::UnknownExit`], [`FieldError::ExitOutOfBounds`] or
    /// [`FieldError::DuplicateExit`]; the set is unchanged on error.
    pub fn expand_exit(&mut self, id: ExitId, coord: Coord) -> Result<(), FieldError> {
        if self.exit(id).is_none() {
            return Err(FieldError::UnknownExit { exit: id });
        }
        self.check_free(coord)?;

        self.exits[id.0 as usize].push_cell(coord);
        self.owners.insert(coord, id);
        self.invalidate();
        log::debug!("expanded exit {id} with {coord}");
        Ok(())
    }

    /// Solve the static field of every exit, then build the combined
    /// static field.
    ///
    /// # Errors
    ///
    /// - [`FieldError::EmptyExitSet`] with no exits registered.
    /// - [`FieldError::ShapeMismatch`] if `grid` is not shaped like the set.
    /// - Any error from [`StaticFieldSolver::solve`]. Fields stay marked as
    ///   not computed after a failure.
    pub fn compute_static_fields(&mut self, grid: &Grid) -> Result<(), FieldError> {
        self.check_grid(grid)?;
        if self.exits.is_empty() {
            return Err(FieldError::EmptyExitSet);
        }
        self.invalidate();

        let solver = StaticFieldSolver::from_config(&self.config);
        let mut metrics = Vec::with_capacity(self.exits.len());
        for exit in &mut self.exits {
            let cells: Vec<Coord> = exit.cells().to_vec();
            let m = solver.solve(grid, &cells, exit.static_field_mut())?;
            log::debug!(
                "static field for exit {}: {} sweeps, {} relaxations, {} unvisited",
                exit.id(),
                m.sweeps,
                m.relaxations,
                m.unvisited_cells
            );
            metrics.push(m);
        }

        let mut combined = Matrix::filled(self.rows, self.cols, Potential::Unvisited)?;
        FieldCombiner.combine_exits(&self.exits, FieldKind::Static, &mut combined)?;

        self.static_metrics = metrics;
        self.combined_static = Some(combined);
        Ok(())
    }

    /// Verify that every exit reaches every open cell of `grid`.
    ///
    /// # Errors
    ///
    /// - [`FieldError::NotComputed`] before static fields exist.
    /// - [`FieldError::ExitUnreachable`] for the first exit, in registration
    ///   order, whose static field leaves open cells unvisited.
    pub fn check_accessibility(&self, grid: &Grid) -> Result<(), FieldError> {
        self.check_grid(grid)?;
        self.require(FieldKind::Static)?;
        for exit in &self.exits {
            let unvisited = exit.unvisited_cells(grid);
            if unvisited > 0 {
                log::warn!("exit {} at {} cannot reach {unvisited} open cells", exit.id(), exit.anchor());
                return Err(FieldError::ExitUnreachable {
                    exit: exit.id(),
                    unvisited,
                });
            }
        }
        Ok(())
    }

    /// Open cells of `grid` that exit `id` does not reach.
    pub fn unvisited_cells(&self, id: ExitId, grid: &Grid) -> Result<usize, FieldError> {
        self.check_grid(grid)?;
        self.require(FieldKind::Static)?;
        let exit = self.exit(id).ok_or(FieldError::UnknownExit { exit: id })?;
        Ok(exit.unvisited_cells(grid))
    }

    /// Open cells that no exit reaches, according to the combined static
    /// field.
    pub fn unreachable_cells(&self, grid: &Grid) -> Result<usize, FieldError> {
        self.check_grid(grid)?;
        let combined = self
            .combined_static
            .as_ref()
            .ok_or(FieldError::NotComputed {
                kind: FieldKind::Static,
            })?;
        Ok(unvisited_open_cells(grid, combined))
    }

    /// Recompute every exit's dynamic and final field from `pedestrians`,
    /// then rebuild the combined final field. Returns the new step ID.
    ///
    /// # Errors
    ///
    /// - [`FieldError::ShapeMismatch`] if `grid` is not shaped like the set.
    /// - [`FieldError::NotComputed`] before static fields exist.
    /// - [`FieldError::PedestrianOutOfBounds`] if an active pedestrian is
    ///   off the grid. Nothing is written in that case.
    /// - [`FieldError::AllocationFailed`] from the occupied-cell list or the
    ///   combined matrix.
    pub fn compute_dynamic_and_final_fields(
        &mut self,
        grid: &Grid,
        pedestrians: &[Pedestrian],
    ) -> Result<StepId, FieldError> {
        let started = Instant::now();
        self.check_grid(grid)?;
        self.require(FieldKind::Static)?;
        check_positions(grid, pedestrians)?;

        let alfa = self.config.alfa;
        let mut ranked_per_exit = Vec::with_capacity(self.exits.len());
        for exit in &mut self.exits {
            let (static_field, dynamic_field) = exit.dynamic_parts();
            ranked_per_exit.push(DynamicFieldSolver.solve(grid, static_field, pedestrians, dynamic_field)?);
            exit.finalize(alfa);
        }
        let fields_us = started.elapsed().as_micros() as u64;

        let combine_started = Instant::now();
        let combined = match self.combined_final.take() {
            Some(m) => m,
            None => Matrix::filled(self.rows, self.cols, Potential::Unvisited)?,
        };
        let combined = self.combined_final.insert(combined);
        FieldCombiner.combine_exits(&self.exits, FieldKind::Final, combined)?;
        let combine_us = combine_started.elapsed().as_micros() as u64;

        self.step = StepId(self.step.0 + 1);
        let active = active_pedestrians(pedestrians).count();
        log::debug!(
            "step {}: {} active pedestrians, ranked per exit {:?}",
            self.step,
            active,
            ranked_per_exit
        );
        self.last_step = StepMetrics {
            step: self.step,
            active_pedestrians: active,
            ranked_per_exit,
            fields_us,
            combine_us,
            total_us: started.elapsed().as_micros() as u64,
        };
        Ok(self.step)
    }

    /// Preference split of active pedestrians between exits `a` and `b`.
    ///
    /// Uses the static fields when alfa is zero and the final fields
    /// otherwise. See [`exit_preference`].
    pub fn exit_preference(
        &self,
        a: ExitId,
        b: ExitId,
        pedestrians: &[Pedestrian],
    ) -> Result<Option<f64>, FieldError> {
        let kind = if self.config.alfa == 0.0 {
            FieldKind::Static
        } else {
            FieldKind::Final
        };
        self.require(kind)?;
        let exit_a = self.exit(a).ok_or(FieldError::UnknownExit { exit: a })?;
        let exit_b = self.exit(b).ok_or(FieldError::UnknownExit { exit: b })?;
        Ok(exit_preference(exit_a, exit_b, kind, pedestrians))
    }

    /// Tear down every exit and combined field. The set can be reused for
    /// the next scenario.
    pub fn release(&mut self) {
        log::debug!("releasing exit-set with {} exits", self.exits.len());
        self.exits = Vec::new();
        self.owners = IndexMap::new();
        self.combined_static = None;
        self.combined_final = None;
        self.static_metrics = Vec::new();
        self.last_step = StepMetrics::default();
        self.step = StepId::default();
    }

    /// Bytes held by every exit and combined matrix.
    pub fn memory_bytes(&self) -> usize {
        self.exits.iter().map(Exit::memory_bytes).sum::<usize>()
            + self.combined_static.as_ref().map_or(0, Matrix::memory_bytes)
            + self.combined_final.as_ref().map_or(0, Matrix::memory_bytes)
    }

    fn check_free(&self, coord: Coord) -> Result<(), FieldError> {
        if coord.row >= self.rows || coord.col >= self.cols {
            return Err(FieldError::ExitOutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if let Some(&existing) = self.owners.get(&coord) {
            return Err(FieldError::DuplicateExit { coord, existing });
        }
        Ok(())
    }

    fn check_grid(&self, grid: &Grid) -> Result<(), FieldError> {
        if grid.dims() == self.dims() {
            Ok(())
        } else {
            Err(FieldError::ShapeMismatch {
                expected: self.dims(),
                found: grid.dims(),
            })
        }
    }

    fn require(&self, kind: FieldKind) -> Result<(), FieldError> {
        let ready = match kind {
            FieldKind::Static => self.combined_static.is_some(),
            FieldKind::Final => self.combined_final.is_some(),
        };
        if ready {
            Ok(())
        } else {
            Err(FieldError::NotComputed { kind })
        }
    }

    fn invalidate(&mut self) {
        self.combined_static = None;
        self.combined_final = None;
        self.static_metrics.clear();
        self.step = StepId::default();
    }
}
