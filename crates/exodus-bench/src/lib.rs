//! Benchmark scenarios for the exodus floor-field engine.
//!
//! - [`reference_scenario`]: 100x100 walled room (10K cells), four doors
//! - [`stress_scenario`]: 316x316 walled room (~100K cells), four doors
//! - [`pillared_room`]: interior pillars so the relaxation has to route
//!   around obstacles

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use exodus_core::{Coord, Pedestrian};
use exodus_field::{ExitSet, FieldConfig, FieldError};
use exodus_grid::{Grid, GridError};
use exodus_test_utils::{scatter_pedestrians, walled_room};

/// A floor, its doors and a pedestrian snapshot.
pub struct Scenario {
    pub grid: Grid,
    pub exits: Vec<Coord>,
    pub pedestrians: Vec<Pedestrian>,
}

impl Scenario {
    /// Register every door and solve the static fields.
    pub fn exit_set(&self, config: FieldConfig) -> Result<ExitSet, FieldError> {
        let mut set = ExitSet::new(&self.grid, config)?;
        for &door in &self.exits {
            set.register_exit(door)?;
        }
        set.compute_static_fields(&self.grid)?;
        Ok(set)
    }
}

/// One door in the middle of each side of a `size x size` walled room.
pub fn side_doors(size: usize) -> Vec<Coord> {
    let mid = size / 2;
    vec![
        Coord::new(0, mid),
        Coord::new(size - 1, mid),
        Coord::new(mid, 0),
        Coord::new(mid, size - 1),
    ]
}

/// 100x100 walled room with four doors and 1% occupancy.
pub fn reference_scenario(seed: u64) -> Scenario {
    let grid = walled_room(100, 100);
    let pedestrians = scatter_pedestrians(&grid, 100, seed);
    Scenario {
        grid,
        exits: side_doors(100),
        pedestrians,
    }
}

/// 316x316 walled room with four doors and 1% occupancy.
pub fn stress_scenario(seed: u64) -> Scenario {
    let grid = walled_room(316, 316);
    let pedestrians = scatter_pedestrians(&grid, 1000, seed);
    Scenario {
        grid,
        exits: side_doors(316),
        pedestrians,
    }
}

/// `size x size` walled room with a 2x2 pillar every `spacing` cells.
pub fn pillared_room(size: usize, spacing: usize) -> Result<Grid, GridError> {
    let pillars = (spacing..size.saturating_sub(2))
        .step_by(spacing.max(1))
        .flat_map(|r| {
            (spacing..size.saturating_sub(2))
                .step_by(spacing.max(1))
                .map(move |c| (r, c))
        })
        .flat_map(|(r, c)| {
            [(r, c), (r + 1, c), (r, c + 1), (r + 1, c + 1)].map(|(r, c)| Coord::new(r, c))
        });
    walled_room(size, size).with_walls(pillars)
}
