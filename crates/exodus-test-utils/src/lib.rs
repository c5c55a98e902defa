//! Grid and pedestrian fixtures for exodus development.
//!
//! Small hand-drawn floors for unit and integration tests, plus seeded
//! pedestrian scattering for benches and property tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use exodus_core::{Coord, Pedestrian};
use exodus_grid::{Grid, GridError};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Parse a fixture drawn with `#` and `.`, panicking on a malformed drawing.
pub fn grid_from(text: &str) -> Grid {
    match Grid::parse(text) {
        Ok(grid) => grid,
        Err(e) => panic!("bad fixture grid: {e}"),
    }
}

/// An obstacle-free `rows x cols` floor.
pub fn open_room(rows: usize, cols: usize) -> Grid {
    match Grid::open(rows, cols) {
        Ok(grid) => grid,
        Err(e) => panic!("bad fixture dims {rows}x{cols}: {e}"),
    }
}

/// A `rows x cols` floor whose border is wall. Doors are registered as
/// exits on border cells.
pub fn walled_room(rows: usize, cols: usize) -> Grid {
    let border = (0..rows).flat_map(move |r| {
        (0..cols)
            .filter(move |&c| r == 0 || c == 0 || r + 1 == rows || c + 1 == cols)
            .map(move |c| Coord::new(r, c))
    });
    let built: Result<Grid, GridError> = open_room(rows, cols).with_walls(border);
    match built {
        Ok(grid) => grid,
        Err(e) => panic!("bad walled room {rows}x{cols}: {e}"),
    }
}

/// 4x4 floor with an exit pocket at (1, 1).
///
/// Walls at (1, 2) and (2, 1) block both orthogonal routes out of the
/// pocket toward (2, 2), so the diagonal (1, 1) -> (2, 2) is a corner
/// cut and (2, 2) must be reached the long way round.
pub fn corner_pocket() -> (Grid, Coord) {
    let grid = grid_from(
        "
        ....
        ..#.
        .#..
        ....
        ",
    );
    (grid, Coord::new(1, 1))
}

/// 3x3 floor whose centre is reachable from (0, 0) only by a corner cut.
pub fn sealed_diagonal() -> (Grid, Coord) {
    let grid = grid_from(
        "
        .#.
        #..
        ...
        ",
    );
    (grid, Coord::new(0, 0))
}

/// Pedestrians standing at each of `cells`.
pub fn pedestrians_at(cells: &[(usize, usize)]) -> Vec<Pedestrian> {
    cells.iter().map(|&(r, c)| Pedestrian::new(r, c)).collect()
}

/// Scatter up to `n` pedestrians over distinct open cells of `grid`.
///
/// Deterministic for a given `seed`. Returns fewer than `n` pedestrians
/// when the grid has fewer open cells.
pub fn scatter_pedestrians(grid: &Grid, n: usize, seed: u64) -> Vec<Pedestrian> {
    let mut open: Vec<Coord> = grid.open_cells().collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let take = n.min(open.len());

    // Partial Fisher-Yates over the first `take` slots.
    for i in 0..take {
        let remaining = (open.len() - i) as u64;
        let j = i + (rng.next_u64() % remaining) as usize;
        open.swap(i, j);
    }
    open[..take]
        .iter()
        .map(|&c| Pedestrian::new(c.row, c.col))
        .collect()
}
