//! Static field properties: distance law, corner cutting, determinism.

use exodus_core::{Coord, Potential};
use exodus_field::{FieldConfig, StaticFieldSolver, DEFAULT_DIAGONAL_WEIGHT};
use exodus_grid::neighbourhood::neighbours;
use exodus_grid::{Grid, Matrix, StepKind};
use exodus_test_utils::{corner_pocket, open_room, sealed_diagonal};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────

fn solve(grid: &Grid, exits: &[Coord], config: &FieldConfig) -> Matrix<Potential> {
    let mut field = Matrix::filled(grid.rows(), grid.cols(), Potential::Unvisited).unwrap();
    StaticFieldSolver::from_config(config)
        .solve(grid, exits, &mut field)
        .unwrap();
    field
}

fn octile(a: Coord, b: Coord, diagonal: f64) -> f64 {
    let dr = a.row.abs_diff(b.row);
    let dc = a.col.abs_diff(b.col);
    let diag = dr.min(dc) as f64;
    let straight = (dr.max(dc) - dr.min(dc)) as f64;
    straight + diag * diagonal
}

/// Weight of the step `from -> to` in `field`, or `None` if the step is
/// a blocked corner cut.
fn step_weight(field: &Matrix<Potential>, kind: StepKind, flanks: Option<[Coord; 2]>, diagonal: f64) -> Option<f64> {
    match kind {
        StepKind::Orthogonal => Some(1.0),
        StepKind::Diagonal => match flanks {
            Some([a, b]) if field[a].is_wall() && field[b].is_wall() => None,
            _ => Some(diagonal),
        },
    }
}

// ── Distance law ────────────────────────────────────────────────

#[test]
fn open_room_matches_octile_distance() {
    let grid = open_room(9, 11);
    let exit = Coord::new(4, 3);
    let field = solve(&grid, &[exit], &FieldConfig::default());

    for (coord, p) in field.iter() {
        if coord == exit {
            assert_eq!(p, Potential::Exit);
            continue;
        }
        let expected = octile(coord, exit, DEFAULT_DIAGONAL_WEIGHT);
        assert_eq!(p, Potential::Value(expected), "at {coord}");
    }
}

#[test]
fn open_room_grows_along_rays() {
    let grid = open_room(9, 9);
    let exit = Coord::new(4, 4);
    let field = solve(&grid, &[exit], &FieldConfig::default());

    let rays: [(isize, isize); 8] = [(-1, 0), (1, 0), (0, -1), (0, 1), (-1, -1), (-1, 1), (1, -1), (1, 1)];
    for (dr, dc) in rays {
        let mut prev = 0.0;
        for k in 1..=4isize {
            let c = Coord::new((4 + dr * k) as usize, (4 + dc * k) as usize);
            let cost = field[c].cost().unwrap();
            assert!(cost > prev, "ray ({dr}, {dc}) step {k}: {cost} <= {prev}");
            assert!(cost >= c.chebyshev(&exit) as f64);
            prev = cost;
        }
    }
}

#[test]
fn custom_diagonal_weight_is_used() {
    let grid = open_room(5, 5);
    let config = FieldConfig::default().with_diagonal_weight(std::f64::consts::SQRT_2);
    let field = solve(&grid, &[Coord::new(0, 0)], &config);
    let diag = field[(3, 3)].cost().unwrap();
    assert!((diag - 3.0 * std::f64::consts::SQRT_2).abs() < 1e-12);
    assert_eq!(field[(0, 4)], Potential::Value(4.0));
}

// ── Corner cutting ──────────────────────────────────────────────

#[test]
fn pocket_exit_goes_the_long_way() {
    let (grid, exit) = corner_pocket();
    let field = solve(&grid, &[exit], &FieldConfig::default());
    assert_eq!(field[(0, 2)], Potential::Value(1.5));
    assert_eq!(field[(1, 3)], Potential::Value(3.0));
    // The direct diagonal would give 1.5.
    assert_eq!(field[(2, 2)], Potential::Value(4.5));
    assert_eq!(field[(1, 2)], Potential::Wall);
    assert_eq!(field[(2, 1)], Potential::Wall);
}

#[test]
fn sealed_diagonal_leaves_floor_unvisited() {
    let (grid, exit) = sealed_diagonal();
    let mut field = Matrix::filled(3, 3, Potential::Unvisited).unwrap();
    let metrics = StaticFieldSolver::default()
        .solve(&grid, &[exit], &mut field)
        .unwrap();
    assert_eq!(field[exit], Potential::Exit);
    assert_eq!(field[(1, 1)], Potential::Unvisited);
    assert_eq!(field[(2, 2)], Potential::Unvisited);
    assert_eq!(metrics.unvisited_cells, grid.open_count() - 1);
    assert_eq!(metrics.relaxations, 0);
}

// ── Determinism and consistency ─────────────────────────────────

fn arb_scene() -> impl Strategy<Value = (Grid, Coord)> {
    (3usize..12, 3usize..12)
        .prop_flat_map(|(rows, cols)| {
            (
                Just(rows),
                Just(cols),
                proptest::collection::vec(proptest::bool::weighted(0.25), rows * cols),
                0..rows,
                0..cols,
            )
        })
        .prop_map(|(rows, cols, walls, er, ec)| {
            let cells = (0..rows * cols)
                .filter(|&i| walls[i])
                .map(|i| Coord::new(i / cols, i % cols));
            let grid = Grid::open(rows, cols).unwrap().with_walls(cells).unwrap();
            (grid, Coord::new(er, ec))
        })
}

proptest! {
    #[test]
    fn solve_is_deterministic((grid, exit) in arb_scene()) {
        let config = FieldConfig::default();
        let a = solve(&grid, &[exit], &config);
        let b = solve(&grid, &[exit], &config);
        let bits = |m: &Matrix<Potential>| -> Vec<Option<u64>> {
            m.as_slice().iter().map(|p| p.cost().map(f64::to_bits)).collect()
        };
        prop_assert_eq!(bits(&a), bits(&b));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn every_cost_is_a_shortest_step((grid, exit) in arb_scene()) {
        let w = DEFAULT_DIAGONAL_WEIGHT;
        let field = solve(&grid, &[exit], &FieldConfig::default());
        let (rows, cols) = field.dims();

        for (coord, p) in field.iter() {
            let Potential::Value(v) = p else { continue };
            let mut best = f64::INFINITY;
            for nb in neighbours(coord, rows, cols) {
                let Some(base) = field[nb.coord].cost() else { continue };
                let Some(weight) = step_weight(&field, nb.kind, nb.flanks, w) else { continue };
                best = best.min(base + weight);
            }
            prop_assert_eq!(v, best, "at {}", coord);
        }

        // No unvisited open cell borders a costed cell through a legal step.
        for (coord, p) in field.iter() {
            if !p.is_unvisited() {
                continue;
            }
            for nb in neighbours(coord, rows, cols) {
                if field[nb.coord].cost().is_some() {
                    prop_assert!(step_weight(&field, nb.kind, nb.flanks, w).is_none(),
                        "{} unvisited next to {}", coord, nb.coord);
                }
            }
        }
    }
}
