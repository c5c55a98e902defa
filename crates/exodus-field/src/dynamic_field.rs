//! Dynamic floor field: rank-based congestion per exit.
//!
//! For every open cell the dynamic field estimates how many pedestrians
//! compete for that cell or a closer one. Occupied cells are ranked by
//! the exit's static potential; an open cell with static potential `p`
//! receives `first + ties`, where `first` is the index of the first
//! occupied cell at exactly `p` and `ties` is how many occupied cells sit
//! at `p`. A cell whose potential matches no occupied cell receives 0.

use exodus_core::{active_pedestrians, Congestion, Pedestrian, Potential};
use exodus_grid::{CellKind, Grid, Matrix};

use crate::error::FieldError;
use crate::order::{CellOrderIndex, OccupiedCell};

/// Computes the dynamic field of one exit from a pedestrian snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct DynamicFieldSolver;

impl DynamicFieldSolver {
    /// Solve the dynamic field for the exit whose static field is
    /// `static_field`, writing into `field`. Returns the number of occupied
    /// cells that took part in the ranking.
    ///
    /// Walls become [`Congestion::Ignore`]. Exited pedestrians are skipped,
    /// as are pedestrians on cells without a static cost.
    ///
    /// # Errors
    ///
    /// - [`FieldError::ShapeMismatch`] if a matrix and `grid` differ in shape.
    /// - [`FieldError::PedestrianOutOfBounds`] if an active pedestrian is
    ///   off the grid. Nothing is written in that case.
    /// - [`FieldError::AllocationFailed`] if the occupied-cell buffer cannot
    ///   be allocated.
    pub fn solve(
        &self,
        grid: &Grid,
        static_field: &Matrix<Potential>,
        pedestrians: &[Pedestrian],
        field: &mut Matrix<Congestion>,
    ) -> Result<usize, FieldError> {
        for dims in [static_field.dims(), field.dims()] {
            if dims != grid.dims() {
                return Err(FieldError::ShapeMismatch {
                    expected: grid.dims(),
                    found: dims,
                });
            }
        }
        check_positions(grid, pedestrians)?;

        let index = occupied_index(static_field, pedestrians)?;

        for (coord, kind) in grid.cells().iter() {
            field[coord] = match kind {
                CellKind::Wall => Congestion::Ignore,
                CellKind::Open => match static_field[coord].cost() {
                    Some(p) => {
                        let n = index.lookup(p).congestion();
                        Congestion::Count(u32::try_from(n).unwrap_or(u32::MAX))
                    }
                    None => Congestion::Count(0),
                },
            };
        }

        Ok(index.len())
    }
}

/// Reject any active pedestrian standing outside `grid`.
pub(crate) fn check_positions(grid: &Grid, pedestrians: &[Pedestrian]) -> Result<(), FieldError> {
    match pedestrians
        .iter()
        .enumerate()
        .find(|(_, p)| !p.exited && !grid.contains(p.position))
    {
        Some((index, p)) => Err(FieldError::PedestrianOutOfBounds {
            index,
            coord: p.position,
        }),
        None => Ok(()),
    }
}

/// Build the sorted occupied-cell index for one exit.
fn occupied_index(
    static_field: &Matrix<Potential>,
    pedestrians: &[Pedestrian],
) -> Result<CellOrderIndex, FieldError> {
    let len = pedestrians.len();
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(len)
        .map_err(|_| FieldError::AllocationFailed {
            what: "occupied-cell list",
            len,
        })?;
    cells.extend(active_pedestrians(pedestrians).filter_map(|p| {
        static_field[p.position].cost().map(|potential| OccupiedCell {
            coord: p.position,
            potential,
        })
    }));
    Ok(CellOrderIndex::new(cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::static_field::StaticFieldSolver;
    use exodus_core::Coord;

    fn corridor_static(len: usize) -> (Grid, Matrix<Potential>) {
        let grid = Grid::open(1, len).unwrap();
        let mut field = Matrix::filled(1, len, Potential::Unvisited).unwrap();
        StaticFieldSolver::default()
            .solve(&grid, &[Coord::new(0, 0)], &mut field)
            .unwrap();
        (grid, field)
    }

    fn solve(
        grid: &Grid,
        static_field: &Matrix<Potential>,
        pedestrians: &[Pedestrian],
    ) -> (Matrix<Congestion>, usize) {
        let mut field = Matrix::filled(grid.rows(), grid.cols(), Congestion::Ignore).unwrap();
        let n = DynamicFieldSolver
            .solve(grid, static_field, pedestrians, &mut field)
            .unwrap();
        (field, n)
    }

    #[test]
    fn no_pedestrians_all_zero() {
        let (grid, st) = corridor_static(4);
        let (field, n) = solve(&grid, &st, &[]);
        assert_eq!(n, 0);
        assert!(field.as_slice().iter().all(|&c| c == Congestion::Count(0)));
    }

    #[test]
    fn ranks_against_occupied_cells() {
        // Corridor potentials: E,1,2,3,4,5
        let (grid, st) = corridor_static(6);
        let peds = [
            Pedestrian::new(0, 2),
            Pedestrian::new(0, 3),
            Pedestrian::new(0, 5),
        ];
        let (field, n) = solve(&grid, &st, &peds);
        assert_eq!(n, 3);
        assert_eq!(field[(0, 2)], Congestion::Count(1));
        assert_eq!(field[(0, 3)], Congestion::Count(2));
        assert_eq!(field[(0, 5)], Congestion::Count(3));
        // Unoccupied potentials match nothing.
        assert_eq!(field[(0, 1)], Congestion::Count(0));
        assert_eq!(field[(0, 4)], Congestion::Count(0));
    }

    #[test]
    fn exited_pedestrians_ignored() {
        let (grid, st) = corridor_static(4);
        let peds = [Pedestrian::new(0, 2).exited(), Pedestrian::new(0, 3)];
        let (field, n) = solve(&grid, &st, &peds);
        assert_eq!(n, 1);
        assert_eq!(field[(0, 2)], Congestion::Count(0));
        assert_eq!(field[(0, 3)], Congestion::Count(1));
    }

    #[test]
    fn exited_pedestrian_may_be_off_grid() {
        let (grid, st) = corridor_static(3);
        let peds = [Pedestrian::new(9, 9).exited()];
        let (_, n) = solve(&grid, &st, &peds);
        assert_eq!(n, 0);
    }

    #[test]
    fn pedestrian_on_exit_ranks_at_zero() {
        let (grid, st) = corridor_static(3);
        let peds = [Pedestrian::new(0, 0), Pedestrian::new(0, 1)];
        let (field, _) = solve(&grid, &st, &peds);
        assert_eq!(field[(0, 0)], Congestion::Count(1));
        assert_eq!(field[(0, 1)], Congestion::Count(2));
    }

    #[test]
    fn uncosted_cells_stay_out_of_ranking() {
        // The wall splits the corridor; (0, 3) and (0, 4) never get a cost.
        let grid = Grid::parse("..#..").unwrap();
        let mut st = Matrix::filled(1, 5, Potential::Unvisited).unwrap();
        StaticFieldSolver::default()
            .solve(&grid, &[Coord::new(0, 0)], &mut st)
            .unwrap();
        assert_eq!(st[(0, 3)], Potential::Unvisited);

        let peds = [
            Pedestrian::new(0, 1),
            Pedestrian::new(0, 2),
            Pedestrian::new(0, 3),
        ];
        let (field, n) = solve(&grid, &st, &peds);
        assert_eq!(n, 1);
        assert_eq!(field[(0, 1)], Congestion::Count(1));
        assert_eq!(field[(0, 2)], Congestion::Ignore);
        assert_eq!(field[(0, 3)], Congestion::Count(0));
        assert_eq!(field[(0, 4)], Congestion::Count(0));

        // Merging keeps the unvisited sentinel.
        for col in 3..5 {
            assert_eq!(
                st[(0, col)].with_congestion(field[(0, col)], 1.0),
                Potential::Unvisited
            );
        }
    }

    #[test]
    fn walls_ignored() {
        let grid = Grid::parse("#..").unwrap();
        let mut st = Matrix::filled(1, 3, Potential::Unvisited).unwrap();
        StaticFieldSolver::default()
            .solve(&grid, &[Coord::new(0, 2)], &mut st)
            .unwrap();
        let (field, _) = solve(&grid, &st, &[Pedestrian::new(0, 1)]);
        assert_eq!(field[(0, 0)], Congestion::Ignore);
        assert_eq!(field[(0, 1)], Congestion::Count(1));
    }

    #[test]
    fn active_pedestrian_off_grid_rejected() {
        let (grid, st) = corridor_static(3);
        let mut field = Matrix::filled(1, 3, Congestion::Count(7)).unwrap();
        let err = DynamicFieldSolver
            .solve(&grid, &st, &[Pedestrian::new(0, 1), Pedestrian::new(1, 0)], &mut field)
            .unwrap_err();
        assert_eq!(
            err,
            FieldError::PedestrianOutOfBounds {
                index: 1,
                coord: Coord::new(1, 0)
            }
        );
        assert!(field.as_slice().iter().all(|&c| c == Congestion::Count(7)));
    }
}
