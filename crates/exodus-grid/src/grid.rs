//! The grid skeleton: which cells are walls and which are open floor.

use crate::error::GridError;
use crate::matrix::Matrix;
use exodus_core::Coord;

/// Classification of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// Walls and obstacles.
    Wall,
    /// Walkable floor.
    Open,
}

/// An immutable-by-convention grid of walls and open cells.
///
/// A grid is built once per scenario and then only read by the floor-field
/// solvers; every field matrix shares its dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Matrix<CellKind>,
}

impl Grid {
    /// Create an obstacle-free grid.
    pub fn open(rows: usize, cols: usize) -> Result<Self, GridError> {
        Ok(Self {
            cells: Matrix::filled(rows, cols, CellKind::Open)?,
        })
    }

    /// Parse a grid from text: one line per row, `#` for a wall and `.`
    /// for open floor. Blank lines and surrounding whitespace are ignored.
    ///
    /// ```
    /// use exodus_grid::{CellKind, Grid};
    /// use exodus_core::Coord;
    ///
    /// let grid = Grid::parse("###\n#..\n###").unwrap();
    /// assert_eq!(grid.dims(), (3, 3));
    /// assert_eq!(grid.kind(Coord::new(1, 1)), Some(CellKind::Open));
    /// ```
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        let mut cells = Matrix::filled(rows, cols, CellKind::Open)?;

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let coord = Coord::new(row, col);
                cells[coord] = match glyph {
                    '#' => CellKind::Wall,
                    '.' => CellKind::Open,
                    _ => return Err(GridError::UnknownGlyph { coord, glyph }),
                };
            }
        }
        Ok(Self { cells })
    }

    /// Turn `coord` into a wall.
    pub fn set_wall(&mut self, coord: Coord) -> Result<(), GridError> {
        self.cells.check(coord)?;
        self.cells[coord] = CellKind::Wall;
        Ok(())
    }

    /// Builder-style variant of [`set_wall`](Grid::set_wall) for several cells.
    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Coord>) -> Result<Self, GridError> {
        for coord in walls {
            self.set_wall(coord)?;
        }
        Ok(self)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    /// `(rows, cols)`.
    pub fn dims(&self) -> (usize, usize) {
        self.cells.dims()
    }

    /// Whether `coord` lies inside the grid.
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(coord)
    }

    /// Bounds-check `coord`.
    pub fn check(&self, coord: Coord) -> Result<(), GridError> {
        self.cells.check(coord)
    }

    /// Cell kind at `coord`, or `None` outside the grid.
    pub fn kind(&self, coord: Coord) -> Option<CellKind> {
        self.cells.get(coord)
    }

    /// `true` for wall cells. Coordinates outside the grid count as walls.
    pub fn is_wall(&self, coord: Coord) -> bool {
        self.kind(coord).map_or(true, |k| k == CellKind::Wall)
    }

    /// Iterate over every open cell in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .filter(|&(_, k)| k == CellKind::Open)
            .map(|(c, _)| c)
    }

    /// Number of open cells.
    pub fn open_count(&self) -> usize {
        self.open_cells().count()
    }

    /// The underlying cell matrix.
    pub fn cells(&self) -> &Matrix<CellKind> {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_grid_has_no_walls() {
        let g = Grid::open(3, 4).unwrap();
        assert_eq!(g.open_count(), 12);
        assert!(!g.is_wall(Coord::new(2, 3)));
        assert!(g.is_wall(Coord::new(3, 0)));
    }

    #[test]
    fn parse_walls_and_floor() {
        let g = Grid::parse(
            "
            ####
            #..#
            ####
            ",
        )
        .unwrap();
        assert_eq!(g.dims(), (3, 4));
        assert_eq!(g.open_count(), 2);
        assert_eq!(
            g.open_cells().collect::<Vec<_>>(),
            vec![Coord::new(1, 1), Coord::new(1, 2)]
        );
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = Grid::parse("###\n##").unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_glyph() {
        let err = Grid::parse("#.\n#x").unwrap_err();
        assert_eq!(
            err,
            GridError::UnknownGlyph {
                coord: Coord::new(1, 1),
                glyph: 'x'
            }
        );
    }

    #[test]
    fn parse_rejects_empty_text() {
        assert_eq!(Grid::parse("\n  \n").unwrap_err(), GridError::EmptyGrid);
    }

    #[test]
    fn with_walls_marks_cells() {
        let g = Grid::open(3, 3)
            .unwrap()
            .with_walls([Coord::new(0, 1), Coord::new(1, 0)])
            .unwrap();
        assert_eq!(g.kind(Coord::new(0, 1)), Some(CellKind::Wall));
        assert_eq!(g.open_count(), 7);
    }

    #[test]
    fn set_wall_out_of_bounds() {
        let mut g = Grid::open(2, 2).unwrap();
        assert!(matches!(
            g.set_wall(Coord::new(5, 0)),
            Err(GridError::CoordOutOfBounds { .. })
        ));
    }
}
