//! 8-connected neighbourhood with corner-flank information.
//!
//! Grid edges absorb: cells on the boundary simply have fewer
//! neighbours (corners have 3, edges have 5).

use exodus_core::Coord;
use smallvec::SmallVec;

/// All 8 offsets: N, S, W, E, NW, NE, SW, SE.
pub const OFFSETS_8: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Whether a move to a neighbour is orthogonal or diagonal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    /// Shares an edge with the origin cell.
    Orthogonal,
    /// Shares only a corner with the origin cell.
    Diagonal,
}

/// A neighbouring cell reached from some origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbour {
    /// Position of the neighbour.
    pub coord: Coord,
    /// Kind of step from the origin.
    pub kind: StepKind,
    /// For diagonal steps, the two orthogonal cells flanking the diagonal:
    /// `(origin.row + dr, origin.col)` and `(origin.row, origin.col + dc)`.
    pub flanks: Option<[Coord; 2]>,
}

fn offset(v: usize, d: isize, len: usize) -> Option<usize> {
    let n = v.checked_add_signed(d)?;
    (n < len).then_some(n)
}

/// In-bounds 8-connected neighbours of `origin` on a `rows x cols` grid.
pub fn neighbours(origin: Coord, rows: usize, cols: usize) -> SmallVec<[Neighbour; 8]> {
    let mut result = SmallVec::new();
    for (dr, dc) in OFFSETS_8 {
        let (Some(r), Some(c)) = (offset(origin.row, dr, rows), offset(origin.col, dc, cols))
        else {
            continue;
        };
        let coord = Coord::new(r, c);
        let neighbour = if dr != 0 && dc != 0 {
            Neighbour {
                coord,
                kind: StepKind::Diagonal,
                flanks: Some([Coord::new(r, origin.col), Coord::new(origin.row, c)]),
            }
        } else {
            Neighbour {
                coord,
                kind: StepKind::Orthogonal,
                flanks: None,
            }
        };
        result.push(neighbour);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_has_eight() {
        let n = neighbours(Coord::new(2, 2), 5, 5);
        assert_eq!(n.len(), 8);
        let diagonals = n.iter().filter(|nb| nb.kind == StepKind::Diagonal).count();
        assert_eq!(diagonals, 4);
    }

    #[test]
    fn corner_has_three() {
        let n = neighbours(Coord::new(0, 0), 5, 5);
        assert_eq!(n.len(), 3);
        let coords: Vec<Coord> = n.iter().map(|nb| nb.coord).collect();
        assert!(coords.contains(&Coord::new(1, 0)));
        assert!(coords.contains(&Coord::new(0, 1)));
        assert!(coords.contains(&Coord::new(1, 1)));
    }

    #[test]
    fn edge_has_five() {
        assert_eq!(neighbours(Coord::new(0, 2), 5, 5).len(), 5);
        assert_eq!(neighbours(Coord::new(4, 2), 5, 5).len(), 5);
    }

    #[test]
    fn single_cell_has_none() {
        assert!(neighbours(Coord::new(0, 0), 1, 1).is_empty());
    }

    #[test]
    fn diagonal_flanks() {
        let n = neighbours(Coord::new(1, 1), 3, 3);
        let se = n.iter().find(|nb| nb.coord == Coord::new(2, 2)).unwrap();
        assert_eq!(se.kind, StepKind::Diagonal);
        assert_eq!(se.flanks, Some([Coord::new(2, 1), Coord::new(1, 2)]));

        let north = n.iter().find(|nb| nb.coord == Coord::new(0, 1)).unwrap();
        assert_eq!(north.kind, StepKind::Orthogonal);
        assert_eq!(north.flanks, None);
    }
}
