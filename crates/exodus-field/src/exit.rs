//! A single exit and the three fields it owns.

use exodus_core::{Congestion, Coord, ExitId, Potential};
use exodus_grid::{Grid, Matrix};
use smallvec::{smallvec, SmallVec};

use crate::combine::FieldKind;
use crate::error::FieldError;
use crate::static_field::unvisited_open_cells;

/// An exit: one or more cells plus its static, dynamic and final fields.
///
/// The first cell is the anchor the exit was registered with. Further
/// cells are added by [`ExitSet::expand_exit`](crate::ExitSet::expand_exit)
/// for doors wider than one cell.
#[derive(Clone, Debug)]
pub struct Exit {
    id: ExitId,
    cells: SmallVec<[Coord; 4]>,
    static_field: Matrix<Potential>,
    dynamic_field: Matrix<Congestion>,
    final_field: Matrix<Potential>,
}

impl Exit {
    /// Allocate an exit anchored at `anchor` with fields of `rows x cols`.
    pub(crate) fn new(id: ExitId, anchor: Coord, rows: usize, cols: usize) -> Result<Self, FieldError> {
        Ok(Self {
            id,
            cells: smallvec![anchor],
            static_field: Matrix::filled(rows, cols, Potential::Unvisited)?,
            dynamic_field: Matrix::filled(rows, cols, Congestion::Ignore)?,
            final_field: Matrix::filled(rows, cols, Potential::Unvisited)?,
        })
    }

    /// This exit's ID.
    pub fn id(&self) -> ExitId {
        self.id
    }

    /// The cell the exit was registered with.
    pub fn anchor(&self) -> Coord {
        self.cells[0]
    }

    /// Every cell of the exit, anchor first.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Static (distance) field.
    pub fn static_field(&self) -> &Matrix<Potential> {
        &self.static_field
    }

    /// Dynamic (congestion) field from the latest step.
    pub fn dynamic_field(&self) -> &Matrix<Congestion> {
        &self.dynamic_field
    }

    /// Final field from the latest step.
    pub fn final_field(&self) -> &Matrix<Potential> {
        &self.final_field
    }

    /// The static or final field.
    pub fn field(&self, kind: FieldKind) -> &Matrix<Potential> {
        match kind {
            FieldKind::Static => &self.static_field,
            FieldKind::Final => &self.final_field,
        }
    }

    /// Open cells of `grid` this exit's static field leaves unvisited.
    pub fn unvisited_cells(&self, grid: &Grid) -> usize {
        unvisited_open_cells(grid, &self.static_field)
    }

    /// Bytes held by the three field matrices.
    pub fn memory_bytes(&self) -> usize {
        self.static_field.memory_bytes()
            + self.dynamic_field.memory_bytes()
            + self.final_field.memory_bytes()
    }

    pub(crate) fn push_cell(&mut self, coord: Coord) {
        self.cells.push(coord);
    }

    pub(crate) fn static_field_mut(&mut self) -> &mut Matrix<Potential> {
        &mut self.static_field
    }

    /// Split borrow for the dynamic solve: the static field is read while
    /// the dynamic field is written.
    pub(crate) fn dynamic_parts(&mut self) -> (&Matrix<Potential>, &mut Matrix<Congestion>) {
        (&self.static_field, &mut self.dynamic_field)
    }

    /// Recompute the final field: `static + alfa * dynamic` on numeric
    /// cells, the static value wherever the dynamic field is ignored or the
    /// static cell is a sentinel.
    pub(crate) fn finalize(&mut self, alfa: f64) {
        let cells = self
            .final_field
            .as_mut_slice()
            .iter_mut()
            .zip(self.static_field.as_slice())
            .zip(self.dynamic_field.as_slice());
        for ((out, &st), &dy) in cells {
            *out = st.with_congestion(dy, alfa);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_exit_has_anchor_and_blank_fields() {
        let exit = Exit::new(ExitId(3), Coord::new(1, 2), 2, 4).unwrap();
        assert_eq!(exit.id(), ExitId(3));
        assert_eq!(exit.anchor(), Coord::new(1, 2));
        assert_eq!(exit.cells(), &[Coord::new(1, 2)]);
        assert_eq!(exit.static_field().dims(), (2, 4));
        assert_eq!(exit.dynamic_field().dims(), (2, 4));
        assert_eq!(exit.final_field().dims(), (2, 4));
        assert!(exit.memory_bytes() > 0);
    }

    #[test]
    fn finalize_merges_static_and_dynamic() {
        let mut exit = Exit::new(ExitId(0), Coord::new(0, 0), 1, 4).unwrap();
        exit.static_field_mut().as_mut_slice().copy_from_slice(&[
            Potential::Exit,
            Potential::Value(1.0),
            Potential::Wall,
            Potential::Value(2.0),
        ]);
        let (_, dynamic) = exit.dynamic_parts();
        dynamic.as_mut_slice().copy_from_slice(&[
            Congestion::Count(1),
            Congestion::Count(2),
            Congestion::Ignore,
            Congestion::Ignore,
        ]);
        exit.finalize(0.5);
        assert_eq!(
            exit.final_field().as_slice(),
            &[
                Potential::Exit,
                Potential::Value(2.0),
                Potential::Wall,
                Potential::Value(2.0),
            ]
        );
        assert_eq!(exit.field(FieldKind::Final), exit.final_field());
        assert_eq!(exit.field(FieldKind::Static), exit.static_field());
    }
}
