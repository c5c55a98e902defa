//! Cellwise-minimum reduction across the fields of several exits.

use std::fmt;

use exodus_core::Potential;
use exodus_grid::Matrix;

use crate::error::FieldError;
use crate::exit::Exit;

/// Which per-exit field a combination reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// The static (distance-only) field.
    Static,
    /// The final (static + alfa * dynamic) field.
    Final,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Final => write!(f, "final"),
        }
    }
}

/// Reduces several fields to their cellwise minimum.
///
/// Sentinels never compete numerically; see [`Potential::min`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldCombiner;

impl FieldCombiner {
    /// Combine `fields` into `out`: start from the first field, then take
    /// the cellwise minimum with each further one.
    ///
    /// # Errors
    ///
    /// - [`FieldError::EmptyExitSet`] if `fields` yields nothing.
    /// - [`FieldError::ShapeMismatch`] if any field differs from `out` in
    ///   shape. `out` may be partially written in that case.
    pub fn combine_into<'a, I>(&self, fields: I, out: &mut Matrix<Potential>) -> Result<(), FieldError>
    where
        I: IntoIterator<Item = &'a Matrix<Potential>>,
    {
        let mut fields = fields.into_iter();
        let first = fields.next().ok_or(FieldError::EmptyExitSet)?;
        check_shape(out, first)?;
        out.copy_from(first);

        for field in fields {
            check_shape(out, field)?;
            for (acc, &p) in out.as_mut_slice().iter_mut().zip(field.as_slice()) {
                *acc = acc.min(p);
            }
        }
        Ok(())
    }

    /// Combine the `kind` fields of `exits` into `out`.
    pub fn combine_exits(
        &self,
        exits: &[Exit],
        kind: FieldKind,
        out: &mut Matrix<Potential>,
    ) -> Result<(), FieldError> {
        self.combine_into(exits.iter().map(|e| e.field(kind)), out)
    }
}

fn check_shape(out: &Matrix<Potential>, field: &Matrix<Potential>) -> Result<(), FieldError> {
    if out.same_shape(field) {
        Ok(())
    } else {
        Err(FieldError::ShapeMismatch {
            expected: out.dims(),
            found: field.dims(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exodus_core::Coord;

    fn row(values: &[Potential]) -> Matrix<Potential> {
        let mut m = Matrix::filled(1, values.len(), Potential::Unvisited).unwrap();
        m.as_mut_slice().copy_from_slice(values);
        m
    }

    #[test]
    fn takes_cellwise_minimum() {
        use Potential::*;
        let a = row(&[Wall, Exit, Value(1.0), Value(4.0), Unvisited]);
        let b = row(&[Wall, Value(1.0), Exit, Value(2.0), Value(3.0)]);
        let mut out = Matrix::filled(1, 5, Unvisited).unwrap();
        FieldCombiner.combine_into([&a, &b], &mut out).unwrap();
        assert_eq!(out.as_slice(), &[Wall, Exit, Exit, Value(2.0), Value(3.0)]);
    }

    #[test]
    fn single_field_is_copied() {
        let a = row(&[Potential::Wall, Potential::Value(2.0)]);
        let mut out = Matrix::filled(1, 2, Potential::Exit).unwrap();
        FieldCombiner.combine_into([&a], &mut out).unwrap();
        assert_eq!(out, a);
    }

    #[test]
    fn empty_input_rejected() {
        let mut out = Matrix::filled(1, 2, Potential::Unvisited).unwrap();
        let err = FieldCombiner
            .combine_into(std::iter::empty(), &mut out)
            .unwrap_err();
        assert_eq!(err, FieldError::EmptyExitSet);
    }

    #[test]
    fn shape_mismatch_rejected() {
        let a = row(&[Potential::Value(1.0)]);
        let b = row(&[Potential::Value(1.0), Potential::Value(2.0)]);
        let mut out = Matrix::filled(1, 1, Potential::Unvisited).unwrap();
        let err = FieldCombiner.combine_into([&a, &b], &mut out).unwrap_err();
        assert_eq!(
            err,
            FieldError::ShapeMismatch {
                expected: (1, 1),
                found: (1, 2)
            }
        );
        assert_eq!(out[Coord::new(0, 0)], Potential::Value(1.0));
    }

    #[test]
    fn kind_display() {
        assert_eq!(FieldKind::Static.to_string(), "static");
        assert_eq!(FieldKind::Final.to_string(), "final");
    }
}
