//! Dense row-major matrix over a single flat buffer.
//!
//! Every floor field (static, dynamic, final, combined) is a
//! [`Matrix`] with the same dimensions as the grid skeleton. Cells are
//! stored in one `Vec<T>` with a row stride of `cols`, so there is no
//! nested allocation and no question of which matrix owns which row.

use crate::error::GridError;
use exodus_core::Coord;
use std::ops::{Index, IndexMut};

/// A `rows x cols` matrix stored in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy> Matrix<T> {
    /// Allocate a matrix with every cell set to `value`.
    ///
    /// The buffer is reserved fallibly: an allocator refusal surfaces as
    /// [`GridError::AllocationFailed`] instead of aborting the process.
    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid);
        }
        let cells = rows
            .checked_mul(cols)
            .ok_or(GridError::DimensionOverflow { rows, cols })?;
        let mut data = Vec::new();
        data.try_reserve_exact(cells)
            .map_err(|_| GridError::AllocationFailed { cells })?;
        data.resize(cells, value);
        Ok(Self { rows, cols, data })
    }

    /// Cell value at `coord`, or `None` outside the matrix.
    pub fn get(&self, coord: Coord) -> Option<T> {
        if self.contains(coord) {
            Some(self.data[self.index_of(coord)])
        } else {
            None
        }
    }

    /// Copy all cells from `other`, which must have the same shape.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn copy_from(&mut self, other: &Matrix<T>) {
        assert!(
            self.same_shape(other),
            "matrix shape mismatch: {}x{} vs {}x{}",
            self.rows,
            self.cols,
            other.rows,
            other.cols
        );
        self.data.copy_from_slice(&other.data);
    }

    /// Iterate over `(coord, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, T)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (Coord::new(i / cols, i % cols), v))
    }
}

impl<T> Matrix<T> {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always returns `false`; construction rejects empty matrices.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `coord` lies inside the matrix.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Bounds-check `coord`.
    pub fn check(&self, coord: Coord) -> Result<(), GridError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(GridError::CoordOutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Flat buffer index of `coord`. Does not bounds-check.
    pub fn index_of(&self, coord: Coord) -> usize {
        coord.row * self.cols + coord.col
    }

    /// Whether `other` has the same dimensions.
    pub fn same_shape<U>(&self, other: &Matrix<U>) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// The flat row-major buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The flat row-major buffer, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Memory used by the cell buffer, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.capacity() * std::mem::size_of::<T>()
    }
}

impl<T> Index<Coord> for Matrix<T> {
    type Output = T;

    fn index(&self, coord: Coord) -> &T {
        assert!(self.contains(coord), "{coord} outside {}x{}", self.rows, self.cols);
        &self.data[coord.row * self.cols + coord.col]
    }
}

impl<T> IndexMut<Coord> for Matrix<T> {
    fn index_mut(&mut self, coord: Coord) -> &mut T {
        assert!(self.contains(coord), "{coord} outside {}x{}", self.rows, self.cols);
        &mut self.data[coord.row * self.cols + coord.col]
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self[Coord::new(row, col)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self[Coord::new(row, col)]
    }
}
