//! Abstraction over the positions of non-zero entries
//!
//! Sparse vectors store their entries at `usize` positions, sparse matrices
//! at `(row, col)` positions. Both share the same storage and the same
//! arithmetic through the `SpPosition` trait, whose ordering is the storage
//! order of the entries (row-major for matrices).
use std::fmt::Debug;
use std::ops::Range;

use ndarray::iter::IndicesIter;

use crate::Ix2;

/// A position inside a sparse container
///
/// The `Ord` implementation must match the iteration order of
/// `SpPosition::positions`, as stores are kept sorted with respect to it
/// and merged against dense iterations.
pub trait SpPosition: Copy + Ord + Debug {
    /// The dimensions of a container addressed by this position type
    type Shape: Copy + Eq + Debug;

    /// Iterator over every position of a shape, in storage order
    type Positions: Iterator<Item = Self> + Clone;

    /// Whether this position lies inside `shape`
    fn in_bounds(self, shape: Self::Shape) -> bool;

    /// The row-major offset of this position inside `shape`
    fn linear(self, shape: Self::Shape) -> usize;

    /// Number of cells of a container of the given shape.
    ///
    /// # Panics
    ///
    /// If the count does not fit in an `usize`.
    fn cell_count(shape: Self::Shape) -> usize;

    /// Iterate over every position of `shape`, in storage order
    fn positions(shape: Self::Shape) -> Self::Positions;
}

impl SpPosition for usize {
    type Shape = usize;
    type Positions = Range<usize>;

    #[inline(always)]
    fn in_bounds(self, shape: usize) -> bool {
        self < shape
    }

    #[inline(always)]
    fn linear(self, _shape: usize) -> usize {
        self
    }

    fn cell_count(shape: usize) -> usize {
        shape
    }

    fn positions(shape: usize) -> Range<usize> {
        0..shape
    }
}

impl SpPosition for (usize, usize) {
    type Shape = (usize, usize);
    type Positions = IndicesIter<Ix2>;

    #[inline(always)]
    fn in_bounds(self, shape: (usize, usize)) -> bool {
        self.0 < shape.0 && self.1 < shape.1
    }

    #[inline(always)]
    fn linear(self, shape: (usize, usize)) -> usize {
        self.0 * shape.1 + self.1
    }

    fn cell_count(shape: (usize, usize)) -> usize {
        shape
            .0
            .checked_mul(shape.1)
            .expect("cell count overflows usize")
    }

    fn positions(shape: (usize, usize)) -> IndicesIter<Ix2> {
        ndarray::indices(shape).into_iter()
    }
}
