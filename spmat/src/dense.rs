//! Interface consumed from dense containers
//!
//! Dense matrices and vectors are not implemented here: spmat works with the
//! `ndarray` types, std vectors and slices through the `DenseStorage` and
//! `DenseStorageMut` traits, which only require the shape and random access
//! to the cells. Both traits are object safe so that operands of different
//! concrete dense types can be mixed in the same operation.
use crate::indexing::SpPosition;
use crate::{Ix1, Ix2};
use ndarray::{self, ArrayBase};
use num_traits::Zero;

/// A trait for types representing dense vectors or matrices.
pub trait DenseStorage {
    type Pos: SpPosition;
    type Scalar: Copy;

    /// The dimensions of the container
    fn shape(&self) -> <Self::Pos as SpPosition>::Shape;

    /// Random access to a cell.
    ///
    /// # Panics
    ///
    /// If the position is out of bounds
    fn get(&self, pos: Self::Pos) -> Self::Scalar;
}

pub trait DenseStorageMut: DenseStorage {
    /// Random mutable access to a cell.
    ///
    /// # Panics
    ///
    /// If the position is out of bounds
    fn set(&mut self, pos: Self::Pos, val: Self::Scalar);

    /// Overwrite every cell with `values`, given in storage order.
    ///
    /// # Panics
    ///
    /// If `values` does not hold exactly one value per cell
    fn assign_all(&mut self, values: &[Self::Scalar]) {
        let shape = self.shape();
        assert_eq!(values.len(), Self::Pos::cell_count(shape));
        for (pos, &val) in Self::Pos::positions(shape).zip(values) {
            self.set(pos, val);
        }
    }
}

impl<N: Copy + Zero> DenseStorage for [N] {
    type Pos = usize;
    type Scalar = N;

    fn shape(&self) -> usize {
        self.len()
    }

    #[inline(always)]
    fn get(&self, idx: usize) -> N {
        self[idx]
    }
}

impl<N: Copy + Zero> DenseStorageMut for [N] {
    #[inline(always)]
    fn set(&mut self, idx: usize, val: N) {
        self[idx] = val;
    }

    fn assign_all(&mut self, values: &[N]) {
        self.copy_from_slice(values);
    }
}

impl<N: Copy + Zero> DenseStorage for Vec<N> {
    type Pos = usize;
    type Scalar = N;

    fn shape(&self) -> usize {
        self.len()
    }

    #[inline(always)]
    fn get(&self, idx: usize) -> N {
        self[idx]
    }
}

impl<N: Copy + Zero> DenseStorageMut for Vec<N> {
    #[inline(always)]
    fn set(&mut self, idx: usize, val: N) {
        self[idx] = val;
    }

    fn assign_all(&mut self, values: &[N]) {
        self.copy_from_slice(values);
    }
}

impl<N, S> DenseStorage for ArrayBase<S, Ix1>
where
    S: ndarray::Data<Elem = N>,
    N: Copy + Zero,
{
    type Pos = usize;
    type Scalar = N;

    fn shape(&self) -> usize {
        self.len()
    }

    #[inline(always)]
    fn get(&self, idx: usize) -> N {
        self[[idx]]
    }
}

impl<N, S> DenseStorageMut for ArrayBase<S, Ix1>
where
    S: ndarray::DataMut<Elem = N>,
    N: Copy + Zero,
{
    #[inline(always)]
    fn set(&mut self, idx: usize, val: N) {
        self[[idx]] = val;
    }
}

impl<N, S> DenseStorage for ArrayBase<S, Ix2>
where
    S: ndarray::Data<Elem = N>,
    N: Copy + Zero,
{
    type Pos = (usize, usize);
    type Scalar = N;

    fn shape(&self) -> (usize, usize) {
        self.dim()
    }

    #[inline(always)]
    fn get(&self, (row, col): (usize, usize)) -> N {
        self[[row, col]]
    }
}

impl<N, S> DenseStorageMut for ArrayBase<S, Ix2>
where
    S: ndarray::DataMut<Elem = N>,
    N: Copy + Zero,
{
    #[inline(always)]
    fn set(&mut self, (row, col): (usize, usize), val: N) {
        self[[row, col]] = val;
    }

    fn assign_all(&mut self, values: &[N]) {
        assert_eq!(values.len(), self.len());
        // iter_mut walks the cells in logical (row-major) order whatever
        // the memory layout
        for (cell, &val) in self.iter_mut().zip(values) {
            *cell = val;
        }
    }
}
