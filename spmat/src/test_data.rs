//! Some matrices used in tests

use crate::sparse::{SparseMat, SparseVec};
use ndarray::{arr2, Array2};

pub fn mat1_dense() -> Array2<f64> {
    arr2(&[
        [0., 0., 3., 4., 0.],
        [0., 0., 0., 2., 5.],
        [0., 0., 5., 0., 0.],
        [0., 8., 0., 0., 0.],
        [0., 0., 0., 7., 0.],
    ])
}

pub fn mat1() -> SparseMat<f64> {
    SparseMat::from_dense(mat1_dense().view())
}

pub fn mat2_dense() -> Array2<f64> {
    arr2(&[
        [6., 7., 3., 0., 3.],
        [8., 0., 0., 9., 0.],
        [0., 0., 0., 0., 0.],
        [0., 0., 2., 4., 0.],
        [0., 4., 4., 0., 0.],
    ])
}

pub fn mat2() -> SparseMat<f64> {
    SparseMat::from_dense(mat2_dense().view())
}

/// A 5x4 matrix, incompatible with `mat1` and `mat2`
pub fn mat3() -> SparseMat<f64> {
    SparseMat::from_rows(&[
        [0., 0., 3., 4.],
        [0., 0., 2., 5.],
        [0., 0., 5., 0.],
        [0., 8., 0., 0.],
        [0., 0., 0., 7.],
    ])
    .unwrap()
}

// mat1 scaled by 2
pub fn mat1_times_2() -> SparseMat<f64> {
    SparseMat::from_dense((mat1_dense() * 2.).view())
}

pub fn vec1() -> SparseVec<f64> {
    SparseVec::from_dense(&[0., 1., 0., 0., 4., 5., 0., 7.])
}

pub fn vec2() -> SparseVec<f64> {
    SparseVec::from_dense(&[0.5, 0., 2.5, 0., 4.5, 0., 6.5, 7.5])
}
