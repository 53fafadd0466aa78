//! Equality between containers, whatever their storage kind
//!
//! Two containers are equal when they have the same dimensions and every
//! cell holds the same value. Sparse containers are compared to dense ones
//! without densifying them, by walking the dense cells in storage order
//! alongside the sorted non-zero entries.

use ndarray::ArrayBase;
use num_traits::{Num, Zero};

use super::binop::{Cells, Container, MatRef, Matrix, VecRef, Vector, View};
use super::mat::SparseMat;
use super::store::NnzEither::{Both, Left, Right};
use super::store::SparseIterTools;
use super::vec::SparseVec;
use super::SparseStorage;
use crate::dense::DenseStorage;
use crate::{Ix1, Ix2};

fn view_of<'v, S, D>(c: &'v Container<&S, D>) -> View<'v, S::Pos, S::Scalar>
where
    S: SparseStorage,
    S::Scalar: Copy,
    D: DenseStorage<Pos = S::Pos, Scalar = S::Scalar>,
{
    match c {
        Container::Sparse(s) => View::sparse(*s),
        Container::Dense(d) => View::dense(d),
    }
}

fn container_eq<S, D1, D2>(
    lhs: &Container<&S, D1>,
    rhs: &Container<&S, D2>,
) -> bool
where
    S: SparseStorage,
    S::Scalar: Num + Copy,
    D1: DenseStorage<Pos = S::Pos, Scalar = S::Scalar>,
    D2: DenseStorage<Pos = S::Pos, Scalar = S::Scalar>,
{
    let lview = view_of(lhs);
    let rview = view_of(rhs);
    if lview.shape != rview.shape {
        return false;
    }
    if let (Cells::Sparse(l), Cells::Sparse(r)) = (&lview.cells, &rview.cells)
    {
        // compact stores are equal iff their entries are
        return l == r;
    }
    lview
        .entries()
        .nnz_or_zip(rview.entries())
        .all(|elem| match elem {
            Left((_, val)) | Right((_, val)) => val.is_zero(),
            Both((_, lval, rval)) => lval == rval,
        })
}

/// Whether two matrices have the same shape and values, whatever their
/// storage kind.
///
/// ```rust
/// use spmat::{mat_eq, MatRef, SparseMat};
/// use ndarray::arr2;
/// let dense = arr2(&[[0., 1.], [2., 0.]]);
/// let sparse = SparseMat::from_dense(dense.view());
/// assert!(mat_eq(MatRef::Sparse(&sparse), MatRef::Dense(dense.view())));
/// assert!(!mat_eq(MatRef::Sparse(&sparse), MatRef::Dense(dense.t())));
/// ```
pub fn mat_eq<N: Num + Copy>(lhs: MatRef<'_, N>, rhs: MatRef<'_, N>) -> bool {
    container_eq(&lhs, &rhs)
}

/// Whether two vectors have the same dimension and values, whatever their
/// storage kind.
pub fn vec_eq<N: Num + Copy>(lhs: VecRef<'_, N>, rhs: VecRef<'_, N>) -> bool {
    container_eq(&lhs, &rhs)
}

impl<N, S> PartialEq<ArrayBase<S, Ix2>> for SparseMat<N>
where
    N: Num + Copy,
    S: ndarray::Data<Elem = N>,
{
    fn eq(&self, other: &ArrayBase<S, Ix2>) -> bool {
        mat_eq(MatRef::Sparse(self), MatRef::Dense(other.view()))
    }
}

impl<N, S> PartialEq<SparseMat<N>> for ArrayBase<S, Ix2>
where
    N: Num + Copy,
    S: ndarray::Data<Elem = N>,
{
    fn eq(&self, other: &SparseMat<N>) -> bool {
        mat_eq(MatRef::Dense(self.view()), MatRef::Sparse(other))
    }
}

impl<N, S> PartialEq<ArrayBase<S, Ix1>> for SparseVec<N>
where
    N: Num + Copy,
    S: ndarray::Data<Elem = N>,
{
    fn eq(&self, other: &ArrayBase<S, Ix1>) -> bool {
        vec_eq(VecRef::Sparse(self), VecRef::Dense(other.view()))
    }
}

impl<N, S> PartialEq<SparseVec<N>> for ArrayBase<S, Ix1>
where
    N: Num + Copy,
    S: ndarray::Data<Elem = N>,
{
    fn eq(&self, other: &SparseVec<N>) -> bool {
        vec_eq(VecRef::Dense(self.view()), VecRef::Sparse(other))
    }
}

impl<N: Num + Copy> PartialEq for Matrix<N> {
    fn eq(&self, other: &Matrix<N>) -> bool {
        mat_eq(self.view(), other.view())
    }
}

impl<N: Num + Copy> PartialEq for Vector<N> {
    fn eq(&self, other: &Vector<N>) -> bool {
        vec_eq(self.view(), other.view())
    }
}
