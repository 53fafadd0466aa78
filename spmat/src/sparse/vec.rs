//! A sparse vector, storing the indices of its non-zero entries.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use ndarray::{Array1, ArrayBase, ArrayView1};
use num_traits::{Num, Zero};

use super::binop::{self, VecOperand, VecTarget};
use super::sealed::StoreAccess;
use super::store::{NnzStore, StoreIter};
use super::SparseStorage;
use crate::errors::SpError;
use crate::{Ix1, SpRes};

/// A sparse vector
///
/// A `SparseVec` has a fixed dimension and stores the sorted indices of its
/// non-zero values alongside them. The vector owns its storage: creating one
/// from a dense source copies the non-zero values.
///
/// # Example
///
/// ```rust
/// use spmat::SparseVec;
/// let mut v = SparseVec::from_dense(&[0., 1., 0., 2.]);
/// assert_eq!(v.nnz(), 2);
/// v.set(1, 0.).unwrap();
/// assert_eq!(v.nnz(), 1);
/// assert!(v.get(4).is_err());
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct SparseVec<N> {
    dim: usize,
    store: NnzStore<usize, N>,
}

impl<N> SparseVec<N> {
    /// Create an all-zero vector of dimension `dim`
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            store: NnzStore::new(),
        }
    }

    /// Same as `zeros`
    pub fn empty(dim: usize) -> Self {
        Self::zeros(dim)
    }

    /// Create a vector from its sorted non-zero indices and values
    ///
    /// # Errors
    ///
    /// If the indices are unsorted, duplicated or out of bounds, if a value
    /// is zero, or if `indices` and `data` have different lengths.
    pub fn try_from_parts(
        dim: usize,
        indices: Vec<usize>,
        data: Vec<N>,
    ) -> SpRes<Self>
    where
        N: Zero,
    {
        let store = NnzStore::try_from_parts(indices, data, |i| i < dim)?;
        Ok(Self { dim, store })
    }

    pub(crate) fn from_store(dim: usize, store: NnzStore<usize, N>) -> Self {
        Self { dim, store }
    }

    /// The dimension of this vector
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn nnz(&self) -> usize {
        self.store.nnz()
    }

    pub fn store(&self) -> &NnzStore<usize, N> {
        &self.store
    }

    pub fn indices(&self) -> &[usize] {
        self.store.indices()
    }

    pub fn data(&self) -> &[N] {
        self.store.data()
    }

    /// Decompose into the dimension, the indices and the values
    pub fn into_parts(self) -> (usize, Vec<usize>, Vec<N>) {
        let (indices, data) = self.store.into_parts();
        (self.dim, indices, data)
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }
}

impl<N: Num + Copy> SparseVec<N> {
    /// Create a vector holding a copy of the non-zero values of `data`
    pub fn from_dense(data: &[N]) -> Self {
        let mut store = NnzStore::new();
        for (i, &val) in data.iter().enumerate() {
            store.append(i, val);
        }
        Self::from_store(data.len(), store)
    }

    /// Create a vector holding a copy of the non-zero values of an array
    pub fn from_array(data: ArrayView1<N>) -> Self {
        let mut store = NnzStore::new();
        for (i, &val) in data.iter().enumerate() {
            store.append(i, val);
        }
        Self::from_store(data.len(), store)
    }

    /// The value at index `i`, zero if no entry is stored there.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `i >= dim()`.
    pub fn get(&self, i: usize) -> SpRes<N> {
        if i >= self.dim {
            return Err(SpError::out_of_bounds(i, self.dim));
        }
        Ok(self.store.get(i))
    }

    /// Assign `val` at index `i`. Assigning zero removes the entry.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `i >= dim()`, in which case the vector is unchanged.
    pub fn set(&mut self, i: usize, val: N) -> SpRes<()> {
        if i >= self.dim {
            return Err(SpError::out_of_bounds(i, self.dim));
        }
        self.store.set(i, val);
        Ok(())
    }

    /// Iterate over the non-zero entries, as `(index, value)`, in
    /// increasing index order
    pub fn iter(&self) -> StoreIter<'_, usize, N> {
        self.store.iter()
    }

    pub fn to_dense(&self) -> Array1<N> {
        let mut res = Array1::zeros(self.dim);
        for (i, val) in self.iter() {
            res[i] = val;
        }
        res
    }

    /// Apply `f` to every non-zero value, returning a new vector. Zero
    /// cells are not visited.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(N) -> N,
    {
        let mut res = self.clone();
        res.map_inplace(f);
        res
    }

    pub fn map_inplace<F>(&mut self, mut f: F)
    where
        F: FnMut(N) -> N,
    {
        self.store.map_inplace(|&x| f(x));
    }

    pub fn scale(&self, k: N) -> Self {
        self.map(|x| x * k)
    }

    pub fn negate(&self) -> Self
    where
        N: Neg<Output = N>,
    {
        self.map(|x| -x)
    }
}

impl<N> StoreAccess for SparseVec<N> {
    type Pos = usize;
    type Scalar = N;

    fn store_mut(&mut self) -> &mut NnzStore<usize, N> {
        &mut self.store
    }
}

impl<N> SparseStorage for SparseVec<N> {
    fn shape(&self) -> usize {
        self.dim
    }

    fn store(&self) -> &NnzStore<usize, N> {
        &self.store
    }
}

fn sparse_binop<'a, N, F>(
    lhs: &'a SparseVec<N>,
    rhs: VecOperand<'a, N>,
    binop: F,
) -> SparseVec<N>
where
    N: Num + Copy,
    F: Fn(N, N) -> N,
{
    let mut res = SparseVec::zeros(lhs.dim());
    let target = VecTarget::Sparse(&mut res);
    binop::binop_to(target, VecOperand::Sparse(lhs), rhs, binop)
        .unwrap_or_else(|e| panic!("{}", e));
    res
}

impl<'a, 'b, N: Num + Copy> Add<&'b SparseVec<N>> for &'a SparseVec<N> {
    type Output = SparseVec<N>;

    fn add(self, rhs: &'b SparseVec<N>) -> SparseVec<N> {
        sparse_binop(self, VecOperand::Sparse(rhs), |x, y| x + y)
    }
}

impl<'a, 'b, N: Num + Copy> Sub<&'b SparseVec<N>> for &'a SparseVec<N> {
    type Output = SparseVec<N>;

    fn sub(self, rhs: &'b SparseVec<N>) -> SparseVec<N> {
        sparse_binop(self, VecOperand::Sparse(rhs), |x, y| x - y)
    }
}

impl<'a, 'b, N, S> Add<&'b ArrayBase<S, Ix1>> for &'a SparseVec<N>
where
    N: Num + Copy,
    S: ndarray::Data<Elem = N>,
{
    type Output = SparseVec<N>;

    fn add(self, rhs: &'b ArrayBase<S, Ix1>) -> SparseVec<N> {
        sparse_binop(self, VecOperand::Dense(rhs.view()), |x, y| x + y)
    }
}

impl<'a, 'b, N, S> Sub<&'b ArrayBase<S, Ix1>> for &'a SparseVec<N>
where
    N: Num + Copy,
    S: ndarray::Data<Elem = N>,
{
    type Output = SparseVec<N>;

    fn sub(self, rhs: &'b ArrayBase<S, Ix1>) -> SparseVec<N> {
        sparse_binop(self, VecOperand::Dense(rhs.view()), |x, y| x - y)
    }
}

impl<'b, N: Num + Copy> AddAssign<&'b SparseVec<N>> for SparseVec<N> {
    fn add_assign(&mut self, rhs: &'b SparseVec<N>) {
        binop::add_to(
            VecTarget::Sparse(self),
            VecOperand::Target,
            VecOperand::Sparse(rhs),
        )
        .unwrap_or_else(|e| panic!("{}", e));
    }
}

impl<'b, N: Num + Copy> SubAssign<&'b SparseVec<N>> for SparseVec<N> {
    fn sub_assign(&mut self, rhs: &'b SparseVec<N>) {
        binop::sub_to(
            VecTarget::Sparse(self),
            VecOperand::Target,
            VecOperand::Sparse(rhs),
        )
        .unwrap_or_else(|e| panic!("{}", e));
    }
}

impl<'b, N, S> AddAssign<&'b ArrayBase<S, Ix1>> for SparseVec<N>
where
    N: Num + Copy,
    S: ndarray::Data<Elem = N>,
{
    fn add_assign(&mut self, rhs: &'b ArrayBase<S, Ix1>) {
        binop::add_to(
            VecTarget::Sparse(self),
            VecOperand::Target,
            VecOperand::Dense(rhs.view()),
        )
        .unwrap_or_else(|e| panic!("{}", e));
    }
}

impl<'b, N, S> SubAssign<&'b ArrayBase<S, Ix1>> for SparseVec<N>
where
    N: Num + Copy,
    S: ndarray::Data<Elem = N>,
{
    fn sub_assign(&mut self, rhs: &'b ArrayBase<S, Ix1>) {
        binop::sub_to(
            VecTarget::Sparse(self),
            VecOperand::Target,
            VecOperand::Dense(rhs.view()),
        )
        .unwrap_or_else(|e| panic!("{}", e));
    }
}

impl<'a, N> Neg for &'a SparseVec<N>
where
    N: Num + Copy + Neg<Output = N>,
{
    type Output = SparseVec<N>;

    fn neg(self) -> SparseVec<N> {
        self.negate()
    }
}

impl<N> Neg for SparseVec<N>
where
    N: Num + Copy + Neg<Output = N>,
{
    type Output = SparseVec<N>;

    fn neg(mut self) -> SparseVec<N> {
        self.map_inplace(|x| -x);
        self
    }
}

impl<'a, N: Num + Copy> Mul<N> for &'a SparseVec<N> {
    type Output = SparseVec<N>;

    fn mul(self, rhs: N) -> SparseVec<N> {
        self.scale(rhs)
    }
}

macro_rules! scalar_lhs_mul_impl {
    ($scalar: ty) => {
        impl<'a> Mul<&'a SparseVec<$scalar>> for $scalar {
            type Output = SparseVec<$scalar>;

            fn mul(self, rhs: &'a SparseVec<$scalar>) -> SparseVec<$scalar> {
                rhs.scale(self)
            }
        }
    };
}

scalar_lhs_mul_impl!(f32);
scalar_lhs_mul_impl!(f64);
scalar_lhs_mul_impl!(i32);
scalar_lhs_mul_impl!(i64);
