//! Sparse/dense addition, subtraction, and generic element-wise operations
//!
//! Operands and targets are described by variant types, [`Operand`] and
//! [`Target`], so that any combination of sparse and dense containers can be
//! handled by a single function. The target may be one of the operands: this
//! is expressed explicitly with `Operand::Target`, the borrow checker ruling
//! out any other kind of aliasing.
//!
//! # Example
//!
//! ```rust
//! use spmat::{add_to, MatOperand, MatTarget, SparseMat};
//! use ndarray::arr2;
//! let mut m = SparseMat::from_dense(arr2(&[[0f32, 1., 1.]]).view());
//! // m = m + m
//! add_to(MatTarget::Sparse(&mut m), MatOperand::Target, MatOperand::Target)
//!     .unwrap();
//! assert_eq!(m, arr2(&[[0f32, 2., 2.]]));
//! ```
use ndarray::{
    Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2,
};
use num_traits::Num;

use crate::dense::{DenseStorage, DenseStorageMut};
use crate::errors::SpError;
use crate::indexing::SpPosition;
use crate::sparse::mat::SparseMat;
use crate::sparse::store::NnzEither::{Both, Left, Right};
use crate::sparse::store::{NnzStore, SparseIterTools, StoreIter};
use crate::sparse::vec::SparseVec;
use crate::sparse::SparseStorage;
use crate::SpRes;

/// An operand of an element-wise operation
pub enum Operand<'a, S, D> {
    /// The target of the operation, read before it is overwritten
    Target,
    Sparse(&'a S),
    Dense(D),
}

/// The container receiving the result of an element-wise operation.
///
/// The storage kind of the target decides the representation of the result:
/// a sparse target only stores the non-zero outcomes, a dense target has all
/// its cells overwritten.
pub enum Target<'a, S, D> {
    Sparse(&'a mut S),
    Dense(D),
}

pub type MatOperand<'a, N> = Operand<'a, SparseMat<N>, ArrayView2<'a, N>>;
pub type MatTarget<'a, N> = Target<'a, SparseMat<N>, ArrayViewMut2<'a, N>>;
pub type VecOperand<'a, N> = Operand<'a, SparseVec<N>, ArrayView1<'a, N>>;
pub type VecTarget<'a, N> = Target<'a, SparseVec<N>, ArrayViewMut1<'a, N>>;

/// Either a sparse or a dense container
#[derive(Debug, Clone)]
pub enum Container<S, D> {
    Sparse(S),
    Dense(D),
}

pub type Matrix<N> = Container<SparseMat<N>, Array2<N>>;
pub type MatRef<'a, N> = Container<&'a SparseMat<N>, ArrayView2<'a, N>>;
pub type Vector<N> = Container<SparseVec<N>, Array1<N>>;
pub type VecRef<'a, N> = Container<&'a SparseVec<N>, ArrayView1<'a, N>>;

impl<S, D> Container<S, D> {
    pub fn is_sparse(&self) -> bool {
        matches!(self, Container::Sparse(_))
    }
}

impl<'a, S, D> From<Container<&'a S, D>> for Operand<'a, S, D> {
    fn from(c: Container<&'a S, D>) -> Self {
        match c {
            Container::Sparse(s) => Operand::Sparse(s),
            Container::Dense(d) => Operand::Dense(d),
        }
    }
}

impl<'a, N> From<&'a SparseMat<N>> for MatOperand<'a, N> {
    fn from(m: &'a SparseMat<N>) -> Self {
        Operand::Sparse(m)
    }
}

impl<'a, N> From<&'a Array2<N>> for MatOperand<'a, N> {
    fn from(m: &'a Array2<N>) -> Self {
        Operand::Dense(m.view())
    }
}

impl<'a, N> From<ArrayView2<'a, N>> for MatOperand<'a, N> {
    fn from(m: ArrayView2<'a, N>) -> Self {
        Operand::Dense(m)
    }
}

impl<'a, N> From<&'a mut SparseMat<N>> for MatTarget<'a, N> {
    fn from(m: &'a mut SparseMat<N>) -> Self {
        Target::Sparse(m)
    }
}

impl<'a, N> From<&'a mut Array2<N>> for MatTarget<'a, N> {
    fn from(m: &'a mut Array2<N>) -> Self {
        Target::Dense(m.view_mut())
    }
}

impl<'a, N> From<&'a SparseVec<N>> for VecOperand<'a, N> {
    fn from(v: &'a SparseVec<N>) -> Self {
        Operand::Sparse(v)
    }
}

impl<'a, N> From<&'a Array1<N>> for VecOperand<'a, N> {
    fn from(v: &'a Array1<N>) -> Self {
        Operand::Dense(v.view())
    }
}

impl<'a, N> From<ArrayView1<'a, N>> for VecOperand<'a, N> {
    fn from(v: ArrayView1<'a, N>) -> Self {
        Operand::Dense(v)
    }
}

impl<'a, N> From<&'a mut SparseVec<N>> for VecTarget<'a, N> {
    fn from(v: &'a mut SparseVec<N>) -> Self {
        Target::Sparse(v)
    }
}

impl<'a, N> From<&'a mut Array1<N>> for VecTarget<'a, N> {
    fn from(v: &'a mut Array1<N>) -> Self {
        Target::Dense(v.view_mut())
    }
}

/// Read access to the cells of an operand, whatever its storage kind
pub(crate) enum Cells<'v, K: SpPosition, N: Copy> {
    Sparse(&'v NnzStore<K, N>),
    Dense(&'v dyn DenseStorage<Pos = K, Scalar = N>),
}

pub(crate) struct View<'v, K: SpPosition, N: Copy> {
    pub(crate) shape: K::Shape,
    pub(crate) cells: Cells<'v, K, N>,
}

impl<'v, K: SpPosition, N: Copy> View<'v, K, N> {
    pub(crate) fn sparse<S>(s: &'v S) -> Self
    where
        S: SparseStorage<Pos = K, Scalar = N>,
    {
        View {
            shape: s.shape(),
            cells: Cells::Sparse(s.store()),
        }
    }

    pub(crate) fn dense<D>(d: &'v D) -> Self
    where
        D: DenseStorage<Pos = K, Scalar = N>,
    {
        View {
            shape: d.shape(),
            cells: Cells::Dense(d),
        }
    }

    /// Iterate over the cells an operation has to visit, in storage order:
    /// the non-zeros of a sparse operand, every cell of a dense one.
    pub(crate) fn entries(&self) -> Entries<'v, K, N> {
        match self.cells {
            Cells::Sparse(store) => Entries::Sparse(store.iter()),
            Cells::Dense(dense) => Entries::Dense {
                positions: K::positions(self.shape),
                dense,
            },
        }
    }

    fn visited(&self) -> usize {
        match self.cells {
            Cells::Sparse(store) => store.nnz(),
            Cells::Dense(_) => K::cell_count(self.shape),
        }
    }

    fn kind(&self) -> &'static str {
        match self.cells {
            Cells::Sparse(_) => "sparse",
            Cells::Dense(_) => "dense",
        }
    }
}

pub(crate) enum Entries<'v, K: SpPosition, N: Copy> {
    Sparse(StoreIter<'v, K, N>),
    Dense {
        positions: K::Positions,
        dense: &'v dyn DenseStorage<Pos = K, Scalar = N>,
    },
}

impl<'v, K: SpPosition, N: Copy> Iterator for Entries<'v, K, N> {
    type Item = (K, N);

    fn next(&mut self) -> Option<(K, N)> {
        match self {
            Entries::Sparse(it) => it.next(),
            Entries::Dense { positions, dense } => {
                positions.next().map(|pos| (pos, dense.get(pos)))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Entries::Sparse(it) => it.size_hint(),
            Entries::Dense { positions, .. } => positions.size_hint(),
        }
    }
}

fn resolve<'v, S, D>(
    operand: &'v Operand<'_, S, D>,
    target: &View<'v, S::Pos, S::Scalar>,
) -> View<'v, S::Pos, S::Scalar>
where
    S: SparseStorage,
    S::Scalar: Copy,
    D: DenseStorage<Pos = S::Pos, Scalar = S::Scalar>,
{
    match operand {
        Operand::Target => View {
            shape: target.shape,
            cells: match target.cells {
                Cells::Sparse(store) => Cells::Sparse(store),
                Cells::Dense(dense) => Cells::Dense(dense),
            },
        },
        Operand::Sparse(s) => View::sparse(*s),
        Operand::Dense(d) => View::dense(d),
    }
}

fn check_shapes<K: SpPosition, N: Copy>(
    target: K::Shape,
    lhs: &View<K, N>,
    rhs: &View<K, N>,
) -> SpRes<()> {
    for operand in [lhs.shape, rhs.shape] {
        if operand != target {
            return Err(SpError::dim_mismatch(target, operand));
        }
    }
    Ok(())
}

/// Merge the entries of both operands, calling `out` for every position
/// where at least one of them has an entry.
fn merge_entries<K, N, F, O>(
    lhs: &View<K, N>,
    rhs: &View<K, N>,
    binop: F,
    mut out: O,
) where
    K: SpPosition,
    N: Num + Copy,
    F: Fn(N, N) -> N,
    O: FnMut(K, N),
{
    log::trace!(
        "{}/{} element-wise operation visiting at most {} entries",
        lhs.kind(),
        rhs.kind(),
        lhs.visited() + rhs.visited()
    );
    for elem in lhs.entries().nnz_or_zip(rhs.entries()) {
        let (ind, binop_val) = match elem {
            Left((ind, val)) => (ind, binop(val, N::zero())),
            Right((ind, val)) => (ind, binop(N::zero(), val)),
            Both((ind, lval, rval)) => (ind, binop(lval, rval)),
        };
        out(ind, binop_val);
    }
}

/// Compute the sparse result of `binop` applied to the cells of both
/// operands. Only the positions where one of the operands has an entry are
/// visited, and only the non-zero outcomes are stored.
pub(crate) fn binop_store<K, N, F>(
    lhs: &View<K, N>,
    rhs: &View<K, N>,
    binop: F,
) -> NnzStore<K, N>
where
    K: SpPosition,
    N: Num + Copy,
    F: Fn(N, N) -> N,
{
    let mut res = match (&lhs.cells, &rhs.cells) {
        (Cells::Sparse(l), Cells::Sparse(r)) => {
            NnzStore::with_capacity(l.nnz() + r.nnz())
        }
        (Cells::Sparse(s), Cells::Dense(_))
        | (Cells::Dense(_), Cells::Sparse(s)) => {
            NnzStore::with_capacity(s.nnz())
        }
        (Cells::Dense(_), Cells::Dense(_)) => NnzStore::new(),
    };
    merge_entries(lhs, rhs, binop, |ind, val| res.append(ind, val));
    res
}

/// Compute the dense result of `binop` applied to the cells of both
/// operands, as a buffer in storage order.
fn binop_dense<K, N, F>(lhs: &View<K, N>, rhs: &View<K, N>, binop: F) -> Vec<N>
where
    K: SpPosition,
    N: Num + Copy,
    F: Fn(N, N) -> N,
{
    let shape = lhs.shape;
    let mut res = vec![N::zero(); K::cell_count(shape)];
    merge_entries(lhs, rhs, binop, |ind, val| res[ind.linear(shape)] = val);
    res
}

/// Applies a binary operation to matching cells of `lhs` and `rhs`, and
/// writes the result into `target`. When only one operand has a non-zero at
/// a given location, `0` is inferred for the other one.
///
/// Thus the behaviour is correct iff `binop(N::zero(), N::zero()) == N::zero()`
///
/// The target may be one of the operands, or both, through
/// `Operand::Target`: the result is computed from the values of the operands
/// before the operation, then moved into the target.
///
/// # Errors
///
/// `SpError::DimensionMismatch` if the shapes of the operands and of the
/// target are not all the same. The target is left untouched.
pub fn binop_to<S, DO, DT, F>(
    target: Target<'_, S, DT>,
    lhs: Operand<'_, S, DO>,
    rhs: Operand<'_, S, DO>,
    binop: F,
) -> SpRes<()>
where
    S: SparseStorage,
    S::Scalar: Num + Copy,
    DO: DenseStorage<Pos = S::Pos, Scalar = S::Scalar>,
    DT: DenseStorageMut<Pos = S::Pos, Scalar = S::Scalar>,
    F: Fn(S::Scalar, S::Scalar) -> S::Scalar,
{
    match target {
        Target::Sparse(target) => {
            let store = {
                let tview = View::sparse(&*target);
                let lview = resolve(&lhs, &tview);
                let rview = resolve(&rhs, &tview);
                check_shapes(tview.shape, &lview, &rview)?;
                binop_store(&lview, &rview, binop)
            };
            *target.store_mut() = store;
        }
        Target::Dense(mut target) => {
            let values = {
                let tview = View::dense(&target);
                let lview = resolve(&lhs, &tview);
                let rview = resolve(&rhs, &tview);
                check_shapes(tview.shape, &lview, &rview)?;
                log::debug!(
                    "{}/{} operation densified into a target of shape {:?}",
                    lview.kind(),
                    rview.kind(),
                    tview.shape
                );
                binop_dense(&lview, &rview, binop)
            };
            target.assign_all(&values);
        }
    }
    Ok(())
}

/// Compute `target = lhs + rhs`
///
/// # Errors
///
/// On incompatible dimensions, without touching the target.
pub fn add_to<S, DO, DT>(
    target: Target<'_, S, DT>,
    lhs: Operand<'_, S, DO>,
    rhs: Operand<'_, S, DO>,
) -> SpRes<()>
where
    S: SparseStorage,
    S::Scalar: Num + Copy,
    DO: DenseStorage<Pos = S::Pos, Scalar = S::Scalar>,
    DT: DenseStorageMut<Pos = S::Pos, Scalar = S::Scalar>,
{
    binop_to(target, lhs, rhs, |x, y| x + y)
}

/// Compute `target = lhs - rhs`
///
/// # Errors
///
/// On incompatible dimensions, without touching the target.
pub fn sub_to<S, DO, DT>(
    target: Target<'_, S, DT>,
    lhs: Operand<'_, S, DO>,
    rhs: Operand<'_, S, DO>,
) -> SpRes<()>
where
    S: SparseStorage,
    S::Scalar: Num + Copy,
    DO: DenseStorage<Pos = S::Pos, Scalar = S::Scalar>,
    DT: DenseStorageMut<Pos = S::Pos, Scalar = S::Scalar>,
{
    binop_to(target, lhs, rhs, |x, y| x - y)
}

/// Compute `alpha * lhs + beta * rhs` into `target`
pub fn lin_comb_to<S, DO, DT>(
    target: Target<'_, S, DT>,
    lhs: Operand<'_, S, DO>,
    rhs: Operand<'_, S, DO>,
    alpha: S::Scalar,
    beta: S::Scalar,
) -> SpRes<()>
where
    S: SparseStorage,
    S::Scalar: Num + Copy,
    DO: DenseStorage<Pos = S::Pos, Scalar = S::Scalar>,
    DT: DenseStorageMut<Pos = S::Pos, Scalar = S::Scalar>,
{
    binop_to(target, lhs, rhs, |x, y| alpha * x + beta * y)
}

impl<'a, N: Num + Copy> MatRef<'a, N> {
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Container::Sparse(m) => m.shape(),
            Container::Dense(m) => m.dim(),
        }
    }

    /// Apply `binop` cell-wise, producing a container of the same kind
    /// as `self`.
    pub fn binop<F>(self, rhs: MatRef<'a, N>, binop: F) -> SpRes<Matrix<N>>
    where
        F: Fn(N, N) -> N,
    {
        match self {
            Container::Sparse(lhs) => {
                let mut res = SparseMat::zeros(lhs.shape());
                binop_to(
                    MatTarget::Sparse(&mut res),
                    MatOperand::Sparse(lhs),
                    rhs.into(),
                    binop,
                )?;
                Ok(Container::Sparse(res))
            }
            Container::Dense(lhs) => {
                let mut res = Array2::zeros(lhs.dim());
                binop_to(
                    MatTarget::Dense(res.view_mut()),
                    MatOperand::Dense(lhs),
                    rhs.into(),
                    binop,
                )?;
                Ok(Container::Dense(res))
            }
        }
    }

    /// `self + rhs`, with the storage kind of `self`
    pub fn add(self, rhs: MatRef<'a, N>) -> SpRes<Matrix<N>> {
        self.binop(rhs, |x, y| x + y)
    }

    /// `self - rhs`, with the storage kind of `self`
    pub fn sub(self, rhs: MatRef<'a, N>) -> SpRes<Matrix<N>> {
        self.binop(rhs, |x, y| x - y)
    }
}

impl<'a, N: Num + Copy> VecRef<'a, N> {
    pub fn dim(&self) -> usize {
        match self {
            Container::Sparse(v) => v.dim(),
            Container::Dense(v) => v.len(),
        }
    }

    /// Apply `binop` cell-wise, producing a container of the same kind
    /// as `self`.
    pub fn binop<F>(self, rhs: VecRef<'a, N>, binop: F) -> SpRes<Vector<N>>
    where
        F: Fn(N, N) -> N,
    {
        match self {
            Container::Sparse(lhs) => {
                let mut res = SparseVec::zeros(lhs.dim());
                binop_to(
                    VecTarget::Sparse(&mut res),
                    VecOperand::Sparse(lhs),
                    rhs.into(),
                    binop,
                )?;
                Ok(Container::Sparse(res))
            }
            Container::Dense(lhs) => {
                let mut res = Array1::zeros(lhs.len());
                binop_to(
                    VecTarget::Dense(res.view_mut()),
                    VecOperand::Dense(lhs),
                    rhs.into(),
                    binop,
                )?;
                Ok(Container::Dense(res))
            }
        }
    }

    /// `self + rhs`, with the storage kind of `self`
    pub fn add(self, rhs: VecRef<'a, N>) -> SpRes<Vector<N>> {
        self.binop(rhs, |x, y| x + y)
    }

    /// `self - rhs`, with the storage kind of `self`
    pub fn sub(self, rhs: VecRef<'a, N>) -> SpRes<Vector<N>> {
        self.binop(rhs, |x, y| x - y)
    }
}

impl<N: Num + Copy> Matrix<N> {
    pub fn view(&self) -> MatRef<'_, N> {
        match self {
            Container::Sparse(m) => Container::Sparse(m),
            Container::Dense(m) => Container::Dense(m.view()),
        }
    }

    /// A new container of the same kind, with every value negated
    pub fn negate(&self) -> Matrix<N>
    where
        N: std::ops::Neg<Output = N>,
    {
        match self {
            Container::Sparse(m) => Container::Sparse(m.negate()),
            Container::Dense(m) => Container::Dense(m.mapv(|x| -x)),
        }
    }

    /// A new container of the same kind, with every value multiplied by `k`
    pub fn scale(&self, k: N) -> Matrix<N> {
        match self {
            Container::Sparse(m) => Container::Sparse(m.scale(k)),
            Container::Dense(m) => Container::Dense(m.mapv(|x| x * k)),
        }
    }
}

impl<N: Num + Copy> Vector<N> {
    pub fn view(&self) -> VecRef<'_, N> {
        match self {
            Container::Sparse(v) => Container::Sparse(v),
            Container::Dense(v) => Container::Dense(v.view()),
        }
    }

    /// A new container of the same kind, with every value negated
    pub fn negate(&self) -> Vector<N>
    where
        N: std::ops::Neg<Output = N>,
    {
        match self {
            Container::Sparse(v) => Container::Sparse(v.negate()),
            Container::Dense(v) => Container::Dense(v.mapv(|x| -x)),
        }
    }

    /// A new container of the same kind, with every value multiplied by `k`
    pub fn scale(&self, k: N) -> Vector<N> {
        match self {
            Container::Sparse(v) => Container::Sparse(v.scale(k)),
            Container::Dense(v) => Container::Dense(v.mapv(|x| x * k)),
        }
    }
}
