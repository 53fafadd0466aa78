//! A sparse matrix, storing the positions of its non-zero entries in
//! row-major order.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use ndarray::{Array2, ArrayBase, ArrayView2};
use num_traits::{Num, Zero};

use super::binop::{self, MatOperand, MatTarget};
use super::sealed::StoreAccess;
use super::store::{NnzStore, StoreIter};
use super::vec::SparseVec;
use super::SparseStorage;
use crate::errors::SpError;
use crate::indexing::SpPosition;
use crate::{Ix2, SpRes};

/// A sparse matrix
///
/// A `SparseMat` has fixed dimensions `(rows, cols)` and stores its non-zero
/// values in a [`NnzStore`] keyed by `(row, col)`. Construction always
/// copies its source, which is never retained.
///
/// Setting a cell to zero removes its entry, so `nnz()` is at all times the
/// number of cells holding a non-zero value. Memory use is proportional to
/// that count, not to `rows * cols`: a million by million matrix is
/// perfectly usable as long as it is sparse.
///
/// # Example
///
/// ```rust
/// use spmat::SparseMat;
/// let mut m = SparseMat::zeros((3, 4));
/// m.set(1, 2, 5.).unwrap();
/// assert_eq!(m.get(1, 2), Ok(5.));
/// assert_eq!(m.get(0, 0), Ok(0.));
/// assert!(m.get(3, 0).is_err());
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct SparseMat<N> {
    nrows: usize,
    ncols: usize,
    store: NnzStore<(usize, usize), N>,
}

impl<N> SparseMat<N> {
    /// Create an all-zero matrix of the given shape
    pub fn zeros((nrows, ncols): (usize, usize)) -> Self {
        Self {
            nrows,
            ncols,
            store: NnzStore::new(),
        }
    }

    /// Create an all-zero square matrix
    pub fn square(order: usize) -> Self {
        Self::zeros((order, order))
    }

    /// Create a matrix from its raw non-zero entries, given in row-major
    /// order.
    ///
    /// # Errors
    ///
    /// If the entries do not describe a valid compact storage: unsorted or
    /// duplicate positions, explicit zeros, positions outside the shape, or
    /// a length mismatch between `indices` and `data`.
    pub fn try_from_parts(
        shape: (usize, usize),
        indices: Vec<(usize, usize)>,
        data: Vec<N>,
    ) -> SpRes<Self>
    where
        N: Zero,
    {
        let store = NnzStore::try_from_parts(indices, data, |pos| {
            pos.in_bounds(shape)
        })?;
        Ok(Self {
            nrows: shape.0,
            ncols: shape.1,
            store,
        })
    }

    pub(crate) fn from_store(
        (nrows, ncols): (usize, usize),
        store: NnzStore<(usize, usize), N>,
    ) -> Self {
        Self {
            nrows,
            ncols,
            store,
        }
    }

    /// The number of rows of this matrix
    pub fn rows(&self) -> usize {
        self.nrows
    }

    /// The number of columns of this matrix
    pub fn cols(&self) -> usize {
        self.ncols
    }

    /// The shape of this matrix, as `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// The number of non-zero entries of this matrix
    pub fn nnz(&self) -> usize {
        self.store.nnz()
    }

    /// Access the non-zero entries
    pub fn store(&self) -> &NnzStore<(usize, usize), N> {
        &self.store
    }

    /// Decompose into the shape and the row-major non-zero entries
    pub fn into_parts(self) -> ((usize, usize), Vec<(usize, usize)>, Vec<N>) {
        let shape = self.shape();
        let (indices, data) = self.store.into_parts();
        (shape, indices, data)
    }

    /// Remove every non-zero entry, keeping the shape
    pub fn clear(&mut self) {
        self.store.clear();
    }

    fn check_bounds(&self, pos: (usize, usize)) -> SpRes<()> {
        if pos.in_bounds(self.shape()) {
            Ok(())
        } else {
            Err(SpError::out_of_bounds(pos, self.shape()))
        }
    }
}

impl<N: Num + Copy> SparseMat<N> {
    /// Create a matrix from a row-major slice of `rows * cols` values.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the slice length is not `rows * cols`.
    pub fn from_row_major(
        (nrows, ncols): (usize, usize),
        data: &[N],
    ) -> SpRes<Self> {
        match nrows.checked_mul(ncols) {
            Some(len) if len == data.len() => (),
            _ => {
                return Err(SpError::DimensionMismatch {
                    expected: format!("{nrows} * {ncols} values"),
                    found: format!("{} values", data.len()),
                })
            }
        }
        let mut store = NnzStore::new();
        let positions = <(usize, usize)>::positions((nrows, ncols));
        for (pos, &val) in positions.zip(data) {
            store.append(pos, val);
        }
        Ok(Self::from_store((nrows, ncols), store))
    }

    /// Create a matrix holding a copy of the non-zero values of a dense
    /// array, whatever its memory layout.
    pub fn from_dense(m: ArrayView2<N>) -> Self {
        let mut store = NnzStore::new();
        for (pos, &val) in m.indexed_iter() {
            store.append(pos, val);
        }
        Self::from_store(m.dim(), store)
    }

    /// Create a matrix from a list of rows of equal length
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the rows are ragged.
    ///
    /// ```rust
    /// use spmat::SparseMat;
    /// let m = SparseMat::from_rows(&[[1., 0.], [0., 2.]]).unwrap();
    /// let flat = SparseMat::from_row_major((2, 2), &[1., 0., 0., 2.]).unwrap();
    /// assert_eq!(m, flat);
    /// let ragged = SparseMat::from_rows(&[vec![1.], vec![0., 2.]]);
    /// assert!(ragged.is_err());
    /// ```
    pub fn from_rows<R: AsRef<[N]>>(rows: &[R]) -> SpRes<Self> {
        let ncols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut store = NnzStore::new();
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(SpError::dim_mismatch(ncols, row.len()));
            }
            for (j, &val) in row.iter().enumerate() {
                store.append((i, j), val);
            }
        }
        Ok(Self::from_store((rows.len(), ncols), store))
    }

    /// Create the identity matrix of the given order.
    ///
    /// Only the diagonal is allocated, which makes large orders cheap.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `order` is zero.
    pub fn eye(order: usize) -> SpRes<Self> {
        if order == 0 {
            return Err(SpError::InvalidArgument(
                "identity order must be positive",
            ));
        }
        log::trace!("building identity of order {}", order);
        let mut store = NnzStore::with_capacity(order);
        for i in 0..order {
            store.append((i, i), N::one());
        }
        Ok(Self::from_store((order, order), store))
    }

    /// The value of cell `(i, j)`, zero when no entry is stored there.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `(i, j)` lies outside the matrix.
    pub fn get(&self, i: usize, j: usize) -> SpRes<N> {
        self.check_bounds((i, j))?;
        Ok(self.store.get((i, j)))
    }

    /// Assign a value to cell `(i, j)`. Assigning zero removes the entry.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `(i, j)` lies outside the matrix. The matrix is
    /// left unchanged.
    pub fn set(&mut self, i: usize, j: usize, val: N) -> SpRes<()> {
        self.check_bounds((i, j))?;
        self.store.set((i, j), val);
        Ok(())
    }

    /// Iterate over the non-zero entries as `((row, col), value)`, in
    /// row-major order.
    pub fn iter(&self) -> StoreIter<'_, (usize, usize), N> {
        self.store.iter()
    }

    pub fn to_dense(&self) -> Array2<N> {
        let mut res = Array2::zeros(self.shape());
        for ((i, j), val) in self.iter() {
            res[[i, j]] = val;
        }
        res
    }

    /// The transposed matrix
    pub fn transpose(&self) -> Self {
        let mut entries: Vec<_> =
            self.iter().map(|((i, j), val)| ((j, i), val)).collect();
        entries.sort_unstable_by_key(|&(pos, _)| pos);
        let mut store = NnzStore::with_capacity(entries.len());
        for (pos, val) in entries {
            store.append(pos, val);
        }
        Self::from_store((self.ncols, self.nrows), store)
    }

    /// A copy of row `i`, as a sparse vector of dimension `cols()`
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `i >= rows()`.
    pub fn row(&self, i: usize) -> SpRes<SparseVec<N>> {
        if i >= self.nrows {
            return Err(SpError::out_of_bounds(i, self.nrows));
        }
        let indices = self.store.indices();
        let start = indices.partition_point(|&(row, _)| row < i);
        let end = indices.partition_point(|&(row, _)| row <= i);
        let mut store = NnzStore::with_capacity(end - start);
        for (&(_, j), &val) in indices[start..end]
            .iter()
            .zip(&self.store.data()[start..end])
        {
            store.append(j, val);
        }
        Ok(SparseVec::from_store(self.ncols, store))
    }

    /// Apply `f` to every non-zero value, returning a new matrix.
    /// Entries mapped to zero are dropped.
    ///
    /// Zero cells are not visited: `f(0)` is assumed to be zero.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(N) -> N,
    {
        let mut res = self.clone();
        res.map_inplace(f);
        res
    }

    /// In place version of `map`
    pub fn map_inplace<F>(&mut self, mut f: F)
    where
        F: FnMut(N) -> N,
    {
        self.store.map_inplace(|&x| f(x));
    }

    /// A new matrix with every value multiplied by `k`
    pub fn scale(&self, k: N) -> Self {
        self.map(|x| x * k)
    }

    /// A new matrix with every value negated, sharing the structure of
    /// this one.
    pub fn negate(&self) -> Self
    where
        N: Neg<Output = N>,
    {
        self.map(|x| -x)
    }
}

impl<N> StoreAccess for SparseMat<N> {
    type Pos = (usize, usize);
    type Scalar = N;

    fn store_mut(&mut self) -> &mut NnzStore<(usize, usize), N> {
        &mut self.store
    }
}

impl<N> SparseStorage for SparseMat<N> {
    fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    fn store(&self) -> &NnzStore<(usize, usize), N> {
        &self.store
    }
}

fn sparse_binop<'a, N, F>(
    lhs: &'a SparseMat<N>,
    rhs: MatOperand<'a, N>,
    binop: F,
) -> SparseMat<N>
where
    N: Num + Copy,
    F: Fn(N, N) -> N,
{
    let mut res = SparseMat::zeros(lhs.shape());
    let target = MatTarget::Sparse(&mut res);
    binop::binop_to(target, MatOperand::Sparse(lhs), rhs, binop)
        .unwrap_or_else(|e| panic!("{}", e));
    res
}

impl<'a, 'b, N> Add<&'b SparseMat<N>> for &'a SparseMat<N>
where
    N: Num + Copy,
{
    type Output = SparseMat<N>;

    fn add(self, rhs: &'b SparseMat<N>) -> SparseMat<N> {
        sparse_binop(self, MatOperand::Sparse(rhs), |x, y| x + y)
    }
}

impl<'a, 'b, N> Sub<&'b SparseMat<N>> for &'a SparseMat<N>
where
    N: Num + Copy,
{
    type Output = SparseMat<N>;

    fn sub(self, rhs: &'b SparseMat<N>) -> SparseMat<N> {
        sparse_binop(self, MatOperand::Sparse(rhs), |x, y| x - y)
    }
}

impl<'a, 'b, N, S> Add<&'b ArrayBase<S, Ix2>> for &'a SparseMat<N>
where
    N: Num + Copy,
    S: ndarray::Data<Elem = N>,
{
    type Output = SparseMat<N>;

    fn add(self, rhs: &'b ArrayBase<S, Ix2>) -> SparseMat<N> {
        sparse_binop(self, MatOperand::Dense(rhs.view()), |x, y| x + y)
    }
}

impl<'a, 'b, N, S> Sub<&'b ArrayBase<S, Ix2>> for &'a SparseMat<N>
where
    N: Num + Copy,
    S: ndarray::Data<Elem = N>,
{
    type Output = SparseMat<N>;

    fn sub(self, rhs: &'b ArrayBase<S, Ix2>) -> SparseMat<N> {
        sparse_binop(self, MatOperand::Dense(rhs.view()), |x, y| x - y)
    }
}

impl<'b, N: Num + Copy> AddAssign<&'b SparseMat<N>> for SparseMat<N> {
    fn add_assign(&mut self, rhs: &'b SparseMat<N>) {
        binop::add_to(
            MatTarget::Sparse(self),
            MatOperand::Target,
            MatOperand::Sparse(rhs),
        )
        .unwrap_or_else(|e| panic!("{}", e));
    }
}

impl<'b, N: Num + Copy> SubAssign<&'b SparseMat<N>> for SparseMat<N> {
    fn sub_assign(&mut self, rhs: &'b SparseMat<N>) {
        binop::sub_to(
            MatTarget::Sparse(self),
            MatOperand::Target,
            MatOperand::Sparse(rhs),
        )
        .unwrap_or_else(|e| panic!("{}", e));
    }
}

impl<'b, N, S> AddAssign<&'b ArrayBase<S, Ix2>> for SparseMat<N>
where
    N: Num + Copy,
    S: ndarray::Data<Elem = N>,
{
    fn add_assign(&mut self, rhs: &'b ArrayBase<S, Ix2>) {
        binop::add_to(
            MatTarget::Sparse(self),
            MatOperand::Target,
            MatOperand::Dense(rhs.view()),
        )
        .unwrap_or_else(|e| panic!("{}", e));
    }
}

impl<'b, N, S> SubAssign<&'b ArrayBase<S, Ix2>> for SparseMat<N>
where
    N: Num + Copy,
    S: ndarray::Data<Elem = N>,
{
    fn sub_assign(&mut self, rhs: &'b ArrayBase<S, Ix2>) {
        binop::sub_to(
            MatTarget::Sparse(self),
            MatOperand::Target,
            MatOperand::Dense(rhs.view()),
        )
        .unwrap_or_else(|e| panic!("{}", e));
    }
}

impl<'a, N> Neg for &'a SparseMat<N>
where
    N: Num + Copy + Neg<Output = N>,
{
    type Output = SparseMat<N>;

    fn neg(self) -> SparseMat<N> {
        self.negate()
    }
}

impl<N> Neg for SparseMat<N>
where
    N: Num + Copy + Neg<Output = N>,
{
    type Output = SparseMat<N>;

    fn neg(mut self) -> SparseMat<N> {
        self.map_inplace(|x| -x);
        self
    }
}

impl<'a, N: Num + Copy> Mul<N> for &'a SparseMat<N> {
    type Output = SparseMat<N>;

    fn mul(self, rhs: N) -> SparseMat<N> {
        self.scale(rhs)
    }
}

macro_rules! scalar_lhs_mul_impl {
    ($scalar: ty) => {
        impl<'a> Mul<&'a SparseMat<$scalar>> for $scalar {
            type Output = SparseMat<$scalar>;

            fn mul(self, rhs: &'a SparseMat<$scalar>) -> SparseMat<$scalar> {
                rhs.scale(self)
            }
        }
    };
}

scalar_lhs_mul_impl!(f32);
scalar_lhs_mul_impl!(f64);
scalar_lhs_mul_impl!(i32);
scalar_lhs_mul_impl!(i64);

#[cfg(test)]
mod test {
    use super::SparseMat;
    use crate::errors::SpError;
    use crate::sparse::binop::{add_to, sub_to, MatOperand, MatTarget};
    use crate::test_data::{mat1, mat1_dense, mat1_times_2, mat2, mat3};
    use crate::SparseVec;
    use ndarray::{arr1, arr2, Array2, ShapeBuilder};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn construction_copies_the_source() {
        let mut data = [1f32, 0., 2., 3.];
        let m = SparseMat::from_row_major((2, 2), &data).unwrap();
        data[0] = 10.;
        assert_eq!(m.get(0, 0), Ok(1.));

        let mut dense = arr2(&[[1f32, 0.], [2., 3.]]);
        let m = SparseMat::from_dense(dense.view());
        dense[[1, 1]] = 10.;
        assert_eq!(m.get(1, 1), Ok(3.));
        assert_eq!(m.nnz(), 3);

        let source = [1f32, 1., 1., 1., 1., 1., 2., 2., 2.];
        let mut m = SparseMat::from_row_major((3, 3), &source).unwrap();
        m.set(0, 0, 10.).unwrap();
        assert_eq!(source[0], 1.);
        assert_eq!(m.get(0, 0), Ok(10.));
        assert_eq!(m.get(2, 2), Ok(2.));
    }

    #[test]
    fn row_major_construction() {
        let m = SparseMat::from_row_major((2, 3), &[0., 1., 0., 2., 0., 3.])
            .unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.get(0, 1), Ok(1.));
        assert_eq!(m.get(1, 0), Ok(2.));
        assert_eq!(m.get(1, 2), Ok(3.));
        assert_eq!(m.nnz(), 3);
        let res = SparseMat::from_row_major((2, 3), &[0., 1., 0.]);
        assert!(matches!(res, Err(SpError::DimensionMismatch { .. })));
    }

    #[test]
    fn construction_from_any_layout() {
        let mut f_order = Array2::<f64>::zeros((3, 2).f());
        f_order[[0, 1]] = 1.;
        f_order[[2, 0]] = 2.;
        let m = SparseMat::from_dense(f_order.view());
        assert_eq!(m.store().indices(), &[(0, 1), (2, 0)]);
        assert_eq!(m, f_order);
    }

    #[test]
    fn ragged_rows() {
        let res = SparseMat::from_rows(&[vec![1., 2.], vec![3.]]);
        assert_eq!(
            res.unwrap_err(),
            SpError::DimensionMismatch {
                expected: "2".into(),
                found: "1".into()
            }
        );
        let empty = SparseMat::<f64>::from_rows::<[f64; 0]>(&[]).unwrap();
        assert_eq!(empty.shape(), (0, 0));
    }

    #[test]
    fn identity() {
        let eye = SparseMat::<f32>::eye(5).unwrap();
        assert_eq!(eye.nnz(), 5);
        for i in 0..5 {
            for j in 0..5 {
                let expected = if i == j { 1. } else { 0. };
                assert_eq!(eye.get(i, j), Ok(expected));
            }
        }
        assert_eq!(
            SparseMat::<f32>::eye(0),
            Err(SpError::InvalidArgument("identity order must be positive"))
        );
    }

    #[test]
    fn large_identity() {
        let eye = SparseMat::<f64>::eye(300_000).unwrap();
        assert_eq!(eye.nnz(), 300_000);
        assert_eq!(eye.get(299_999, 299_999), Ok(1.));
        assert_eq!(eye.get(0, 299_999), Ok(0.));
    }

    #[test]
    fn large_sparse_matrix() {
        let mut rng = SmallRng::seed_from_u64(123);
        let mut m = SparseMat::zeros((500, 1000));
        let mut nonzero = 0;
        for i in 0..m.rows() {
            for j in 0..m.cols() {
                let val: i64 =
                    (0..5).map(|_| rng.random_range(0..10)).product();
                if val != 0 {
                    nonzero += 1;
                }
                m.set(i, j, val as f32).unwrap();
            }
        }
        assert_eq!(m.nnz(), nonzero);
    }

    #[test]
    fn huge_zero_matrix() {
        let order = 1_000_000;
        let mut m = SparseMat::square(order);
        assert_eq!(m.rows(), order);
        assert_eq!(m.cols(), order);
        m.set(0, 0, 1f32).unwrap();
        assert_eq!(m.nnz(), 1);
    }

    #[test]
    fn set_keeps_storage_compact() {
        let mut m = SparseMat::zeros((3, 3));
        m.set(2, 2, 1.).unwrap();
        m.set(0, 1, 2.).unwrap();
        m.set(0, 1, 3.).unwrap();
        assert_eq!(m.nnz(), 2);
        m.set(2, 2, 0.).unwrap();
        assert_eq!(m.nnz(), 1);
        m.set(1, 1, 0.).unwrap();
        assert_eq!(m.nnz(), 1);
        assert_eq!(m.get(0, 1), Ok(3.));
    }

    #[test]
    fn out_of_bounds() {
        let mut m = SparseMat::<f64>::zeros((2, 3));
        assert_eq!(
            m.get(2, 0).unwrap_err().to_string(),
            "index (2, 0) is out of bounds for shape (2, 3)"
        );
        assert!(m.set(0, 3, 1.).is_err());
        assert_eq!(m.nnz(), 0);
    }

    #[test]
    fn raw_parts() {
        let m = SparseMat::try_from_parts(
            (2, 2),
            vec![(0, 1), (1, 0)],
            vec![1., 2.],
        )
        .unwrap();
        assert_eq!(m, arr2(&[[0., 1.], [2., 0.]]));
        let indices = vec![(0, 1), (2, 0)];
        let res = SparseMat::try_from_parts((2, 2), indices, vec![1., 2.]);
        assert!(matches!(res, Err(SpError::OutOfBounds { .. })));
        let (shape, indices, data) = m.into_parts();
        assert_eq!(shape, (2, 2));
        assert_eq!(indices, vec![(0, 1), (1, 0)]);
        assert_eq!(data, vec![1., 2.]);
    }

    #[test]
    fn transpose_and_rows() {
        let m = mat1();
        assert_eq!(m.transpose(), mat1_dense().t());
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.row(1).unwrap(), arr1(&[0., 0., 0., 2., 5.]));
        let row4 = SparseVec::from_dense(&[0., 0., 0., 7., 0.]);
        assert_eq!(m.row(4).unwrap(), row4);
        assert!(m.row(5).is_err());
        let rect = mat3();
        assert_eq!(rect.transpose().shape(), (4, 5));
    }

    #[test]
    fn scale_and_negate() {
        assert_eq!(mat1().scale(2.), mat1_times_2());
        assert_eq!(&mat1() * 2., mat1_times_2());
        assert_eq!(2. * &mat1(), mat1_times_2());
        assert_eq!(mat1().scale(0.).nnz(), 0);
        let neg = -&mat1();
        assert_eq!(neg.store().indices(), mat1().store().indices());
        assert_eq!(neg, -mat1_dense());
        assert_eq!(-neg, mat1());
    }

    #[test]
    fn add_both_ways() {
        let m1 = SparseMat::<f32>::zeros((1, 3));
        let m2 = SparseMat::from_rows(&[[0., 1., 1.]]).unwrap();
        let sum1 = &m1 + &m2;
        let sum2 = &m2 + &m1;
        assert_eq!(sum1, m2);
        assert_eq!(sum1, sum2);

        let mut res = SparseMat::zeros((1, 3));
        let rhs = MatOperand::from(&m2);
        add_to(MatTarget::from(&mut res), MatOperand::Target, rhs).unwrap();
        assert_eq!(res, sum1);

        let mut res = m2.clone();
        res += &m1;
        assert_eq!(res, sum1);

        let mut res = m2.clone();
        let lhs = MatOperand::from(&m1);
        add_to(MatTarget::from(&mut res), lhs, MatOperand::Target).unwrap();
        assert_eq!(res, sum1);

        let mut res = m2.clone();
        let target = MatTarget::from(&mut res);
        add_to(target, MatOperand::Target, MatOperand::Target).unwrap();
        assert_eq!(res, &sum1 * 2.);

        let mut dense = Array2::zeros((1, 3));
        let rhs = MatOperand::from(&m2);
        add_to(MatTarget::from(&mut dense), MatOperand::Target, rhs).unwrap();
        assert_eq!(sum1, dense);

        let mut dense = arr2(&[[0., 1., 1.]]);
        let rhs = MatOperand::from(&m1);
        add_to(MatTarget::from(&mut dense), MatOperand::Target, rhs).unwrap();
        assert_eq!(sum1, dense);

        let m3 = arr2(&[[0f32, 1., 1.]]);
        let sum3 = &m1 + &m3;
        assert_eq!(sum3, m3);
    }

    #[test]
    fn subtract_both_ways() {
        let m1 = SparseMat::<f32>::zeros((1, 3));
        let m2 = SparseMat::from_rows(&[[0., 1., 1.]]).unwrap();
        let diff1 = &m1 - &m2;
        let diff2 = &m2 - &m1;
        assert_eq!(diff1, m2.negate());
        assert_eq!(diff1, diff2.negate());

        let mut res = SparseMat::zeros((1, 3));
        let rhs = MatOperand::from(&m2);
        sub_to(MatTarget::from(&mut res), MatOperand::Target, rhs).unwrap();
        assert_eq!(res, diff1);

        let mut res = m2.clone();
        res -= &m1;
        assert_eq!(res, diff2);

        let mut res = m2.clone();
        let lhs = MatOperand::from(&m1);
        sub_to(MatTarget::from(&mut res), lhs, MatOperand::Target).unwrap();
        assert_eq!(res, diff1);

        let mut res = m2.clone();
        let target = MatTarget::from(&mut res);
        sub_to(target, MatOperand::Target, MatOperand::Target).unwrap();
        assert_eq!(res, &diff1 * 0.);
        assert_eq!(res.nnz(), 0);

        let mut dense = Array2::zeros((1, 3));
        let rhs = MatOperand::from(&m2);
        sub_to(MatTarget::from(&mut dense), MatOperand::Target, rhs).unwrap();
        assert_eq!(diff1, dense);

        let mut dense = arr2(&[[0., 1., 1.]]);
        let rhs = MatOperand::from(&m1);
        sub_to(MatTarget::from(&mut dense), MatOperand::Target, rhs).unwrap();
        assert_eq!(diff2, dense);

        let m3 = arr2(&[[0f32, 1., 1.]]);
        let diff3 = &m1 - &m3;
        assert_eq!(diff3, -&m3);
    }

    #[test]
    fn mixed_operands() {
        let a = mat1();
        let b = mat2();
        let b_dense = b.to_dense();
        assert_eq!(&a - &b, (&b - &a).negate());
        assert_eq!(&a - &b_dense, (&b - &a.to_dense()).negate());
        assert_eq!(&a + &b_dense, &a + &b);

        let mut c = a.clone();
        c += &b_dense;
        c -= &b;
        assert_eq!(c, a);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn operator_dimension_mismatch() {
        let _ = &mat1() + &mat3();
    }

    #[test]
    fn map_drops_zeros() {
        let m = mat1().map(|x| if x > 4. { x } else { 0. });
        assert_eq!(m.nnz(), 4);
        let mut m = mat1();
        m.clear();
        assert_eq!(m, SparseMat::zeros((5, 5)));
    }
}
