//! Compact storage of the non-zero entries of a sparse container
//!
//! A `NnzStore` keeps two parallel arrays, the sorted positions of the
//! non-zero entries and their values. It is the storage shared by
//! [`SparseVec`](crate::SparseVec), with `usize` positions, and
//! [`SparseMat`](crate::SparseMat), with `(row, col)` positions.
//!
//! The store maintains the following invariants:
//!
//! - positions are strictly increasing, hence unique
//! - no stored value is zero
//!
//! so that `nnz()` is always the number of non-zero cells of the container.
//!
//! # Example
//!
//! ```rust
//! use spmat::sparse::store::NnzStore;
//! let mut store = NnzStore::new();
//! store.set(4usize, 2.);
//! store.set(1, 3.);
//! store.set(4, 0.);
//! assert_eq!(store.nnz(), 1);
//! assert_eq!(store.get(1), 3.);
//! assert_eq!(store.get(4), 0.);
//! ```
use std::cmp;
use std::iter::{Peekable, Zip};
use std::slice::Iter;

use num_traits::Zero;

use crate::errors::SpError;
use crate::indexing::SpPosition;
use crate::SpRes;

#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct NnzStore<K, N> {
    indices: Vec<K>,
    data: Vec<N>,
}

impl<K: SpPosition, N> Default for NnzStore<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: SpPosition, N> NnzStore<K, N> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            indices: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Create an empty store able to hold `cap` entries without reallocating
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            indices: Vec::with_capacity(cap),
            data: Vec::with_capacity(cap),
        }
    }

    /// Create a store from raw parts, checking its structure.
    ///
    /// `in_bounds` tells whether a position is legal for the owning
    /// container.
    pub fn try_from_parts<F>(
        indices: Vec<K>,
        data: Vec<N>,
        in_bounds: F,
    ) -> SpRes<Self>
    where
        N: Zero,
        F: Fn(K) -> bool,
    {
        let store = Self { indices, data };
        store.check_structure(in_bounds)?;
        Ok(store)
    }

    /// The number of stored entries, ie the number of non-zero cells
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The sorted positions of the non-zero entries
    pub fn indices(&self) -> &[K] {
        &self.indices
    }

    /// The non-zero values, in the order of `indices()`
    pub fn data(&self) -> &[N] {
        &self.data
    }

    /// Decompose the store into its positions and values
    pub fn into_parts(self) -> (Vec<K>, Vec<N>) {
        (self.indices, self.data)
    }

    /// Find the offset of `pos` in the storage arrays.
    ///
    /// Returns `Err` with the insertion offset if no entry is stored at `pos`.
    pub fn nnz_index(&self, pos: K) -> Result<usize, usize> {
        // fast path for building in increasing order
        match self.indices.last() {
            None => return Err(0),
            Some(&last) if last < pos => return Err(self.indices.len()),
            _ => (),
        }
        self.indices.binary_search(&pos)
    }

    /// Reference to the value stored at `pos`, if any.
    pub fn get_ref(&self, pos: K) -> Option<&N> {
        self.nnz_index(pos).ok().map(|i| &self.data[i])
    }

    /// The value at `pos`, zero if nothing is stored there
    pub fn get(&self, pos: K) -> N
    where
        N: Zero + Copy,
    {
        self.get_ref(pos).copied().unwrap_or_else(N::zero)
    }

    /// Assign `val` at `pos`.
    ///
    /// Assigning zero removes the entry at `pos`, assigning a non-zero value
    /// updates the existing entry or inserts a new one at its sorted place.
    pub fn set(&mut self, pos: K, val: N)
    where
        N: Zero,
    {
        match self.nnz_index(pos) {
            Ok(i) if val.is_zero() => {
                self.indices.remove(i);
                self.data.remove(i);
            }
            Ok(i) => self.data[i] = val,
            Err(_) if val.is_zero() => (),
            Err(i) if i == self.indices.len() => {
                self.indices.push(pos);
                self.data.push(val);
            }
            Err(i) => {
                self.indices.insert(i, pos);
                self.data.insert(i, val);
            }
        }
    }

    /// Append an entry at the end of the store. Used for incremental
    /// building in increasing position order. Zero values are skipped.
    ///
    /// # Panics
    ///
    /// - if `pos` is lower or equal to the last stored position
    pub fn append(&mut self, pos: K, val: N)
    where
        N: Zero,
    {
        if let Some(&last) = self.indices.last() {
            assert!(pos > last, "unsorted append");
        }
        if !val.is_zero() {
            self.indices.push(pos);
            self.data.push(val);
        }
    }

    /// Reserve `size` additional entries.
    pub fn reserve(&mut self, size: usize) {
        self.indices.reserve(size);
        self.data.reserve(size);
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.indices.clear();
        self.data.clear();
    }

    /// Iterate over the stored entries, in position order.
    pub fn iter(&self) -> StoreIter<'_, K, N> {
        StoreIter {
            ind_data: self.indices.iter().zip(self.data.iter()),
        }
    }

    /// Apply a function to every stored value, dropping the entries
    /// which become zero.
    pub fn map_inplace<F>(&mut self, mut f: F)
    where
        N: Zero,
        F: FnMut(&N) -> N,
    {
        for val in self.data.iter_mut() {
            *val = f(val);
        }
        self.retain_nonzero();
    }

    /// Keep only the entries for which `f` returns true
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(K, &N) -> bool,
    {
        let mut kept = 0;
        for i in 0..self.data.len() {
            if f(self.indices[i], &self.data[i]) {
                self.indices.swap(kept, i);
                self.data.swap(kept, i);
                kept += 1;
            }
        }
        self.indices.truncate(kept);
        self.data.truncate(kept);
    }

    /// Drop the explicitly stored zeros
    pub fn retain_nonzero(&mut self)
    where
        N: Zero,
    {
        self.retain(|_, val| !val.is_zero());
    }

    /// Check the store invariants, namely that:
    /// - indices and data have the same length
    /// - indices are sorted and unique
    /// - no zero is stored
    /// - every index satisfies `in_bounds`
    pub fn check_structure<F>(&self, in_bounds: F) -> SpRes<()>
    where
        N: Zero,
        F: Fn(K) -> bool,
    {
        if self.indices.len() != self.data.len() {
            return Err(SpError::DataIndicesMismatch);
        }
        for w in self.indices.windows(2) {
            match w[0].cmp(&w[1]) {
                cmp::Ordering::Less => (),
                cmp::Ordering::Equal => {
                    return Err(SpError::DuplicateIndex(format!("{:?}", w[0])))
                }
                cmp::Ordering::Greater => {
                    return Err(SpError::NonSortedIndices)
                }
            }
        }
        for (&ind, val) in self.indices.iter().zip(self.data.iter()) {
            if val.is_zero() {
                return Err(SpError::ExplicitZero(format!("{ind:?}")));
            }
            if !in_bounds(ind) {
                return Err(SpError::OutOfBounds {
                    index: format!("{ind:?}"),
                    bound: "container shape".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// An iterator over the entries of a store, yielding `(position, value)`
#[derive(Clone)]
pub struct StoreIter<'a, K, N> {
    ind_data: Zip<Iter<'a, K>, Iter<'a, N>>,
}

impl<'a, K: Copy, N: Copy> Iterator for StoreIter<'a, K, N> {
    type Item = (K, N);

    fn next(&mut self) -> Option<(K, N)> {
        self.ind_data.next().map(|(&ind, &val)| (ind, val))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ind_data.size_hint()
    }
}

impl<'a, K: Copy, N: Copy> ExactSizeIterator for StoreIter<'a, K, N> {}

pub trait SparseIterTools: Iterator {
    /// Iterate over the non-zero entries of either of two sorted entry
    /// iterators. This is the building block of sparse addition.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spmat::sparse::store::{NnzEither, NnzStore, SparseIterTools};
    /// let mut v0 = NnzStore::new();
    /// v0.append(0usize, 1.);
    /// v0.append(2, 2.);
    /// let mut v1 = NnzStore::new();
    /// v1.append(1usize, -1.);
    /// v1.append(2, -2.);
    /// let mut it = v0.iter().nnz_or_zip(v1.iter());
    /// assert_eq!(it.next(), Some(NnzEither::Left((0, 1.))));
    /// assert_eq!(it.next(), Some(NnzEither::Right((1, -1.))));
    /// assert_eq!(it.next(), Some(NnzEither::Both((2, 2., -2.))));
    /// assert_eq!(it.next(), None);
    /// ```
    fn nnz_or_zip<K, N1, N2, I>(self, other: I) -> NnzOrZip<Self, I::IntoIter>
    where
        Self: Iterator<Item = (K, N1)> + Sized,
        I: IntoIterator<Item = (K, N2)>,
        K: Ord,
    {
        NnzOrZip {
            left: self.peekable(),
            right: other.into_iter().peekable(),
        }
    }
}

impl<T: Iterator> SparseIterTools for T {}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum NnzEither<K, N1, N2> {
    Both((K, N1, N2)),
    Left((K, N1)),
    Right((K, N2)),
}

impl<K: Copy, N1, N2> NnzEither<K, N1, N2> {
    pub fn position(&self) -> K {
        match *self {
            NnzEither::Both((k, _, _))
            | NnzEither::Left((k, _))
            | NnzEither::Right((k, _)) => k,
        }
    }
}

/// An iterator over the entries of either of two sorted entry iterators,
/// ordered, such that the sum of the containers may be computed
pub struct NnzOrZip<Ite1: Iterator, Ite2: Iterator> {
    left: Peekable<Ite1>,
    right: Peekable<Ite2>,
}

impl<K, N1, N2, Ite1, Ite2> Iterator for NnzOrZip<Ite1, Ite2>
where
    K: Ord,
    Ite1: Iterator<Item = (K, N1)>,
    Ite2: Iterator<Item = (K, N2)>,
{
    type Item = NnzEither<K, N1, N2>;

    fn next(&mut self) -> Option<NnzEither<K, N1, N2>> {
        let order = match (self.left.peek(), self.right.peek()) {
            (None, None) => return None,
            (Some(_), None) => cmp::Ordering::Less,
            (None, Some(_)) => cmp::Ordering::Greater,
            (Some((lind, _)), Some((rind, _))) => lind.cmp(rind),
        };
        match order {
            cmp::Ordering::Less => self.left.next().map(NnzEither::Left),
            cmp::Ordering::Greater => self.right.next().map(NnzEither::Right),
            cmp::Ordering::Equal => {
                let (ind, lval) = self.left.next()?;
                let (_, rval) = self.right.next()?;
                Some(NnzEither::Both((ind, lval, rval)))
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (left_lower, left_upper) = self.left.size_hint();
        let (right_lower, right_upper) = self.right.size_hint();
        let upper = match (left_upper, right_upper) {
            (Some(x), Some(y)) => Some(x + y),
            _ => None,
        };
        (cmp::max(left_lower, right_lower), upper)
    }
}

#[cfg(test)]
mod test {
    use super::{NnzEither, NnzStore, SparseIterTools};
    use crate::errors::SpError;

    #[test]
    fn set_keeps_store_compact() {
        let mut store = NnzStore::new();
        store.set((1, 2), 3.);
        store.set((0, 4), 1.);
        store.set((1, 2), 5.);
        assert_eq!(store.nnz(), 2);
        assert_eq!(store.indices(), &[(0, 4), (1, 2)]);
        assert_eq!(store.data(), &[1., 5.]);

        store.set((0, 4), 0.);
        assert_eq!(store.nnz(), 1);
        assert_eq!(store.get((0, 4)), 0.);

        // setting zero on an absent position is a no-op
        store.set((3, 3), 0.);
        assert_eq!(store.nnz(), 1);
    }

    #[test]
    fn emptiness_and_lookup() {
        let mut store = NnzStore::<usize, f64>::with_capacity(2);
        assert!(store.is_empty());
        assert_eq!(store.get_ref(3), None);

        store.reserve(10);
        assert!(store.is_empty());
        store.set(3, 2.5);
        assert!(!store.is_empty());
        assert_eq!(store.get_ref(3), Some(&2.5));
        assert_eq!(store.get_ref(4), None);

        store.set(3, 0.);
        assert!(store.is_empty());
        assert_eq!(store.get_ref(3), None);
    }

    #[test]
    fn insertion_keeps_order() {
        let mut store = NnzStore::new();
        for &i in &[7usize, 3, 9, 1, 5] {
            store.set(i, i as f32);
        }
        assert_eq!(store.indices(), &[1, 3, 5, 7, 9]);
        assert_eq!(store.data(), &[1., 3., 5., 7., 9.]);
        let collected: Vec<_> = store.iter().collect();
        let again: Vec<_> = store.iter().collect();
        assert_eq!(collected, again);
    }

    #[test]
    fn append_skips_zeros() {
        let mut store = NnzStore::new();
        store.append(0usize, 1.);
        store.append(1, 0.);
        store.append(2, 2.);
        assert_eq!(store.indices(), &[0, 2]);
    }

    #[test]
    #[should_panic(expected = "unsorted append")]
    fn append_unsorted_panics() {
        let mut store = NnzStore::new();
        store.append(2usize, 1.);
        store.append(1, 1.);
    }

    #[test]
    fn map_inplace_drops_zeros() {
        let mut store = NnzStore::new();
        store.append(0usize, 1.);
        store.append(1, 2.);
        store.append(2, 1.);
        store.map_inplace(|&x| if x == 1. { 0. } else { -x });
        assert_eq!(store.indices(), &[1]);
        assert_eq!(store.data(), &[-2.]);
    }

    #[test]
    fn check_structure() {
        let ok = NnzStore::try_from_parts(vec![1usize, 3], vec![1., 2.], |i| {
            i < 4
        });
        assert!(ok.is_ok());
        let res =
            NnzStore::try_from_parts(vec![3usize, 1], vec![1., 2.], |i| i < 4);
        assert_eq!(res.unwrap_err(), SpError::NonSortedIndices);
        let res =
            NnzStore::try_from_parts(vec![1usize, 1], vec![1., 2.], |i| i < 4);
        assert_eq!(res.unwrap_err(), SpError::DuplicateIndex("1".into()));
        let res =
            NnzStore::try_from_parts(vec![1usize, 2], vec![1., 0.], |i| i < 4);
        assert_eq!(res.unwrap_err(), SpError::ExplicitZero("2".into()));
        let res = NnzStore::try_from_parts(vec![1usize], vec![1., 2.], |i| {
            i < 4
        });
        assert_eq!(res.unwrap_err(), SpError::DataIndicesMismatch);
        let res =
            NnzStore::try_from_parts(vec![1usize, 7], vec![1., 2.], |i| i < 4);
        assert!(matches!(res, Err(SpError::OutOfBounds { .. })));
    }

    #[test]
    fn nnz_or_zip_merges_in_order() {
        let left = vec![(0usize, 1.), (3, 2.), (4, 5.)];
        let right = vec![(1usize, 7.), (3, 1.)];
        let merged: Vec<_> =
            left.into_iter().nnz_or_zip(right.into_iter()).collect();
        assert_eq!(
            merged,
            vec![
                NnzEither::Left((0, 1.)),
                NnzEither::Right((1, 7.)),
                NnzEither::Both((3, 2., 1.)),
                NnzEither::Left((4, 5.)),
            ]
        );
        assert_eq!(merged[2].position(), 3);
    }
}
