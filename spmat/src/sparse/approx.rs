//! Approximate equality of sparse containers, for floating point scalars.
//!
//! Absent entries are compared as zeros, so that a tiny stored value is
//! approximately equal to a missing one.

use approx::{AbsDiffEq, RelativeEq};
use num_traits::Zero;

use super::mat::SparseMat;
use super::store::NnzEither::{Both, Left, Right};
use super::store::{NnzStore, SparseIterTools};
use super::vec::SparseVec;
use crate::indexing::SpPosition;

fn entries_approx_eq<K, N, F>(
    lhs: &NnzStore<K, N>,
    rhs: &NnzStore<K, N>,
    approx_eq: F,
) -> bool
where
    K: SpPosition,
    N: Zero + Copy,
    F: Fn(&N, &N) -> bool,
{
    lhs.iter().nnz_or_zip(rhs.iter()).all(|elem| match elem {
        Left((_, l)) => approx_eq(&l, &N::zero()),
        Right((_, r)) => approx_eq(&N::zero(), &r),
        Both((_, l, r)) => approx_eq(&l, &r),
    })
}

impl<N> AbsDiffEq for SparseVec<N>
where
    N: AbsDiffEq + Zero + Copy,
    N::Epsilon: Clone,
{
    type Epsilon = N::Epsilon;

    fn default_epsilon() -> N::Epsilon {
        N::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: N::Epsilon) -> bool {
        self.dim() == other.dim()
            && entries_approx_eq(self.store(), other.store(), |l, r| {
                l.abs_diff_eq(r, epsilon.clone())
            })
    }
}

impl<N> RelativeEq for SparseVec<N>
where
    N: RelativeEq + Zero + Copy,
    N::Epsilon: Clone,
{
    fn default_max_relative() -> N::Epsilon {
        N::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: N::Epsilon,
        max_relative: N::Epsilon,
    ) -> bool {
        self.dim() == other.dim()
            && entries_approx_eq(self.store(), other.store(), |l, r| {
                l.relative_eq(r, epsilon.clone(), max_relative.clone())
            })
    }
}

impl<N> AbsDiffEq for SparseMat<N>
where
    N: AbsDiffEq + Zero + Copy,
    N::Epsilon: Clone,
{
    type Epsilon = N::Epsilon;

    fn default_epsilon() -> N::Epsilon {
        N::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: N::Epsilon) -> bool {
        self.shape() == other.shape()
            && entries_approx_eq(self.store(), other.store(), |l, r| {
                l.abs_diff_eq(r, epsilon.clone())
            })
    }
}

impl<N> RelativeEq for SparseMat<N>
where
    N: RelativeEq + Zero + Copy,
    N::Epsilon: Clone,
{
    fn default_max_relative() -> N::Epsilon {
        N::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: N::Epsilon,
        max_relative: N::Epsilon,
    ) -> bool {
        self.shape() == other.shape()
            && entries_approx_eq(self.store(), other.store(), |l, r| {
                l.relative_eq(r, epsilon.clone(), max_relative.clone())
            })
    }
}
