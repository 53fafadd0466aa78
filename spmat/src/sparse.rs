use crate::indexing::SpPosition;

pub mod binop;
pub mod compare;
pub mod mat;
pub mod store;
pub mod vec;

#[cfg(feature = "approx")]
mod approx;
#[cfg(feature = "serde")]
mod serde_traits;

pub use self::binop::{
    add_to, binop_to, lin_comb_to, sub_to, Container, MatOperand, MatRef,
    MatTarget, Matrix, Operand, Target, VecOperand, VecRef, VecTarget, Vector,
};
pub use self::mat::SparseMat;
pub use self::store::NnzStore;
pub use self::vec::SparseVec;

mod sealed {
    use super::store::NnzStore;
    use crate::indexing::SpPosition;

    /// Write access to the store of a sparse container. Only the
    /// containers of this crate can grant it, which guarantees a replaced
    /// store always comes from an operation respecting the container's
    /// bounds.
    pub trait StoreAccess {
        type Pos: SpPosition;
        type Scalar;

        fn store_mut(&mut self) -> &mut NnzStore<Self::Pos, Self::Scalar>;
    }
}

/// A trait for common members of sparse containers
///
/// This is implemented by [`SparseVec`] and [`SparseMat`], and is what
/// allows the arithmetic of [`binop`] to be written once for both.
pub trait SparseStorage: sealed::StoreAccess {
    /// The dimensions of this container
    fn shape(&self) -> <Self::Pos as SpPosition>::Shape;

    /// The non-zero entries of this container
    fn store(&self) -> &NnzStore<Self::Pos, Self::Scalar>;

    /// The number of non-zeros of this container
    fn nnz(&self) -> usize {
        self.store().nnz()
    }
}
