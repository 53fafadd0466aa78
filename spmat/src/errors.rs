//! Error type for spmat

use thiserror::Error;

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum SpError {
    /// An argument outside of its legal domain, eg an identity of order 0
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A position outside of the declared dimensions of a container
    #[error("index {index} is out of bounds for shape {bound}")]
    OutOfBounds { index: String, bound: String },

    /// Operands, or operands and target, of incompatible shapes
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: String, found: String },

    #[error("indices are not sorted")]
    NonSortedIndices,

    #[error("index {0} appears more than once")]
    DuplicateIndex(String),

    #[error("explicit zero stored at index {0}")]
    ExplicitZero(String),

    #[error("indices and data have different lengths")]
    DataIndicesMismatch,
}

impl SpError {
    pub(crate) fn out_of_bounds<P, S>(index: P, bound: S) -> Self
    where
        P: std::fmt::Debug,
        S: std::fmt::Debug,
    {
        Self::OutOfBounds {
            index: format!("{index:?}"),
            bound: format!("{bound:?}"),
        }
    }

    pub(crate) fn dim_mismatch<S1, S2>(expected: S1, found: S2) -> Self
    where
        S1: std::fmt::Debug,
        S2: std::fmt::Debug,
    {
        Self::DimensionMismatch {
            expected: format!("{expected:?}"),
            found: format!("{found:?}"),
        }
    }
}
