//! Serialization of sparse containers. Deserialized data is untrusted and
//! goes through the same structure checks as `try_from_parts`.

use std::convert::TryFrom;

use num_traits::Zero;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use super::mat::SparseMat;
use super::vec::SparseVec;
use crate::errors::SpError;

#[derive(Deserialize)]
struct SparseVecShadow<N> {
    dim: usize,
    indices: Vec<usize>,
    data: Vec<N>,
}

impl<N: Zero> TryFrom<SparseVecShadow<N>> for SparseVec<N> {
    type Error = SpError;

    fn try_from(val: SparseVecShadow<N>) -> Result<Self, Self::Error> {
        let SparseVecShadow { dim, indices, data } = val;
        Self::try_from_parts(dim, indices, data)
    }
}

#[derive(Deserialize)]
struct SparseMatShadow<N> {
    nrows: usize,
    ncols: usize,
    indices: Vec<(usize, usize)>,
    data: Vec<N>,
}

impl<N: Zero> TryFrom<SparseMatShadow<N>> for SparseMat<N> {
    type Error = SpError;

    fn try_from(val: SparseMatShadow<N>) -> Result<Self, Self::Error> {
        let SparseMatShadow {
            nrows,
            ncols,
            indices,
            data,
        } = val;
        Self::try_from_parts((nrows, ncols), indices, data)
    }
}

impl<N: Serialize> Serialize for SparseVec<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("SparseVec", 3)?;
        state.serialize_field("dim", &self.dim())?;
        state.serialize_field("indices", self.store().indices())?;
        state.serialize_field("data", self.store().data())?;
        state.end()
    }
}

impl<'de, N> Deserialize<'de> for SparseVec<N>
where
    N: Deserialize<'de> + Zero,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let shadow = SparseVecShadow::<N>::deserialize(deserializer)?;
        Self::try_from(shadow).map_err(de::Error::custom)
    }
}

impl<N: Serialize> Serialize for SparseMat<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("SparseMat", 4)?;
        state.serialize_field("nrows", &self.rows())?;
        state.serialize_field("ncols", &self.cols())?;
        state.serialize_field("indices", self.store().indices())?;
        state.serialize_field("data", self.store().data())?;
        state.end()
    }
}

impl<'de, N> Deserialize<'de> for SparseMat<N>
where
    N: Deserialize<'de> + Zero,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let shadow = SparseMatShadow::<N>::deserialize(deserializer)?;
        Self::try_from(shadow).map_err(de::Error::custom)
    }
}
