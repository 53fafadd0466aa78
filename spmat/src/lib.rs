/*!
# spmat

spmat stores sparse matrices and sparse vectors, keeping only their non-zero
entries, and implements their additive arithmetic against both sparse and
dense operands.

It features a sparse matrix type, [`SparseMat`], and a sparse vector type,
[`SparseVec`], both backed by a sorted [`NnzStore`](sparse::NnzStore) of
non-zero entries. Dense containers are the `ndarray` arrays, consumed
through the traits of the [`dense`] module.

## Examples

Matrix construction

```rust
use spmat::SparseMat;
let eye = SparseMat::<f64>::eye(3).unwrap();
assert_eq!(eye.nnz(), 3);
let a = SparseMat::from_rows(&[[0., 1., 0.], [2., 0., 3.]]).unwrap();
assert_eq!(a.get(1, 2), Ok(3.));
```

Element access keeps the storage compact

```rust
use spmat::SparseMat;
let mut a = SparseMat::zeros((1_000_000, 1_000_000));
a.set(0, 0, 4.).unwrap();
assert_eq!(a.nnz(), 1);
a.set(0, 0, 0.).unwrap();
assert_eq!(a.nnz(), 0);
```

Addition, subtraction with sparse or dense operands

```rust
use spmat::SparseMat;
use ndarray::arr2;
let a = SparseMat::from_rows(&[[0., 1., 1.]]).unwrap();
let b = arr2(&[[1., 0., 1.]]);
let c = &a + &b;
assert_eq!(c, arr2(&[[1., 1., 2.]]));
assert_eq!(&c - &a, b);
```

Writing into a target, which may be one of the operands

```rust
use spmat::{add_to, MatOperand, MatTarget, SparseMat};
use ndarray::arr2;
let mut a = SparseMat::from_rows(&[[0., 1., 1.]]).unwrap();
add_to(MatTarget::from(&mut a), MatOperand::Target, MatOperand::Target)
    .unwrap();
assert_eq!(a, arr2(&[[0., 2., 2.]]));
```
*/

pub mod dense;
pub mod errors;
pub mod indexing;
pub mod sparse;

pub use crate::errors::SpError;
pub use crate::indexing::SpPosition;
pub use crate::sparse::compare::{mat_eq, vec_eq};
pub use crate::sparse::{
    add_to, binop_to, sub_to, Container, MatOperand, MatRef, MatTarget,
    Matrix, SparseMat, SparseStorage, SparseVec, VecOperand, VecRef,
    VecTarget, Vector,
};

pub type Ix1 = ndarray::Ix1;
pub type Ix2 = ndarray::Ix2;

pub type SpRes<T> = Result<T, SpError>;

#[cfg(test)]
mod test_data;
