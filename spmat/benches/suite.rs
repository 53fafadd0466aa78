#[macro_use]
extern crate bencher;

use bencher::Bencher;
use ndarray::Array2;
use spmat::{add_to, MatOperand, MatTarget, SparseMat, SparseVec};

fn banded(order: usize, offset: usize) -> SparseMat<f64> {
    let mut m = SparseMat::zeros((order, order));
    for i in 0..order {
        m.set(i, i, 2.).unwrap();
        if i + offset < order {
            m.set(i, i + offset, -1.).unwrap();
        }
    }
    m
}

fn sparse_vec_neg(bench: &mut Bencher) {
    let mut vector = SparseVec::zeros(10000);
    for i in 10..9000 {
        vector.set(i, -1.3).unwrap();
    }
    bench.iter(|| -&vector);
}

fn sparse_mat_add(bench: &mut Bencher) {
    let a = banded(10000, 1);
    let b = banded(10000, 3);
    bench.iter(|| &a + &b);
}

fn sparse_mat_add_aliased(bench: &mut Bencher) {
    let b = banded(10000, 3);
    let mut a = banded(10000, 1);
    bench.iter(|| {
        let rhs = MatOperand::from(&b);
        add_to(MatTarget::from(&mut a), MatOperand::Target, rhs).unwrap();
    });
}

fn sparse_mat_add_dense(bench: &mut Bencher) {
    let a = banded(300, 1);
    let b = Array2::<f64>::ones((300, 300));
    bench.iter(|| &a + &b);
}

fn sparse_mat_eye(bench: &mut Bencher) {
    bench.iter(|| SparseMat::<f64>::eye(100_000).unwrap());
}

fn sparse_mat_fill_in_order(bench: &mut Bencher) {
    bench.iter(|| banded(10000, 2));
}

benchmark_group!(
    benches,
    sparse_vec_neg,
    sparse_mat_add,
    sparse_mat_add_aliased,
    sparse_mat_add_dense,
    sparse_mat_eye,
    sparse_mat_fill_in_order
);
benchmark_main!(benches);
