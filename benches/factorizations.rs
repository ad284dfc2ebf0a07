use criterion::{black_box, Criterion, criterion_group, criterion_main};
use densela::{cholesky, gemv, plu, qr_decomposition, Matrix, Op, Orientation, QrMode, Vector};

fn bench_kernels(c: &mut Criterion) {
    let n = 200;
    let a = Matrix::from_fn(n, n, |i, j| ((i * n + j) as f64).sin()).unwrap();
    let b = Matrix::from_fn(n, n, |i, j| ((i + 2 * j) as f64).cos()).unwrap();
    let x = Vector::from_vec((0..n).map(|i| (i as f64).cos()).collect(), Orientation::Column).unwrap();

    c.bench_function("gemv 200", |ben| {
        ben.iter(|| gemv(Op::NoTrans, black_box(&a.view_all()), black_box(&x.view())).unwrap())
    });

    c.bench_function("gemm 200", |ben| {
        ben.iter(|| (black_box(&a) * black_box(&b)).unwrap())
    });
}

fn bench_factorizations(c: &mut Criterion) {
    let n = 200;
    let a = Matrix::from_fn(n, n, |i, j| ((i * n + j) as f64).sin() + if i == j { n as f64 } else { 0.0 }).unwrap();
    let mut spd = (&a * &a.transposed()).unwrap();
    for i in 0..n {
        spd[(i, i)] += n as f64;
    }

    c.bench_function("plu 200", |ben| {
        ben.iter(|| plu(black_box(&a)).unwrap())
    });

    c.bench_function("cholesky 200", |ben| {
        ben.iter(|| cholesky(black_box(&spd)).unwrap())
    });

    c.bench_function("qr 200", |ben| {
        ben.iter(|| qr_decomposition(black_box(&a), QrMode::empty()).unwrap())
    });
}

criterion_group!(benches, bench_kernels, bench_factorizations);
criterion_main!(benches);
