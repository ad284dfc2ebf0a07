//! Tests for the dense kernels: matrix-vector product, rank-1 update, dot product and norm.
//!
//! These tests check `gemv`, `ger`, `dot` and `outer` against manual computations on random
//! and fixed data, including sub-block views and mixed element types.

use approx::assert_abs_diff_eq;
use densela::{dot, gemv, ger, outer, Matrix, Op, Orientation, Vector};
use rand::Rng;

/// Test matrix-vector multiplication for a small random dense matrix.
///
/// Builds a random 5x5 matrix and vector, computes `A·x` with `gemv` and checks each entry
/// against the row-by-row sum.
#[test]
fn matvec_random_small() {
    let n = 5;
    let mut rng = rand::thread_rng();
    let vals: Vec<f64> = (0..n * n).map(|_| rng.r#gen()).collect();
    let a = Matrix::from_vec(n, n, vals.clone()).unwrap();
    let x = Vector::from_vec((0..n).map(|_| rng.r#gen::<f64>()).collect(), Orientation::Column).unwrap();
    let y = gemv(Op::NoTrans, &a.view_all(), &x.view()).unwrap();

    for i in 0..n {
        let expected = (0..n).map(|j| vals[i * n + j] * x[j]).sum::<f64>();
        assert_abs_diff_eq!(y[i], expected, epsilon = 1e-12);
    }
}

/// Test the transposed product on a large enough matrix to take the parallel path.
///
/// With the default quadratic threshold of 250 000 elements, a 600x500 matrix runs the
/// column loop on the rayon pool.
#[test]
fn transposed_matvec_large() {
    let (m, n) = (600, 500);
    let a = Matrix::from_fn(m, n, |i, j| ((i + 2 * j) % 7) as f64 - 3.0).unwrap();
    let x = Vector::from_vec((0..m).map(|i| (i % 5) as f64).collect(), Orientation::Row).unwrap();
    let y = gemv(Op::Trans, &a.view_all(), &x.view()).unwrap();
    assert_eq!(y.size(), n);
    for j in (0..n).step_by(37) {
        let expected: f64 = (0..m).map(|i| a[(i, j)] * x[i]).sum();
        assert_abs_diff_eq!(y[j], expected, epsilon = 1e-9);
    }
}

/// Test the rank-1 update on a window of a larger matrix.
///
/// Only the window changes; entries outside it keep their values.
#[test]
fn ger_on_window() {
    let mut a = Matrix::from_fn(4, 4, |_, _| 1.0).unwrap();
    let x = Vector::from_slice(&[1.0, 2.0], Orientation::Column).unwrap();
    let y = Vector::from_slice(&[1.0, -1.0], Orientation::Row).unwrap();
    {
        let mut window = a.view_mut(1, 1, 2, 2).unwrap();
        ger(&mut window, &x.view(), &y.view(), 1.0).unwrap();
    }
    assert_eq!(a.row(0), &[1.0, 1.0, 1.0, 1.0]);
    assert_eq!(a.row(1), &[1.0, 0.0, 2.0, 1.0]);
    assert_eq!(a.row(2), &[1.0, -1.0, 3.0, 1.0]);
    assert_eq!(a.row(3), &[1.0, 1.0, 1.0, 1.0]);
}

/// Test dot product and Euclidean norm for small vectors.
#[test]
fn dot_and_norm() {
    let x = Vector::from_slice(&[1.0, 2.0, 3.0], Orientation::Row).unwrap();
    let y = Vector::from_slice(&[4.0, -5.0, 6.0], Orientation::Column).unwrap();
    let d = dot(&x.view(), &y.view()).unwrap();
    assert_abs_diff_eq!(d, 1.0 * 4.0 + 2.0 * (-5.0) + 3.0 * 6.0, epsilon = 1e-12);
    let expected_norm = (1.0f64.powi(2) + 2.0f64.powi(2) + 3.0f64.powi(2)).sqrt();
    assert_abs_diff_eq!(x.norm(), expected_norm, epsilon = 1e-12);

    let ints = Vector::from_slice(&[3, 4], Orientation::Column).unwrap();
    assert_abs_diff_eq!(ints.norm(), 5.0, epsilon = 1e-12);
}

/// Test a dot product long enough for the parallel reduction.
#[test]
fn long_dot_product() {
    let n = 600_000;
    let x = Vector::from_vec(vec![1_i64; n], Orientation::Row).unwrap();
    let y = Vector::from_vec(vec![2_i64; n], Orientation::Column).unwrap();
    assert_eq!(dot(&x.view(), &y.view()).unwrap(), 2 * n as i64);
}

/// Test the outer product with mixed element types.
#[test]
fn outer_mixed_types() {
    let x = Vector::from_slice(&[1_u32, 2], Orientation::Column).unwrap();
    let y = Vector::from_slice(&[0.5_f32, 1.5], Orientation::Row).unwrap();
    let m: Matrix<f32> = outer(&x.view(), &y.view());
    assert_eq!(m.data(), &[0.5, 1.5, 1.0, 3.0]);
}
