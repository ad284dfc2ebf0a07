//! Tests for the vector and matrix operators: shape checks, type promotion and scalar
//! arithmetic on either side.

use densela::{identity_matrix, ones, LinalgError, Matrix, Orientation, Vector};

/// Test that malformed sums, products and dot products report a dimension mismatch.
#[test]
fn mismatched_operands() {
    let a = Matrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
    let b = Matrix::from_rows(&[[1, 2], [3, 4]]).unwrap();
    assert!(matches!(&a + &b, Err(LinalgError::DimensionMismatch(_))));
    assert!(matches!(&a - &b, Err(LinalgError::DimensionMismatch(_))));
    assert!(matches!(&a * &b, Err(LinalgError::DimensionMismatch(_))));

    let row = Vector::from_slice(&[1, 2, 3], Orientation::Row).unwrap();
    let col = Vector::from_slice(&[1, 2], Orientation::Column).unwrap();
    assert!(matches!(&row * &col, Err(LinalgError::DimensionMismatch(_))));
    assert!(matches!(&row + &row.transposed(), Err(LinalgError::DimensionMismatch(_))));
    assert!(matches!(&a * &row, Err(LinalgError::DimensionMismatch(_))));
}

/// Test that an integer matrix times a float matrix produces a float matrix.
#[test]
fn mixed_type_matrix_product() {
    let a = Matrix::from_rows(&[[1_i32, 2], [3, 4]]).unwrap();
    let b = Matrix::from_rows(&[[0.5_f64, 0.0], [0.0, 0.25]]).unwrap();
    let c: Matrix<f64> = (&a * &b).unwrap();
    assert_eq!(c.data(), &[0.5, 0.5, 1.5, 1.0]);
}

/// Test a product large enough to use the blocked, parallel kernel.
#[test]
fn blocked_matrix_product() {
    let n = 130;
    let a = Matrix::from_fn(n, n, |i, j| ((i * 3 + j) % 11) as i64 - 5).unwrap();
    let eye = identity_matrix::<i64>(n).unwrap();
    assert_eq!((&a * &eye).unwrap(), a);

    let all_ones = ones::<i64>(n, 1).unwrap();
    let sums = (&a * &all_ones).unwrap();
    for i in 0..n {
        assert_eq!(sums[(i, 0)], a.row(i).iter().sum::<i64>());
    }
}

/// Test matrix-vector and vector-matrix products and their orientation rules.
#[test]
fn vector_products() {
    let a = Matrix::from_rows(&[[1, 2], [3, 4], [5, 6]]).unwrap();
    let x = Vector::from_slice(&[1, -1], Orientation::Column).unwrap();
    let ax = (&a * &x).unwrap();
    assert_eq!(ax.data(), &[-1, -1, -1]);
    assert_eq!(ax.orientation(), Orientation::Column);

    let y = Vector::from_slice(&[1.0_f32, 0.0, 2.0], Orientation::Row).unwrap();
    let ya = (&y * &a).unwrap();
    assert_eq!(ya.data(), &[11.0_f32, 14.0]);
    assert_eq!(ya.orientation(), Orientation::Row);
    assert!(matches!(&y.transposed() * &a, Err(LinalgError::DimensionMismatch(_))));

    let d = (&y * &y.transposed()).unwrap();
    assert_eq!(d, 5.0_f32);
}

/// Test scalar arithmetic on both sides, including promotion of integer division.
#[test]
fn scalar_arithmetic() {
    let a = Matrix::from_rows(&[[2_i32, 4], [6, 8]]).unwrap();
    assert_eq!((&a + 1_i32).data(), &[3, 5, 7, 9]);
    assert_eq!((10_i32 - &a).data(), &[8, 6, 4, 2]);
    assert_eq!((&a * 0.5_f64).data(), &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!((&a / 4_i32).data(), &[0.5, 1.0, 1.5, 2.0]);
    assert_eq!((24_i32 / &a).data(), &[12.0, 6.0, 4.0, 3.0]);

    let mut b = a.clone();
    b *= 3_i32;
    b -= 1_i32;
    assert_eq!(b.data(), &[5, 11, 17, 23]);
    b /= 2_i32;
    assert_eq!(b.data(), &[2, 5, 8, 11]);

    let v = Vector::from_slice(&[1.0_f64, 2.0], Orientation::Row).unwrap();
    assert_eq!((2_i32 * &v).data(), &[2.0, 4.0]);
    assert_eq!((&v / 2_u32).data(), &[0.5, 1.0]);
    assert_eq!((-&v).data(), &[-1.0, -2.0]);
}

/// Test the fallible compound assignments.
#[test]
fn try_assign_operations() {
    let mut a = Matrix::from_rows(&[[1_i64, 2], [3, 4]]).unwrap();
    a.try_add_assign(&ones::<i64>(2, 2).unwrap()).unwrap();
    assert_eq!(a.data(), &[2, 3, 4, 5]);
    a.try_mul_assign(&identity_matrix::<i64>(2).unwrap()).unwrap();
    assert_eq!(a.data(), &[2, 3, 4, 5]);
    assert!(a.try_sub_assign(&ones::<i64>(3, 2).unwrap()).is_err());
    assert_eq!(a.data(), &[2, 3, 4, 5]);

    let mut v = Vector::from_slice(&[1_u32, 2, 3], Orientation::Column).unwrap();
    v.try_add_assign(&Vector::from_slice(&[1_u32, 1, 1], Orientation::Column).unwrap()).unwrap();
    assert_eq!(v.data(), &[2, 3, 4]);
    let row = Vector::from_slice(&[1_u32, 1, 1], Orientation::Row).unwrap();
    assert!(matches!(v.try_sub_assign(&row), Err(LinalgError::DimensionMismatch(_))));
}

/// Test that transposing twice gives back the original, in place and by copy.
#[test]
fn transpose_involution() {
    let a = Matrix::from_fn(7, 3, |i, j| (i * 10 + j) as u64).unwrap();
    assert_eq!(a.transposed().transposed(), a);

    let mut sq = Matrix::from_fn(100, 100, |i, j| (i * 100 + j) as f32).unwrap();
    let original = sq.clone();
    sq.transpose().unwrap();
    assert_eq!(sq, original.transposed());
    sq.transpose().unwrap();
    assert_eq!(sq, original);

    let mut wide = Matrix::<i32>::new(2, 3).unwrap();
    assert!(matches!(wide.transpose(), Err(LinalgError::InvalidArgument(_))));
}
