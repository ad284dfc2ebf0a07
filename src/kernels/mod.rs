//! BLAS-style kernels over views.
//!
//! - [`gemv`]: y = A·x or y = Aᵀ·x
//! - [`ger`]: rank-1 update A ← A − α·x·yᵀ
//! - [`dot`]: xᵀ·y
//! - [`outer`]: x·yᵀ as a new matrix
//! - [`gemm`]: blocked matrix product
//!
//! Each kernel accepts mixed element types and computes in their promoted type. When both
//! operands already have that type and it is `f32` or `f64`, the call is first offered to the
//! active [`Backend`](crate::backend::Backend); the portable loop runs when the backend
//! declines. The portable loops switch to rayon above the thresholds in
//! [`ParallelOptions`](crate::config::ParallelOptions).

mod gemm;

pub use gemm::gemm;

use tracing::trace;

use crate::core::{Promote, Promoted, Scalar};
use crate::error::LinalgError;
use crate::matrix::{Matrix, MatrixView, MatrixViewMut};
use crate::parallel::{self, Workload};
use crate::vector::{Orientation, Vector, VectorView};

/// Whether `gemv` applies A or its transpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    NoTrans,
    Trans,
}

/// Matrix-vector product.
///
/// `Op::NoTrans` needs `x.len() == cols` and returns a column vector of `rows` elements;
/// `Op::Trans` needs `x.len() == rows` and returns a row vector of `cols` elements.
pub fn gemv<T, U>(op: Op, a: &MatrixView<'_, T>, x: &VectorView<'_, U>) -> Result<Vector<Promoted<T, U>>, LinalgError>
where
    T: Promote<U>,
    U: Scalar,
{
    let (rows, cols) = (a.row_count(), a.column_count());
    let (expected, orientation) = match op {
        Op::NoTrans => (cols, Orientation::Column),
        Op::Trans => (rows, Orientation::Row),
    };
    if x.len() != expected {
        return Err(LinalgError::DimensionMismatch(format!(
            "gemv ({op:?}): {rows}x{cols} matrix with vector of length {}",
            x.len()
        )));
    }
    Ok(Vector::from_parts(gemv_into::<T, U, Promoted<T, U>>(op, a, x), orientation))
}

fn gemv_into<T: Scalar, U: Scalar, R: Scalar>(op: Op, a: &MatrixView<'_, T>, x: &VectorView<'_, U>) -> Vec<R> {
    let (rows, cols) = (a.row_count(), a.column_count());
    if let (Some(a_r), Some(x_r)) = (a.reinterpret::<R>(), x.reinterpret::<R>()) {
        if let Some(y) = R::accel_gemv(op, &a_r, &x_r) {
            trace!(rows, cols, ?op, "gemv handled by backend");
            return y;
        }
    }

    let par = parallel::should_parallelize(rows * cols, Workload::Quadratic);
    match op {
        Op::NoTrans => parallel::collect_indexed(rows, par, |i| {
            a.row(i)
                .iter()
                .zip(x.iter())
                .fold(R::zero(), |acc, (&aij, xj)| acc + R::from_scalar(aij) * R::from_scalar(xj))
        }),
        Op::Trans => parallel::collect_indexed(cols, par, |j| {
            (0..rows).fold(R::zero(), |acc, i| acc + R::from_scalar(a[(i, j)]) * R::from_scalar(x[i]))
        }),
    }
}

/// In-place rank-1 update A ← A − α·x·yᵀ.
///
/// Pass a negative `alpha` to add the outer product instead. The update is computed in the
/// promoted type and stored back as `T`.
pub fn ger<T, U>(
    a: &mut MatrixViewMut<'_, T>,
    x: &VectorView<'_, U>,
    y: &VectorView<'_, U>,
    alpha: U,
) -> Result<(), LinalgError>
where
    T: Promote<U>,
    U: Scalar,
{
    let (rows, cols) = (a.row_count(), a.column_count());
    if x.len() != rows || y.len() != cols {
        return Err(LinalgError::DimensionMismatch(format!(
            "ger: {rows}x{cols} matrix with x of length {} and y of length {}",
            x.len(),
            y.len()
        )));
    }

    if let (Some(x_t), Some(y_t)) = (x.reinterpret::<T>(), y.reinterpret::<T>()) {
        if T::accel_ger(a, &x_t, &y_t, T::from_scalar(alpha)) {
            trace!(rows, cols, "ger handled by backend");
            return Ok(());
        }
    }
    ger_portable::<T, U, Promoted<T, U>>(a, x, y, alpha);
    Ok(())
}

fn ger_portable<T: Scalar, U: Scalar, R: Scalar>(
    a: &mut MatrixViewMut<'_, T>,
    x: &VectorView<'_, U>,
    y: &VectorView<'_, U>,
    alpha: U,
) {
    let alpha = R::from_scalar(alpha);
    let par = parallel::should_parallelize(a.row_count() * a.column_count(), Workload::Quadratic);
    a.for_each_row_mut(par, |i, row| {
        let scaled = alpha * R::from_scalar(x[i]);
        for (aij, yj) in row.iter_mut().zip(y.iter()) {
            *aij = T::from_scalar(R::from_scalar(*aij) - scaled * R::from_scalar(yj));
        }
    });
}

/// Dot product of two views of equal length.
pub fn dot<T, U>(x: &VectorView<'_, T>, y: &VectorView<'_, U>) -> Result<Promoted<T, U>, LinalgError>
where
    T: Promote<U>,
    U: Scalar,
{
    if x.len() != y.len() {
        return Err(LinalgError::DimensionMismatch(format!(
            "dot: lengths {} and {} differ",
            x.len(),
            y.len()
        )));
    }
    Ok(dot_unchecked::<T, U, Promoted<T, U>>(x, y))
}

fn dot_unchecked<T: Scalar, U: Scalar, R: Scalar>(x: &VectorView<'_, T>, y: &VectorView<'_, U>) -> R {
    if let (Some(x_r), Some(y_r)) = (x.reinterpret::<R>(), y.reinterpret::<R>()) {
        if let Some(d) = R::accel_dot(&x_r, &y_r) {
            trace!(len = x.len(), "dot handled by backend");
            return d;
        }
    }
    let n = x.len();
    let par = parallel::should_parallelize(n, Workload::Linear);
    parallel::sum_indexed(n, par, |i| R::from_scalar(x[i]) * R::from_scalar(y[i]))
}

/// Outer product x·yᵀ as a new `len(x) × len(y)` matrix.
pub fn outer<T, U>(x: &VectorView<'_, T>, y: &VectorView<'_, U>) -> Matrix<Promoted<T, U>>
where
    T: Promote<U>,
    U: Scalar,
{
    outer_into::<T, U, Promoted<T, U>>(x, y)
}

fn outer_into<T: Scalar, U: Scalar, R: Scalar>(x: &VectorView<'_, T>, y: &VectorView<'_, U>) -> Matrix<R> {
    let (m, n) = (x.len(), y.len());
    let mut data = vec![R::zero(); m * n];
    let par = parallel::should_parallelize(m * n, Workload::Quadratic);
    parallel::for_each_chunk_mut(&mut data, n, par, |i, row| {
        let xi = R::from_scalar(x[i]);
        for (out, yj) in row.iter_mut().zip(y.iter()) {
            *out = xi * R::from_scalar(yj);
        }
    });
    Matrix::from_parts(m, n, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> Matrix<f64> {
        Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap()
    }

    #[test]
    fn gemv_no_trans_and_trans() {
        let a = sample();
        let x = Vector::from_slice(&[1, 0, -1], Orientation::Column).unwrap();
        let y = gemv(Op::NoTrans, &a.view_all(), &x.view()).unwrap();
        assert_eq!(y.orientation(), Orientation::Column);
        assert_eq!(y.data(), &[-2.0, -2.0]);

        let z = Vector::from_slice(&[1.0, 1.0], Orientation::Row).unwrap();
        let w = gemv(Op::Trans, &a.view_all(), &z.view()).unwrap();
        assert_eq!(w.orientation(), Orientation::Row);
        assert_eq!(w.data(), &[5.0, 7.0, 9.0]);

        assert!(matches!(gemv(Op::Trans, &a.view_all(), &x.view()), Err(LinalgError::DimensionMismatch(_))));
    }

    #[test]
    fn gemv_on_sub_block() {
        let a = Matrix::from_vec(3, 3, (1..=9).map(f64::from).collect()).unwrap();
        let block = a.view(1, 1, 2, 2).unwrap();
        let x = Vector::from_slice(&[1.0, 1.0], Orientation::Column).unwrap();
        let y = gemv(Op::NoTrans, &block, &x.view()).unwrap();
        assert_eq!(y.data(), &[11.0, 17.0]);
    }

    #[test]
    fn ger_subtracts_scaled_outer_product() {
        let mut a = Matrix::<f64>::new(2, 2).unwrap();
        let x = Vector::from_slice(&[1.0, 2.0], Orientation::Column).unwrap();
        let y = Vector::from_slice(&[3.0, 4.0], Orientation::Row).unwrap();
        ger(&mut a.view_all_mut(), &x.view(), &y.view(), 0.5).unwrap();
        assert_eq!(a.data(), &[-1.5, -2.0, -3.0, -4.0]);
        ger(&mut a.view_all_mut(), &x.view(), &y.view(), -0.5).unwrap();
        assert!(a.data().iter().all(|&v| v == 0.0));

        let short = Vector::from_slice(&[1.0], Orientation::Row).unwrap();
        assert!(ger(&mut a.view_all_mut(), &x.view(), &short.view(), 1.0).is_err());
    }

    #[test]
    fn dot_promotes_and_checks_length() {
        let x = Vector::from_slice(&[1, 2, 3], Orientation::Row).unwrap();
        let y = Vector::from_slice(&[0.5, 0.5, 0.5], Orientation::Column).unwrap();
        let d: f64 = dot(&x.view(), &y.view()).unwrap();
        assert_abs_diff_eq!(d, 3.0, epsilon = 1e-12);
        let z = Vector::from_slice(&[1.0], Orientation::Row).unwrap();
        assert!(matches!(dot(&x.view(), &z.view()), Err(LinalgError::DimensionMismatch(_))));
    }

    #[test]
    fn strided_dot() {
        let v = Vector::from_slice(&[1.0, 9.0, 2.0, 9.0, 3.0], Orientation::Row).unwrap();
        let odd = v.view_strided(0, 3, 2).unwrap();
        assert_eq!(dot(&odd, &odd).unwrap(), 14.0);
    }

    #[test]
    fn outer_shape_and_values() {
        let x = Vector::from_slice(&[1, 2], Orientation::Column).unwrap();
        let y = Vector::from_slice(&[3, 4, 5], Orientation::Row).unwrap();
        let m = outer(&x.view(), &y.view());
        assert_eq!((m.row_count(), m.column_count()), (2, 3));
        assert_eq!(m.data(), &[3, 4, 5, 6, 8, 10]);
    }
}
