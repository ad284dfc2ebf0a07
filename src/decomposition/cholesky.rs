//! Blocked Cholesky (Crout) decomposition `A = L·Lᵀ`.

use tracing::{debug, instrument};

use crate::backend::{ActiveBackend, Backend};
use crate::config::{parallel_options, ParallelOptions};
use crate::core::{Real, Scalar};
use crate::error::LinalgError;
use crate::matrix::Matrix;
use crate::parallel;

/// Lower Cholesky factor in the floating type of `T` (`f64` for integer matrices).
pub fn cholesky<T: Scalar>(a: &Matrix<T>) -> Result<Matrix<T::Float>, LinalgError> {
    cholesky_as::<T::Float>(a)
}

/// Lower Cholesky factor computed in `R`.
///
/// The input must be symmetric within [`EPSILON`](crate::utils::EPSILON)
/// (`NotSymmetric` otherwise) and positive definite (`NotPositiveDefinite`).
#[instrument(level = "debug", skip_all, fields(n = a.row_count()))]
pub fn cholesky_as<R: Real>(a: &Matrix<impl Scalar>) -> Result<Matrix<R>, LinalgError> {
    let work = a.cast::<R>();
    if !work.is_symmetric() {
        return Err(LinalgError::NotSymmetric);
    }
    if let Some(result) = ActiveBackend::cholesky(&work) {
        debug!(backend = ActiveBackend::NAME, "Cholesky delegated to backend");
        return result;
    }
    factorize(&work, &parallel_options())
}

fn factorize<R: Real>(a: &Matrix<R>, opts: &ParallelOptions) -> Result<Matrix<R>, LinalgError> {
    let n = a.row_count();
    let bs = opts.block_size;
    let par = parallel::exceeds(n, opts.cholesky_threshold);
    let mut l = vec![R::zero(); n * n];
    debug!(n, block = bs, "blocked Cholesky");

    for jj in (0..n).step_by(bs) {
        let j_end = (jj + bs).min(n);

        // Diagonal block, column by column.
        for j in jj..j_end {
            let (row_j, below) = l[j * n..].split_at_mut(n);
            let sum: R = row_j[..j].iter().map(|&x| x * x).fold(R::zero(), |s, x| s + x);
            let diag = a[(j, j)] - sum;
            if diag.is_nan() || diag <= R::zero() {
                debug!(column = j, "non-positive diagonal");
                return Err(LinalgError::NotPositiveDefinite);
            }
            let ljj = diag.sqrt();
            row_j[j] = ljj;

            for (r, row_i) in below.chunks_mut(n).take(j_end - j - 1).enumerate() {
                let i = j + 1 + r;
                let dot = row_i[..j].iter().zip(&row_j[..j]).fold(R::zero(), |s, (&x, &y)| s + x * y);
                row_i[j] = (a[(i, j)] - dot) / ljj;
            }
        }

        if j_end >= n {
            continue;
        }

        // Rows below the block, in blocks of `bs` rows.
        let (top, trailing) = l.split_at_mut(j_end * n);
        let top: &[R] = top;
        parallel::for_each_chunk_mut(trailing, bs * n, par, |blk, rows| {
            let i0 = j_end + blk * bs;
            for (r, row_i) in rows.chunks_mut(n).enumerate() {
                let i = i0 + r;
                for j in jj..j_end {
                    let row_j = &top[j * n..j * n + j];
                    let dot = row_i[..j].iter().zip(row_j).fold(R::zero(), |s, (&x, &y)| s + x * y);
                    row_i[j] = (a[(i, j)] - dot) / top[j * n + j];
                }
            }
        });
    }

    Ok(Matrix::from_parts(n, n, l))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::loosely_equal;
    use approx::assert_abs_diff_eq;
    use rand::Rng;

    #[test]
    fn known_factor() {
        let a = Matrix::from_rows(&[[4, 12, -16], [12, 37, -43], [-16, -43, 98]]).unwrap();
        let l = cholesky(&a).unwrap();
        let expected = [[2.0, 0.0, 0.0], [6.0, 1.0, 0.0], [-8.0, 5.0, 3.0]];
        for (i, row) in expected.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                assert_abs_diff_eq!(l[(i, j)], v, epsilon = 1e-12);
            }
        }
    }

    /// Order 130 covers the diagonal blocks and the trailing-row update.
    #[test]
    fn random_spd_reconstructs() {
        let a = random_spd(130);
        let l = cholesky(&a).unwrap();
        assert!(l.is_lower_triangular());
        let llt = (&l * &l.transposed()).unwrap();
        assert!(loosely_equal(&a, &llt, 1e-6));
    }

    #[test]
    fn rejects_asymmetric_and_indefinite() {
        let asym = Matrix::from_rows(&[[1.0, 2.0], [0.0, 1.0]]).unwrap();
        assert_eq!(cholesky(&asym).unwrap_err(), LinalgError::NotSymmetric);

        let indefinite = Matrix::from_rows(&[[1.0, 2.0], [2.0, 1.0]]).unwrap();
        assert_eq!(cholesky(&indefinite).unwrap_err(), LinalgError::NotPositiveDefinite);

        let wide = Matrix::<f32>::new(2, 3).unwrap();
        assert_eq!(cholesky(&wide).unwrap_err(), LinalgError::NotSymmetric);
    }

    #[test]
    fn explicit_f32_factor() {
        let a = Matrix::from_rows(&[[9_u32, 3], [3, 5]]).unwrap();
        let l = cholesky_as::<f32>(&a).unwrap();
        assert_abs_diff_eq!(l[(0, 0)], 3.0_f32, epsilon = 1e-6);
        assert_abs_diff_eq!(l[(1, 0)], 1.0_f32, epsilon = 1e-6);
        assert_abs_diff_eq!(l[(1, 1)], 2.0_f32, epsilon = 1e-6);
    }

    #[test]
    fn nan_entry_is_not_positive_definite() {
        let a = Matrix::from_rows(&[[f64::NAN, 0.0], [0.0, 1.0]]).unwrap();
        assert_eq!(factorize(&a, &ParallelOptions::default()).unwrap_err(), LinalgError::NotPositiveDefinite);
    }

    fn random_spd(n: usize) -> Matrix<f64> {
        let mut rng = rand::thread_rng();
        let b = Matrix::from_fn(n, n, |_, _| rng.r#gen::<f64>()).unwrap();
        let mut a = (&b * &b.transposed()).unwrap();
        for i in 0..n {
            a[(i, i)] += n as f64;
        }
        a
    }

    /// A zero threshold and narrow blocks run the trailing rows on the pool.
    #[test]
    fn parallel_trailing_rows_match_sequential() {
        let a = random_spd(45);
        let eager = ParallelOptions { block_size: 8, cholesky_threshold: 0, ..Default::default() };
        let lazy = ParallelOptions { block_size: 8, cholesky_threshold: usize::MAX, ..Default::default() };
        let par = factorize(&a, &eager).unwrap();
        let seq = factorize(&a, &lazy).unwrap();
        assert!(loosely_equal(&par, &seq, 1e-12));
        assert!(loosely_equal(&(&par * &par.transposed()).unwrap(), &a, 1e-6));
    }

    #[cfg(feature = "accelerate")]
    #[test]
    fn faer_backend_agrees_with_blocked_cholesky() {
        use crate::backend::FaerBackend;

        let a = random_spd(90);
        let blocked = factorize(&a, &ParallelOptions::default()).unwrap();
        let faer = FaerBackend::cholesky(&a).unwrap().unwrap();
        assert!(faer.is_lower_triangular());
        assert!(loosely_equal(&faer, &blocked, 1e-9));

        let indefinite = Matrix::from_rows(&[[1.0, 2.0], [2.0, 1.0]]).unwrap();
        assert!(matches!(FaerBackend::cholesky(&indefinite), Some(Err(LinalgError::NotPositiveDefinite))));
    }
}
