// Blocked matrix-matrix product

use tracing::trace;

use crate::config::parallel_options;
use crate::core::{Promote, Promoted, Scalar};
use crate::error::LinalgError;
use crate::matrix::{Matrix, MatrixView};
use crate::parallel::{self, Workload};

/// C = A·B, tiled over `block_size`-wide blocks of rows, inner dimension and columns.
///
/// Row blocks of C are independent and run in parallel once C has more elements than the
/// cubic threshold.
pub fn gemm<T, U>(a: &MatrixView<'_, T>, b: &MatrixView<'_, U>) -> Result<Matrix<Promoted<T, U>>, LinalgError>
where
    T: Promote<U>,
    U: Scalar,
{
    if a.column_count() != b.row_count() {
        return Err(LinalgError::mismatch(
            "matrix product",
            (a.row_count(), a.column_count()),
            (b.row_count(), b.column_count()),
        ));
    }
    Ok(gemm_into::<T, U, Promoted<T, U>>(a, b))
}

fn gemm_into<T: Scalar, U: Scalar, R: Scalar>(a: &MatrixView<'_, T>, b: &MatrixView<'_, U>) -> Matrix<R> {
    let (m, k, n) = (a.row_count(), a.column_count(), b.column_count());
    if let (Some(a_r), Some(b_r)) = (a.reinterpret::<R>(), b.reinterpret::<R>()) {
        if let Some(c) = R::accel_gemm(&a_r, &b_r) {
            trace!(m, k, n, "gemm handled by backend");
            return Matrix::from_parts(m, n, c);
        }
    }

    let bs = parallel_options().block_size;
    let par = parallel::should_parallelize(m * n, Workload::Cubic);
    let mut c = vec![R::zero(); m * n];
    parallel::for_each_chunk_mut(&mut c, bs * n, par, |blk, c_block| {
        let i0 = blk * bs;
        let height = c_block.len() / n;
        for kk in (0..k).step_by(bs) {
            let k_end = (kk + bs).min(k);
            for jj in (0..n).step_by(bs) {
                let j_end = (jj + bs).min(n);
                for ii in 0..height {
                    let a_row = a.row(i0 + ii);
                    let c_row = &mut c_block[ii * n..(ii + 1) * n];
                    for p in kk..k_end {
                        let aip = R::from_scalar(a_row[p]);
                        let b_row = b.row(p);
                        for j in jj..j_end {
                            c_row[j] += aip * R::from_scalar(b_row[j]);
                        }
                    }
                }
            }
        }
    });
    Matrix::from_parts(m, n, c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn product_of_small_matrices() {
        let a = Matrix::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let b = Matrix::from_vec(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
        let c = gemm(&a.view_all(), &b.view_all()).unwrap();
        assert_eq!(c.data(), &[58.0, 64.0, 139.0, 154.0]);
        assert!(gemm(&a.view_all(), &a.view_all()).is_err());
    }

    /// Dimensions that straddle the block width exercise partial tiles.
    #[test]
    fn blocked_product_matches_naive() {
        let (m, k, n) = (70, 130, 65);
        let mut rng = rand::thread_rng();
        let a = Matrix::from_fn(m, k, |_, _| rng.gen_range(-10..10)).unwrap();
        let b = Matrix::from_fn(k, n, |_, _| rng.gen_range(-10..10)).unwrap();
        let c = gemm(&a.view_all(), &b.view_all()).unwrap();
        for i in 0..m {
            for j in 0..n {
                let expected: i32 = (0..k).map(|p| a[(i, p)] * b[(p, j)]).sum();
                assert_eq!(c[(i, j)], expected);
            }
        }
    }
}
