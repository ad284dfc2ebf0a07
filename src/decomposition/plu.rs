//! Blocked PLU decomposition with partial pivoting.
//!
//! Right-looking elimination over panels of `block_size` columns. Within a panel each
//! column picks the row with the largest magnitude as pivot and eliminates only inside
//! the panel's columns; the block of U to the right of the panel is then obtained by a
//! unit-lower triangular solve, and the rows below receive the panel's update in one pass.

use std::ops::Range;

use tracing::{debug, instrument, trace};

use crate::backend::{ActiveBackend, Backend};
use crate::config::{parallel_options, ParallelOptions};
use crate::core::{Real, Scalar};
use crate::error::LinalgError;
use crate::matrix::{identity_matrix, Matrix};
use crate::parallel;
use crate::utils::tolerance::{is_close, PIVOT_EPSILON};

/// Factors of `P·A = L·U`.
///
/// `p[i]` is the index of the row of `A` that ends up in row `i`, so
/// `permutation_matrix(&p) · A == L · U`. `L` is unit lower triangular and `U` upper
/// triangular.
#[derive(Debug, Clone, PartialEq)]
pub struct PluDecomposition<R> {
    pub p: Vec<usize>,
    pub l: Matrix<R>,
    pub u: Matrix<R>,
}

/// PLU decomposition in the floating type of `T` (`f64` for integer matrices).
pub fn plu<T: Scalar>(a: &Matrix<T>) -> Result<PluDecomposition<T::Float>, LinalgError> {
    plu_as::<T::Float>(a)
}

/// PLU decomposition computed in `R`.
///
/// Fails with `InvalidArgument` for a non-square input and with `Singular` when a pivot
/// falls within [`PIVOT_EPSILON`] of zero.
#[instrument(level = "debug", skip_all, fields(n = a.row_count()))]
pub fn plu_as<R: Real>(a: &Matrix<impl Scalar>) -> Result<PluDecomposition<R>, LinalgError> {
    if a.row_count() != a.column_count() {
        return Err(LinalgError::InvalidArgument(format!(
            "PLU needs a square matrix, got {}x{}",
            a.row_count(),
            a.column_count()
        )));
    }
    let work = a.cast::<R>();
    if let Some(result) = ActiveBackend::plu(&work) {
        debug!(backend = ActiveBackend::NAME, "PLU delegated to backend");
        return result;
    }
    factorize(work, &parallel_options())
}

fn swap_row_ranges<R>(data: &mut [R], cols: usize, a: usize, b: usize, range: Range<usize>) {
    let (lo, hi) = (a.min(b), a.max(b));
    let (top, bottom) = data.split_at_mut(hi * cols);
    top[lo * cols + range.start..lo * cols + range.end].swap_with_slice(&mut bottom[range]);
}

fn singular(column: usize) -> LinalgError {
    debug!(column, "near-zero pivot");
    LinalgError::Singular { column }
}

fn factorize<R: Real>(mut u: Matrix<R>, opts: &ParallelOptions) -> Result<PluDecomposition<R>, LinalgError> {
    let n = u.row_count();
    let bs = opts.block_size;
    let mut p: Vec<usize> = (0..n).collect();
    let mut l = identity_matrix::<R>(n)?;
    debug!(n, block = bs, "blocked PLU");

    for ib in (0..n).step_by(bs) {
        let block_end = (ib + bs).min(n);

        // Panel: pivot, swap and eliminate within columns ib..block_end.
        for i in ib..block_end.min(n - 1) {
            let mut pivot_row = i;
            let mut max_val = u[(i, i)].abs();
            for j in i + 1..n {
                let v = u[(j, i)].abs();
                if v > max_val {
                    max_val = v;
                    pivot_row = j;
                }
            }
            if is_close(max_val, 0.0_f64, PIVOT_EPSILON) {
                return Err(singular(i));
            }
            if pivot_row != i {
                trace!(column = i, pivot_row, "row swap");
                p.swap(i, pivot_row);
                swap_row_ranges(u.data_mut(), n, i, pivot_row, 0..n);
                swap_row_ranges(l.data_mut(), n, i, pivot_row, 0..i);
            }

            let inv_pivot = R::one() / u[(i, i)];
            let par = parallel::exceeds(n - (i + 1), opts.plu_panel_threshold);
            let (u_top, u_below) = u.data_mut().split_at_mut((i + 1) * n);
            let pivot: &[R] = &u_top[i * n..(i + 1) * n];
            let l_below = &mut l.data_mut()[(i + 1) * n..];
            parallel::for_each_chunk_pair_mut(u_below, n, l_below, n, par, |_, u_row, l_row| {
                let mult = u_row[i] * inv_pivot;
                l_row[i] = mult;
                for k in i + 1..block_end {
                    u_row[k] -= mult * pivot[k];
                }
            });
        }

        if block_end >= n {
            continue;
        }
        let par = parallel::exceeds(n - block_end, opts.plu_trailing_threshold);

        // U12: solve L11 · U12 = A12 one column at a time. Columns are gathered into
        // contiguous buffers so they can be solved independently.
        let (h, w) = (block_end - ib, n - block_end);
        let mut panel = vec![R::zero(); h * w];
        for r in 0..h {
            for (c, &value) in u.row(ib + r)[block_end..].iter().enumerate() {
                panel[c * h + r] = value;
            }
        }
        let l_ref = &l;
        parallel::for_each_chunk_mut(&mut panel, h, par, |_, col| {
            for r in 0..h {
                let i = ib + r;
                let mut sum = col[r];
                for k in 0..r {
                    sum -= l_ref[(i, ib + k)] * col[k];
                }
                col[r] = sum;
            }
        });
        for r in 0..h {
            for (c, value) in u.row_mut(ib + r)[block_end..].iter_mut().enumerate() {
                *value = panel[c * h + r];
            }
        }

        // A22 -= L21 · U12
        let (u_top, u_trailing) = u.data_mut().split_at_mut(block_end * n);
        let u_top: &[R] = u_top;
        parallel::for_each_chunk_mut(u_trailing, n, par, |r, row| {
            let i = block_end + r;
            for k in ib..block_end {
                let mult = l_ref[(i, k)];
                if is_close(mult, 0.0_f64, PIVOT_EPSILON) {
                    continue;
                }
                let pivot = &u_top[k * n + block_end..(k + 1) * n];
                for (target, &pv) in row[block_end..].iter_mut().zip(pivot) {
                    *target -= mult * pv;
                }
            }
        });
    }

    if is_close(u[(n - 1, n - 1)], 0.0_f64, PIVOT_EPSILON) {
        return Err(singular(n - 1));
    }

    let par = parallel::exceeds(n, opts.plu_panel_threshold);
    parallel::for_each_chunk_mut(u.data_mut(), n, par, |i, row| row[..i].fill(R::zero()));
    Ok(PluDecomposition { p, l, u })
}
