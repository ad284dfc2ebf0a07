//! Householder QR decomposition.
//!
//! Column `j` of the working matrix is reduced by a reflector `H_j = I − τ_j·v·vᵀ` with
//! `v[0] = 1`; the tail of `v` is stored below the diagonal in place of the eliminated
//! entries. The trailing columns are updated with one [`gemv`](crate::kernels::gemv) and
//! one [`ger`](crate::kernels::ger) per reflector, and `Q` is rebuilt by applying the
//! reflectors to the identity in reverse order.

use bitflags::bitflags;
use tracing::{debug, instrument};

use crate::backend::{ActiveBackend, Backend};
use crate::core::{Real, Scalar};
use crate::error::LinalgError;
use crate::kernels::{self, Op};
use crate::matrix::{identity_matrix, Matrix};
use crate::vector::{Orientation, Vector};

bitflags! {
    /// Shape of the returned factors. The empty set gives the thin `m × k` Q and `k × n` R,
    /// with `k = min(m, n)`.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    pub struct QrMode: u32 {
        /// Q is the full `m × m` orthogonal matrix.
        const FULL_Q = 0b01;
        /// R has all `m` rows.
        const FULL_R = 0b10;
    }
}

/// `A = Q·R` with `Q` having orthonormal columns and `R` upper triangular with a
/// non-negative diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct QrDecomposition<R> {
    pub q: Matrix<R>,
    pub r: Matrix<R>,
}

/// QR decomposition in the floating type of `T`.
pub fn qr_decomposition<T: Scalar>(a: &Matrix<T>, mode: QrMode) -> Result<QrDecomposition<T::Float>, LinalgError> {
    qr_decomposition_as::<T::Float>(a, mode)
}

/// QR decomposition computed in `R`.
#[instrument(level = "debug", skip_all, fields(m = a.row_count(), n = a.column_count(), ?mode))]
pub fn qr_decomposition_as<R: Real>(a: &Matrix<impl Scalar>, mode: QrMode) -> Result<QrDecomposition<R>, LinalgError> {
    let (m, n) = (a.row_count(), a.column_count());
    if m == 0 || n == 0 {
        return Err(LinalgError::InvalidArgument("QR of an empty matrix".into()));
    }
    let work = a.cast::<R>();
    if let Some(result) = ActiveBackend::qr(&work, mode) {
        debug!(backend = ActiveBackend::NAME, "QR delegated to backend");
        return result;
    }
    householder(work, mode)
}

/// Reduces column `j` below the diagonal and returns `τ_j` (zero when there is nothing to do).
fn householder_column<R: Real>(a: &mut Matrix<R>, j: usize) -> R {
    let m = a.row_count();
    let sigma = (j + 1..m).fold(R::zero(), |s, i| s + a[(i, j)] * a[(i, j)]);
    if sigma.is_zero() {
        return R::zero();
    }
    let alpha = a[(j, j)];
    let norm = (alpha * alpha + sigma).sqrt();
    let beta = if alpha <= R::zero() { norm } else { -norm };
    let scale = R::one() / (alpha - beta);
    let mut v_tv = R::one();
    for i in j + 1..m {
        a[(i, j)] *= scale;
        v_tv += a[(i, j)] * a[(i, j)];
    }
    a[(j, j)] = beta;
    (R::one() + R::one()) / v_tv
}

/// `v` for reflector `j`: a leading one followed by the stored tail.
fn reflector<R: Real>(a: &Matrix<R>, j: usize) -> Vector<R> {
    let m = a.row_count();
    let mut v = Vec::with_capacity(m - j);
    v.push(R::one());
    v.extend((j + 1..m).map(|i| a[(i, j)]));
    Vector::from_parts(v, Orientation::Column)
}

/// `block ← H·block` for the reflector `(v, tau)`.
fn reflect<R: Real>(target: &mut Matrix<R>, row: usize, col: usize, v: &Vector<R>, tau: R) -> Result<(), LinalgError> {
    let (height, width) = (target.row_count() - row, target.column_count() - col);
    let mut block = target.view_mut(row, col, height, width)?;
    let w = kernels::gemv(Op::Trans, &block.as_view(), &v.view())?;
    kernels::ger(&mut block, &v.view(), &w.view(), tau)
}

fn householder<R: Real>(mut work: Matrix<R>, mode: QrMode) -> Result<QrDecomposition<R>, LinalgError> {
    let (m, n) = (work.row_count(), work.column_count());
    let k = m.min(n);
    let mut tau = vec![R::zero(); k];

    for j in 0..k {
        tau[j] = householder_column(&mut work, j);
        if tau[j].is_zero() || j + 1 >= n {
            continue;
        }
        let v = reflector(&work, j);
        reflect(&mut work, j, j + 1, &v, tau[j])?;
    }

    let mut r = Matrix::new(m, n)?;
    for i in 0..k {
        r.row_mut(i)[i..].copy_from_slice(&work.row(i)[i..]);
    }

    let mut q = identity_matrix::<R>(m)?;
    for j in (0..k).rev() {
        if tau[j].is_zero() {
            continue;
        }
        let v = reflector(&work, j);
        reflect(&mut q, j, j, &v, tau[j])?;
    }
    debug!(reflectors = tau.iter().filter(|t| !t.is_zero()).count(), "Householder QR");

    Ok(assemble(q, r, mode))
}

/// Flips signs so that `diag(R) ≥ 0`, then trims the full `m × m` Q and `m × n` R to `mode`.
pub(crate) fn assemble<R: Real>(mut q: Matrix<R>, mut r: Matrix<R>, mode: QrMode) -> QrDecomposition<R> {
    let (m, n) = (r.row_count(), r.column_count());
    let k = m.min(n);
    for j in 0..k {
        if r[(j, j)] < R::zero() {
            r.row_mut(j).iter_mut().for_each(|x| *x = -*x);
            for i in 0..m {
                q[(i, j)] = -q[(i, j)];
            }
        }
    }

    let q_cols = if mode.contains(QrMode::FULL_Q) { m } else { k };
    let r_rows = if mode.contains(QrMode::FULL_R) { m } else { k };
    let q = if q_cols == m {
        q
    } else {
        Matrix::from_parts(m, q_cols, q.rows().flat_map(|row| row[..q_cols].iter().copied()).collect())
    };
    let r = if r_rows == m {
        r
    } else {
        Matrix::from_parts(r_rows, n, r.data()[..r_rows * n].to_vec())
    };
    QrDecomposition { q, r }
}
