//! faer-backed kernels and factorizations.
//!
//! Views are handed to faer as `MatRef`/`MatMut` over the borrowed row-major buffer
//! (row stride = view stride, column stride = 1), so no data is copied on the kernel path.
//! The factorizations copy their result back into row-major [`Matrix`] values.

use ::faer::linalg::matmul::matmul_with_conj;
use ::faer::linalg::solvers::{Llt, PartialPivLu, Qr};
use ::faer::mat::{MatMut, MatRef};
use ::faer::{Accum, Conj, Mat, Par, Side};
use tracing::debug;

use crate::backend::Backend;
use crate::core::Real;
use crate::decomposition::qr::assemble;
use crate::decomposition::{PluDecomposition, QrDecomposition, QrMode};
use crate::error::LinalgError;
use crate::kernels::Op;
use crate::matrix::{Matrix, MatrixView, MatrixViewMut};
use crate::utils::tolerance::{is_close, PIVOT_EPSILON};
use crate::vector::VectorView;

/// Backend delegating to the [`faer`](::faer) crate.
pub struct FaerBackend;

fn mat_ref<'a, F: Real>(a: &MatrixView<'a, F>) -> MatRef<'a, F> {
    let data = a.raw();
    // SAFETY: `raw()` covers exactly rows × cols elements laid out with this row stride.
    unsafe { MatRef::from_raw_parts(data.as_ptr(), a.row_count(), a.column_count(), a.stride() as isize, 1) }
}

fn mat_mut<'a, F: Real>(a: &'a mut MatrixViewMut<'_, F>) -> MatMut<'a, F> {
    let (rows, cols, stride) = (a.row_count(), a.column_count(), a.stride());
    let data = a.raw_mut();
    // SAFETY: as for `mat_ref`, and the exclusive borrow of the view is held for 'a.
    unsafe { MatMut::from_raw_parts_mut(data.as_mut_ptr(), rows, cols, stride as isize, 1) }
}

/// Vector view as an `len × 1` column.
fn col_ref<'a, F: Real>(x: &VectorView<'a, F>) -> MatRef<'a, F> {
    let data = x.raw();
    // SAFETY: element i lives at i * increment, inside `raw()`.
    unsafe { MatRef::from_raw_parts(data.as_ptr(), x.len(), 1, x.increment() as isize, 1) }
}

fn to_matrix<F: Real>(m: &Mat<F>) -> Matrix<F> {
    let (rows, cols) = (m.nrows(), m.ncols());
    Matrix::from_parts(rows, cols, (0..rows * cols).map(|k| m[(k / cols, k % cols)]).collect())
}

fn row_major_ref<F: Real>(a: &Matrix<F>) -> MatRef<'_, F> {
    mat_ref(&a.view_all())
}

impl Backend for FaerBackend {
    const NAME: &'static str = "faer";

    fn gemv<F: Real>(op: Op, a: &MatrixView<'_, F>, x: &VectorView<'_, F>) -> Option<Vec<F>> {
        let lhs = match op {
            Op::NoTrans => mat_ref(a),
            Op::Trans => mat_ref(a).transpose(),
        };
        let mut y = vec![F::zero(); lhs.nrows()];
        let n = y.len();
        matmul_with_conj(
            MatMut::from_column_major_slice_mut(&mut y, n, 1),
            Accum::Replace,
            lhs,
            Conj::No,
            col_ref(x),
            Conj::No,
            F::one(),
            Par::Seq,
        );
        Some(y)
    }

    fn ger<F: Real>(a: &mut MatrixViewMut<'_, F>, x: &VectorView<'_, F>, y: &VectorView<'_, F>, alpha: F) -> bool {
        matmul_with_conj(
            mat_mut(a),
            Accum::Add,
            col_ref(x),
            Conj::No,
            col_ref(y).transpose(),
            Conj::No,
            -alpha,
            Par::Seq,
        );
        true
    }

    fn dot<F: Real>(x: &VectorView<'_, F>, y: &VectorView<'_, F>) -> Option<F> {
        let mut out = [F::zero()];
        matmul_with_conj(
            MatMut::from_column_major_slice_mut(&mut out, 1, 1),
            Accum::Replace,
            col_ref(x).transpose(),
            Conj::No,
            col_ref(y),
            Conj::No,
            F::one(),
            Par::Seq,
        );
        Some(out[0])
    }

    fn gemm<F: Real>(a: &MatrixView<'_, F>, b: &MatrixView<'_, F>) -> Option<Vec<F>> {
        let (m, n) = (a.row_count(), b.column_count());
        let mut c = vec![F::zero(); m * n];
        matmul_with_conj(
            MatMut::from_row_major_slice_mut(&mut c, m, n),
            Accum::Replace,
            mat_ref(a),
            Conj::No,
            mat_ref(b),
            Conj::No,
            F::one(),
            Par::Seq,
        );
        Some(c)
    }

    fn plu<F: Real>(a: &Matrix<F>) -> Option<Result<PluDecomposition<F>, LinalgError>> {
        let n = a.row_count();
        let lu = PartialPivLu::new(row_major_ref(a));
        let l = to_matrix(&lu.L().to_owned());
        let u = to_matrix(&lu.U().to_owned());
        if let Some(column) = (0..n).find(|&i| is_close(u[(i, i)], 0.0_f64, PIVOT_EPSILON)) {
            debug!(column, "faer LU produced a near-zero pivot");
            return Some(Err(LinalgError::Singular { column }));
        }
        let p = lu.P().arrays().0.to_vec();
        Some(Ok(PluDecomposition { p, l, u }))
    }

    fn cholesky<F: Real>(a: &Matrix<F>) -> Option<Result<Matrix<F>, LinalgError>> {
        Some(match Llt::new(row_major_ref(a), Side::Lower) {
            Ok(llt) => Ok(to_matrix(&llt.L().to_owned())),
            Err(e) => {
                debug!(error = ?e, "faer LLT rejected the matrix");
                Err(LinalgError::NotPositiveDefinite)
            }
        })
    }

    fn qr<F: Real>(a: &Matrix<F>, mode: QrMode) -> Option<Result<QrDecomposition<F>, LinalgError>> {
        let (m, n) = (a.row_count(), a.column_count());
        let a_ref = row_major_ref(a);
        let q = Qr::new(a_ref).compute_Q();
        let mut r = Mat::<F>::zeros(m, n);
        matmul_with_conj(r.as_mut(), Accum::Replace, q.as_ref().transpose(), Conj::No, a_ref, Conj::No, F::one(), Par::Seq);
        let mut r = to_matrix(&r);
        for i in 0..m {
            for j in 0..i.min(n) {
                r[(i, j)] = F::zero();
            }
        }
        Some(Ok(assemble(to_matrix(&q), r, mode)))
    }
}
