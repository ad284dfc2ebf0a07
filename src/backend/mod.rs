//! Acceleration capability behind the kernels and factorizations.
//!
//! This module defines the [`Backend`] trait, the always-available [`Portable`] marker and,
//! with the `accelerate` feature, [`FaerBackend`]. The [`ActiveBackend`] type alias is the
//! single point of backend selection.
//!
//! Every routine receives row-major data with explicit strides and returns `None` (or
//! `false`) when the backend does not provide it, in which case the caller runs its portable
//! loop. Only `f32`/`f64` data ever reaches a backend.

#[cfg(feature = "accelerate")]
mod faer;

#[cfg(feature = "accelerate")]
pub use self::faer::FaerBackend;

use crate::core::Real;
use crate::decomposition::{PluDecomposition, QrDecomposition, QrMode};
use crate::error::LinalgError;
use crate::kernels::Op;
use crate::matrix::{Matrix, MatrixView, MatrixViewMut};
use crate::vector::VectorView;

/// Optional accelerated implementations of the dense routines.
pub trait Backend {
    /// Name reported in logs.
    const NAME: &'static str;

    /// `y = op(A)·x`. Lengths have already been validated.
    fn gemv<F: Real>(op: Op, a: &MatrixView<'_, F>, x: &VectorView<'_, F>) -> Option<Vec<F>>;

    /// `A ← A − alpha·x·yᵀ`. Returns `true` when the update was applied.
    fn ger<F: Real>(a: &mut MatrixViewMut<'_, F>, x: &VectorView<'_, F>, y: &VectorView<'_, F>, alpha: F) -> bool;

    fn dot<F: Real>(x: &VectorView<'_, F>, y: &VectorView<'_, F>) -> Option<F>;

    /// Row-major `A·B`. Inner dimensions have already been validated.
    fn gemm<F: Real>(a: &MatrixView<'_, F>, b: &MatrixView<'_, F>) -> Option<Vec<F>>;

    /// Square input.
    fn plu<F: Real>(a: &Matrix<F>) -> Option<Result<PluDecomposition<F>, LinalgError>>;

    /// Symmetric input; returns the lower factor.
    fn cholesky<F: Real>(a: &Matrix<F>) -> Option<Result<Matrix<F>, LinalgError>>;

    /// Householder QR with `R` on a non-negative diagonal.
    fn qr<F: Real>(a: &Matrix<F>, mode: QrMode) -> Option<Result<QrDecomposition<F>, LinalgError>>;
}

/// Declines every routine, leaving all work to the portable loops.
pub struct Portable;

impl Backend for Portable {
    const NAME: &'static str = "portable";

    fn gemv<F: Real>(_op: Op, _a: &MatrixView<'_, F>, _x: &VectorView<'_, F>) -> Option<Vec<F>> {
        None
    }

    fn ger<F: Real>(_a: &mut MatrixViewMut<'_, F>, _x: &VectorView<'_, F>, _y: &VectorView<'_, F>, _alpha: F) -> bool {
        false
    }

    fn dot<F: Real>(_x: &VectorView<'_, F>, _y: &VectorView<'_, F>) -> Option<F> {
        None
    }

    fn gemm<F: Real>(_a: &MatrixView<'_, F>, _b: &MatrixView<'_, F>) -> Option<Vec<F>> {
        None
    }

    fn plu<F: Real>(_a: &Matrix<F>) -> Option<Result<PluDecomposition<F>, LinalgError>> {
        None
    }

    fn cholesky<F: Real>(_a: &Matrix<F>) -> Option<Result<Matrix<F>, LinalgError>> {
        None
    }

    fn qr<F: Real>(_a: &Matrix<F>, _mode: QrMode) -> Option<Result<QrDecomposition<F>, LinalgError>> {
        None
    }
}

/// The backend used by every kernel and factorization, selected by Cargo features.
///
/// - `accelerate` -> [`FaerBackend`]
/// - otherwise -> [`Portable`]
#[cfg(feature = "accelerate")]
pub type ActiveBackend = FaerBackend;

#[cfg(not(feature = "accelerate"))]
pub type ActiveBackend = Portable;
