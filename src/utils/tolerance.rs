//! Absolute tolerances shared by the structural checks and the factorizations.

use crate::core::Scalar;

/// Tolerance for symmetry checks and approximate equality.
pub const EPSILON: f64 = 1e-6;

/// Pivots below this magnitude mark a matrix as singular.
pub const PIVOT_EPSILON: f64 = 1e-9;

/// `|a - b| < eps`, compared in `f64`.
#[inline]
pub fn is_close<T: Scalar, U: Scalar>(a: T, b: U, eps: f64) -> bool {
    (a.as_f64() - b.as_f64()).abs() < eps
}
