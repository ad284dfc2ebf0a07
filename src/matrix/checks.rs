//! Structural predicates on matrices and approximate equality.
//!
//! All element comparisons are absolute and go through [`is_close`]: a value counts as
//! zero when it lies within [`EPSILON`] of it.

use bitflags::bitflags;

use crate::core::{MatShape, MatrixGet, Scalar};
use crate::decomposition::{cholesky, plu};
use crate::matrix::Matrix;
use crate::utils::tolerance::{is_close, EPSILON};
use crate::vector::Vector;

bitflags! {
    /// Summary of the structural properties of a matrix, see [`Matrix::properties`].
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct MatrixProperties: u32 {
        const SQUARE             = 0b0000_0001;
        const SYMMETRIC          = 0b0000_0010;
        const UPPER_TRIANGULAR   = 0b0000_0100;
        const LOWER_TRIANGULAR   = 0b0000_1000;
        const DIAGONAL           = Self::UPPER_TRIANGULAR.bits() | Self::LOWER_TRIANGULAR.bits();
        const SINGULAR           = 0b0001_0000;
        const POSITIVE_DEFINITE  = 0b0010_0000;
    }
}

fn symmetric<T: Scalar, M: MatShape + MatrixGet<T>>(a: &M) -> bool {
    a.is_square()
        && (0..a.row_count())
            .all(|i| (i + 1..a.column_count()).all(|j| is_close(a.get(i, j), a.get(j, i), EPSILON)))
}

/// Every entry strictly below (`upper == true`) or above the diagonal is zero.
fn triangular<T: Scalar, M: MatShape + MatrixGet<T>>(a: &M, upper: bool) -> bool {
    if !a.is_square() {
        return false;
    }
    let n = a.row_count();
    (0..n).all(|i| {
        let mut off = if upper { 0..i } else { i + 1..n };
        off.all(|j| is_close(a.get(i, j), 0.0_f64, EPSILON))
    })
}

impl<T: Scalar> Matrix<T> {
    pub fn is_square(&self) -> bool {
        MatShape::is_square(self)
    }

    /// Square and `A[i][j] ≈ A[j][i]` within [`EPSILON`].
    pub fn is_symmetric(&self) -> bool {
        symmetric(self)
    }

    /// Square with only zeros below the diagonal.
    pub fn is_upper_triangular(&self) -> bool {
        triangular(self, true)
    }

    /// Square with only zeros above the diagonal.
    pub fn is_lower_triangular(&self) -> bool {
        triangular(self, false)
    }

    pub fn is_diagonal(&self) -> bool {
        self.is_upper_triangular() && self.is_lower_triangular()
    }

    /// Non-square matrices count as singular; square ones are singular when PLU fails.
    pub fn is_singular(&self) -> bool {
        !self.is_square() || plu(self).is_err()
    }

    /// `true` when a Cholesky factorization exists.
    pub fn is_positive_definite(&self) -> bool {
        cholesky(self).is_ok()
    }

    /// Runs every check and collects the results.
    ///
    /// This factorizes the matrix twice, so it costs as much as [`plu`] plus [`cholesky`].
    pub fn properties(&self) -> MatrixProperties {
        let mut props = MatrixProperties::empty();
        props.set(MatrixProperties::SQUARE, self.is_square());
        props.set(MatrixProperties::SYMMETRIC, self.is_symmetric());
        props.set(MatrixProperties::UPPER_TRIANGULAR, self.is_upper_triangular());
        props.set(MatrixProperties::LOWER_TRIANGULAR, self.is_lower_triangular());
        props.set(MatrixProperties::SINGULAR, self.is_singular());
        props.set(MatrixProperties::POSITIVE_DEFINITE, self.is_positive_definite());
        props
    }
}

/// Same shape and every pair of entries within `eps`.
pub fn loosely_equal<T: Scalar, U: Scalar>(a: &Matrix<T>, b: &Matrix<U>, eps: f64) -> bool {
    a.row_count() == b.row_count()
        && a.column_count() == b.column_count()
        && a.data().iter().zip(b.data()).all(|(&x, &y)| is_close(x, y, eps))
}

/// Same size and every pair of elements within `eps`. Orientation is ignored.
pub fn vectors_loosely_equal<T: Scalar, U: Scalar>(a: &Vector<T>, b: &Vector<U>, eps: f64) -> bool {
    a.size() == b.size() && a.iter().zip(b.iter()).all(|(&x, &y)| is_close(x, y, eps))
}
