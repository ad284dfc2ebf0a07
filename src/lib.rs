//! densela: dense linear algebra with strided views and blocked factorizations
//!
//! This crate provides owning vectors and row-major matrices generic over the integer and
//! floating element types, borrow-checked strided views over them, BLAS-style kernels
//! (`gemv`, `ger`, `dot`, `outer`) and blocked PLU, Cholesky and Householder QR
//! factorizations. Loops switch to rayon above configurable size thresholds, and the
//! `accelerate` feature routes same-type float work to faer.

pub mod parallel;

pub mod backend;
pub mod config;
pub mod core;
pub mod decomposition;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod utils;
pub mod vector;

// Re-exports for convenience
pub use config::{parallel_options, set_parallel_options, ParallelOptions};
pub use crate::core::{DivPromote, DivPromoted, MatShape, MatrixGet, Promote, Promoted, Real, Scalar};
pub use decomposition::{
    cholesky, cholesky_as, plu, plu_as, qr_decomposition, qr_decomposition_as, PluDecomposition, QrDecomposition,
    QrMode,
};
pub use error::LinalgError;
pub use kernels::{dot, gemv, ger, outer, Op};
pub use matrix::{
    identity_matrix, loosely_equal, ones, permutation_matrix, vectors_loosely_equal, Matrix, MatrixProperties,
    MatrixView, MatrixViewMut,
};
pub use utils::{is_close, EPSILON, PIVOT_EPSILON};
pub use vector::{Orientation, Vector, VectorView, VectorViewMut};
