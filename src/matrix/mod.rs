//! Matrix module: the dense row-major matrix, its views, operators, factories and
//! structural checks.

pub mod checks;
pub mod dense;
pub mod factories;
pub mod ops;
pub mod view;

pub use checks::{loosely_equal, vectors_loosely_equal, MatrixProperties};
pub use dense::Matrix;
pub use factories::{identity_matrix, ones, permutation_matrix};
pub use view::{MatrixView, MatrixViewMut};
