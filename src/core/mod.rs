//! Scalar constraint and the shared matrix traits.

pub mod scalar;
pub mod traits;

pub use scalar::{DivPromote, DivPromoted, Promote, Promoted, Real, Scalar};
pub use traits::{MatShape, MatrixGet};
