//! Matrix factorizations: PLU with partial pivoting, Cholesky and Householder QR.
//!
//! Each factorization converts its input to a floating type first: `T::Float` by default
//! (`f64` for integer matrices), or an explicit type through the `*_as::<R>` variants.
//! With the `accelerate` feature the whole factorization is handed to the active
//! [`Backend`](crate::backend::Backend); otherwise the blocked portable algorithms run.

pub mod cholesky;
pub mod plu;
pub mod qr;

pub use cholesky::{cholesky, cholesky_as};
pub use plu::{plu, plu_as, PluDecomposition};
pub use qr::{qr_decomposition, qr_decomposition_as, QrDecomposition, QrMode};
