use thiserror::Error;

// Unified error type for densela

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinalgError {
    #[error("invalid construction: {0}")]
    InvalidConstruction(String),
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("index out of range: {0}")]
    OutOfRange(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("matrix is singular; pivot is near zero at column {column}")]
    Singular { column: usize },
    #[error("matrix is not symmetric")]
    NotSymmetric,
    #[error("matrix is not positive definite")]
    NotPositiveDefinite,
    #[error("accelerated backend failure: {0}")]
    Backend(String),
}

impl LinalgError {
    pub(crate) fn mismatch(op: &str, lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        LinalgError::DimensionMismatch(format!(
            "{op}: {}x{} is incompatible with {}x{}",
            lhs.0, lhs.1, rhs.0, rhs.1
        ))
    }

    pub(crate) fn out_of_range(what: &str, index: usize, bound: usize) -> Self {
        LinalgError::OutOfRange(format!("{what} {index} is outside 0..{bound}"))
    }
}
