//! Tuning options for the size-based parallel dispatch.
//!
//! This module provides the `ParallelOptions` struct, which holds the element-count
//! thresholds above which loops are handed to the rayon pool, and the tile width used
//! by the blocked algorithms (transpose, matrix product, PLU, Cholesky). Options are
//! installed once per process with [`set_parallel_options`]; until then every call
//! sees [`ParallelOptions::default`].

use std::sync::OnceLock;

use crate::error::LinalgError;

/// Thresholds & block sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelOptions {
    /// Element count above which O(n) loops run in parallel (elementwise ops, dot).
    pub linear_threshold: usize,

    /// Element count above which O(n²) loops run in parallel (gemv, ger, outer, transpose).
    pub quadratic_threshold: usize,

    /// Output element count above which the O(n³) matrix product runs in parallel.
    pub cubic_threshold: usize,

    /// Tile width of the blocked algorithms.
    pub block_size: usize,

    /// Remaining rows above which PLU panel elimination runs in parallel.
    pub plu_panel_threshold: usize,

    /// Trailing extent above which the PLU block solve and update run in parallel.
    pub plu_trailing_threshold: usize,

    /// Matrix order above which the Cholesky trailing rows run in parallel.
    pub cholesky_threshold: usize,
}

impl Default for ParallelOptions {
    fn default() -> Self {
        Self {
            linear_threshold: 500_000,
            quadratic_threshold: 500 * 500,
            cubic_threshold: 50 * 50,
            block_size: 64,
            plu_panel_threshold: 256,
            plu_trailing_threshold: 128,
            cholesky_threshold: 1000,
        }
    }
}

static OPTIONS: OnceLock<ParallelOptions> = OnceLock::new();

/// Install process-wide options. Fails if options were already installed or `block_size` is zero.
pub fn set_parallel_options(options: ParallelOptions) -> Result<(), LinalgError> {
    if options.block_size == 0 {
        return Err(LinalgError::InvalidArgument("block_size must be positive".into()));
    }
    OPTIONS
        .set(options)
        .map_err(|_| LinalgError::InvalidArgument("parallel options already installed".into()))?;
    tracing::debug!(?options, "installed parallel options");
    Ok(())
}

/// Currently active options.
pub fn parallel_options() -> ParallelOptions {
    OPTIONS.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_thresholds() {
        let opts = ParallelOptions::default();
        assert_eq!(opts.linear_threshold, 500_000);
        assert_eq!(opts.quadratic_threshold, 250_000);
        assert_eq!(opts.cubic_threshold, 2_500);
        assert_eq!(opts.block_size, 64);
    }

    #[test]
    fn zero_block_size_is_rejected() {
        let opts = ParallelOptions { block_size: 0, ..Default::default() };
        assert!(matches!(set_parallel_options(opts), Err(LinalgError::InvalidArgument(_))));
    }
}
