// rayon thread-pool setup

use crate::error::LinalgError;

/// Build the global rayon pool with `num_threads` workers (all cores when `None`).
///
/// Can only succeed once per process; later calls report the pool as already built.
pub fn init_thread_pool(num_threads: Option<usize>) -> Result<(), LinalgError> {
    let threads = num_threads.unwrap_or_else(num_cpus::get);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(|e| LinalgError::InvalidArgument(format!("thread pool: {e}")))?;
    tracing::debug!(threads, "initialized rayon pool");
    Ok(())
}

/// Number of workers in the pool that parallel loops run on.
pub fn current_num_threads() -> usize {
    rayon::current_num_threads()
}
