pub mod options;

pub use options::{parallel_options, set_parallel_options, ParallelOptions};
