pub mod tolerance;

pub use tolerance::{is_close, EPSILON, PIVOT_EPSILON};
