//! Infrastructure utilities
//!
//! Reusable helpers for timing and lock acquisition.

mod locks;
mod timing;

pub use locks::{lock_mutex, lock_read, lock_write};
pub use timing::TimedOperation;
