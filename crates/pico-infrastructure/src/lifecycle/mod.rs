//! Lifecycle strategies

mod startable;

pub use startable::{NullLifecycleStrategy, StartableLifecycleStrategy};
