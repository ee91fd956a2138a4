//! Standalone adapters
//!
//! Adapters that do not build anything and so take no behaviors.

mod instance;

pub use instance::InstanceAdapter;
