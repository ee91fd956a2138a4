//! Configuration types module

pub mod container;
pub mod logging;

pub use container::{ComponentConfig, ContainerConfig};
pub use logging::LoggingConfig;
