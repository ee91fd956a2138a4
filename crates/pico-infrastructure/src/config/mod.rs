//! Configuration management
//!
//! Container configuration is merged from defaults, a TOML file and
//! `PICO_`-prefixed environment variables. It is read once when a container
//! is built and when each adapter chain is assembled.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{ComponentConfig, ContainerConfig, LoggingConfig};
