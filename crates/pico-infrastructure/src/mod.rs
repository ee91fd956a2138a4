// Clippy allows for complex patterns in infrastructure code
#![allow(clippy::collapsible_if)]

//! # Infrastructure Layer
//!
//! The working parts of the pico container: component definitions, adapter
//! chains, the default container and the ambient stack around them.
//!
//! ## Module Categories
//!
//! ### Composition
//! | Module | Description |
//! |--------|-------------|
//! | [`definition`] | Explicit component definitions and descriptors |
//! | [`parameters`] | Component, constant and default-value parameters |
//! | [`injectors`] | Constructor, setter, method and multi injection |
//! | [`behaviors`] | Caching, locking, property, automatic and hiding decorators |
//! | [`adapters`] | Adapters for ready-made instances |
//! | [`container`] | Registry, resolution, nesting and lifecycle |
//! | [`lifecycle`] | Start/stop/dispose strategies |
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML/env configuration with Figment |
//! | [`logging`] | Structured logging with tracing |
//! | [`monitors`] | Null and tracing component monitors |
//! | [`constants`] | Centralized configuration constants |

// Composition
pub mod adapters;
pub mod behaviors;
pub mod container;
pub mod definition;
pub mod injectors;
pub mod lifecycle;
pub mod parameters;

// Configuration and observability
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod monitors;
pub mod utils;

// Re-export commonly used types
pub use container::{ContainerBuilder, ContainerState, DefaultContainer};
pub use definition::ComponentDefinition;
pub use error_ext::ErrorContext;
pub use utils::TimedOperation;
