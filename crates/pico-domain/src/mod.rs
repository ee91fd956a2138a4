//! # Domain Layer
//!
//! Core types of the pico container: the error taxonomy, value objects
//! describing components and their resolution, and the port traits that the
//! infrastructure layer implements.
//!
//! This crate holds no resolution logic of its own beyond the value objects.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`value_objects`] | Keys, instances, characteristics, slots, members |
//! | [`context`] | Per-call resolution state and cycle detection |
//! | [`ports`] | Adapter, container, parameter, monitor and lifecycle traits |
//! | [`constants`] | Shared literals |

/// Domain constants
pub mod constants;
/// Per-call resolution state
pub mod context;
/// Error handling types
pub mod error;
/// Port traits
pub mod ports;
/// Value objects
pub mod value_objects;

pub use context::{ResolutionContext, ScopeId};
pub use error::{BoxError, Error, LifecycleFailure, Result};
pub use ports::*;
pub use value_objects::*;
