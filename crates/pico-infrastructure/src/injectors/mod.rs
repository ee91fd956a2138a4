//! Injectors
//!
//! Raw adapters that build instances from a [`ComponentDefinition`]. Every
//! behavior chain ends in exactly one injector.
//!
//! [`ComponentDefinition`]: crate::definition::ComponentDefinition

mod args;
mod injector;

pub use args::{Argument, Args};
pub(crate) use args::defers_to;
pub use injector::{InjectionKind, Injector};
