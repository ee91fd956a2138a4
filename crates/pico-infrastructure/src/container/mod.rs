//! Container
//!
//! [`DefaultContainer`] is the registry and resolution root; build it with
//! [`ContainerBuilder`].

mod builder;
mod default;
mod registry;
mod visitor;

pub use builder::ContainerBuilder;
pub use default::{ContainerState, DefaultContainer};
pub use visitor::VerifyingVisitor;
