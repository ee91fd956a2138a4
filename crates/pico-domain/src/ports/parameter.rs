//! Parameter port
//!
//! A parameter decides how one slot is supplied. Resolution is read only: it
//! names an adapter (and the container owning it), a ready value, or reports
//! why the slot cannot be satisfied. Building the adapter is left to the
//! injector so that cycle detection sees every nested construction.

use super::adapter::{ComponentAdapter, ComponentVisitor};
use super::container::Container;
use crate::context::ResolutionContext;
use crate::error::Result;
use crate::value_objects::{ComponentKey, Instance, Slot};
use std::fmt;
use std::sync::Arc;

/// Everything a parameter may consult to resolve one slot
#[derive(Clone, Copy)]
pub struct ResolveRequest<'a> {
    /// Container owning the requesting adapter
    pub container: &'a dyn Container,
    /// Key of the requesting adapter
    pub adapter: &'a ComponentKey,
    /// Slot being supplied
    pub slot: &'a Slot,
    /// Whether slot names take part in matching
    pub use_names: bool,
}

impl fmt::Debug for ResolveRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveRequest")
            .field("container", &self.container.name())
            .field("adapter", self.adapter)
            .field("slot", self.slot)
            .field("use_names", &self.use_names)
            .finish()
    }
}

/// Outcome of resolving one slot
pub enum Resolution {
    /// A ready value
    Value(Instance),
    /// An adapter to instantiate
    Adapter {
        /// The matching adapter
        adapter: Arc<dyn ComponentAdapter>,
        /// Container owning the adapter, `None` for the requesting container
        owner: Option<Arc<dyn Container>>,
    },
    /// Nothing can supply the slot
    Unsatisfied {
        /// Why
        reason: String,
    },
}

impl Resolution {
    /// Shorthand for an unsatisfied resolution
    pub fn unsatisfied<S: Into<String>>(reason: S) -> Self {
        Self::Unsatisfied {
            reason: reason.into(),
        }
    }

    /// Whether something can supply the slot
    pub fn is_satisfied(&self) -> bool {
        !matches!(self, Self::Unsatisfied { .. })
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(instance) => f.debug_tuple("Value").field(instance).finish(),
            Self::Adapter { adapter, owner } => f
                .debug_struct("Adapter")
                .field("key", adapter.component_key())
                .field("owner", &owner.as_ref().map(|o| o.name().to_string()))
                .finish(),
            Self::Unsatisfied { reason } => {
                f.debug_struct("Unsatisfied").field("reason", reason).finish()
            }
        }
    }
}

/// Strategy supplying one slot
pub trait Parameter: Send + Sync + fmt::Debug {
    /// Decide how the slot is supplied, without building anything
    fn resolve(&self, request: &ResolveRequest<'_>) -> Result<Resolution>;

    /// Check the slot is satisfiable, recursing into the chosen adapter
    fn verify(&self, request: &ResolveRequest<'_>, ctx: &mut ResolutionContext) -> Result<()>;

    /// Visit this parameter
    fn accept(&self, visitor: &mut dyn ComponentVisitor);
}
