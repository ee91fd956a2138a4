//! Component adapter port
//!
//! An adapter produces the instance of one registered component. Injectors
//! build instances; behaviors wrap exactly one inner adapter and add a single
//! concern. The container only ever holds the outermost adapter of a chain.

use super::container::Container;
use super::lifecycle::LifecycleStrategy;
use super::parameter::Parameter;
use crate::context::ResolutionContext;
use crate::error::Result;
use crate::value_objects::{Characteristics, ComponentKey, Instance, TypeInfo};
use std::fmt;
use std::sync::Arc;

static NO_CHARACTERISTICS: Characteristics = Characteristics::empty();

/// Traversal of containers, adapter chains and parameters
///
/// Every method defaults to doing nothing, so a visitor only overrides what
/// it cares about.
pub trait ComponentVisitor {
    /// Called once per visited container, before its adapters
    fn visit_container(&mut self, _container: &dyn Container) {}

    /// Called for the innermost adapter of a chain
    fn visit_adapter(&mut self, _adapter: &dyn ComponentAdapter) {}

    /// Called for each behavior on the way to the innermost adapter
    fn visit_behavior(&mut self, _behavior: &dyn ComponentAdapter) {}

    /// Called for each explicit parameter of an injector
    fn visit_parameter(&mut self, _parameter: &dyn Parameter) {}
}

/// Scoped lock held around a construction
pub trait ConstructionLock: Send + Sync {
    /// Run `build` while holding the lock
    fn run(&self, build: &mut dyn FnMut() -> Result<Instance>) -> Result<Instance>;
}

/// Live resolver for one component
pub trait ComponentAdapter: Send + Sync + fmt::Debug {
    /// Key the component is registered under
    fn component_key(&self) -> &ComponentKey;

    /// Implementation type, even when hidden
    fn implementation(&self) -> TypeInfo;

    /// Whether instances can be viewed as `ty`
    fn exposes(&self, ty: TypeInfo) -> bool;

    /// Types instances can be viewed as, in declaration order
    fn exposed_types(&self) -> Vec<TypeInfo>;

    /// Produce an instance, building it and its dependencies when needed
    fn component_instance(
        &self,
        container: &dyn Container,
        ctx: &mut ResolutionContext,
    ) -> Result<Instance>;

    /// Check that every dependency is satisfiable without building anything
    fn verify(&self, container: &dyn Container, ctx: &mut ResolutionContext) -> Result<()>;

    /// Human readable chain description, e.g. `Cached:ConstructorInjector-Car`
    fn descriptor(&self) -> String;

    /// Walk this chain
    fn accept(&self, visitor: &mut dyn ComponentVisitor);

    /// The wrapped adapter, for behaviors
    fn delegate(&self) -> Option<&dyn ComponentAdapter> {
        None
    }

    /// Effective characteristics the chain was assembled from
    fn characteristics(&self) -> &Characteristics {
        self.delegate()
            .map_or(&NO_CHARACTERISTICS, |delegate| delegate.characteristics())
    }

    /// Per-component lifecycle strategy override
    fn lifecycle_strategy(&self) -> Option<Arc<dyn LifecycleStrategy>> {
        self.delegate().and_then(|delegate| delegate.lifecycle_strategy())
    }

    /// The stored instance, when some adapter in the chain caches
    fn cached_instance(&self) -> Option<Instance> {
        self.delegate().and_then(|delegate| delegate.cached_instance())
    }

    /// Drop any stored instance
    fn flush(&self) {
        if let Some(delegate) = self.delegate() {
            delegate.flush();
        }
    }

    /// Lock serializing construction, when some adapter in the chain locks
    fn construction_lock(&self) -> Option<&dyn ConstructionLock> {
        self.delegate().and_then(|delegate| delegate.construction_lock())
    }

    /// Whether the component is instantiated when the container starts
    fn is_automatic(&self) -> bool {
        self.delegate().is_some_and(|delegate| delegate.is_automatic())
    }
}
