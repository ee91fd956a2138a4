//! Locking behavior

use pico_domain::constants::LOCKED_PREFIX;
use pico_domain::context::ResolutionContext;
use pico_domain::error::Result;
use pico_domain::ports::{ComponentAdapter, ComponentVisitor, ConstructionLock, Container};
use pico_domain::value_objects::Instance;
use parking_lot::ReentrantMutex;
use std::fmt;

/// Serializes construction through the delegate
///
/// The lock is reentrant so that a cycle on one thread reaches cycle
/// detection instead of deadlocking.
pub struct Locked {
    delegate: Box<dyn ComponentAdapter>,
    lock: ReentrantMutex<()>,
}

impl Locked {
    /// Serialize construction of `delegate`
    pub fn new(delegate: Box<dyn ComponentAdapter>) -> Self {
        Self {
            delegate,
            lock: ReentrantMutex::new(()),
        }
    }
}

impl ConstructionLock for Locked {
    fn run(&self, build: &mut dyn FnMut() -> Result<Instance>) -> Result<Instance> {
        let _guard = self.lock.lock();
        build()
    }
}

impl ComponentAdapter for Locked {
    forward_adapter!();
    forward_views!();

    fn component_instance(
        &self,
        container: &dyn Container,
        ctx: &mut ResolutionContext,
    ) -> Result<Instance> {
        self.run(&mut || self.delegate.component_instance(container, ctx))
    }

    fn descriptor(&self) -> String {
        format!("{LOCKED_PREFIX}:{}", self.delegate.descriptor())
    }

    fn accept(&self, visitor: &mut dyn ComponentVisitor) {
        visitor.visit_behavior(self);
        self.delegate.accept(visitor);
    }

    fn construction_lock(&self) -> Option<&dyn ConstructionLock> {
        Some(self)
    }
}

impl fmt::Debug for Locked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locked")
            .field("delegate", &self.delegate)
            .finish_non_exhaustive()
    }
}
