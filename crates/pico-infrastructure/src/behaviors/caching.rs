//! Caching behavior

use crate::utils::{lock_read, lock_write};
use pico_domain::constants::CACHED_PREFIX;
use pico_domain::context::ResolutionContext;
use pico_domain::error::Result;
use pico_domain::ports::{ComponentAdapter, ComponentVisitor, Container};
use pico_domain::value_objects::Instance;
use std::sync::RwLock;
use tracing::{debug, warn};

/// Stores the first instance built by the delegate and returns it thereafter
///
/// Without a [`Locked`](super::Locked) link beneath it, two threads racing on
/// the first fetch may both build; the last one stored wins. With it, the
/// store is re-checked under the construction lock so the delegate builds
/// exactly once.
#[derive(Debug)]
pub struct Cached {
    delegate: Box<dyn ComponentAdapter>,
    store: RwLock<Option<Instance>>,
}

impl Cached {
    /// Cache instances of `delegate`
    pub fn new(delegate: Box<dyn ComponentAdapter>) -> Self {
        Self {
            delegate,
            store: RwLock::new(None),
        }
    }

    fn stored(&self) -> Result<Option<Instance>> {
        Ok(lock_read(&self.store, "instance cache")?.clone())
    }

    fn build_and_store(
        &self,
        container: &dyn Container,
        ctx: &mut ResolutionContext,
    ) -> Result<Instance> {
        if let Some(instance) = self.stored()? {
            return Ok(instance);
        }
        let instance = self.delegate.component_instance(container, ctx)?;
        *lock_write(&self.store, "instance cache")? = Some(instance.clone());
        debug!(key = %self.component_key(), "instance cached");
        Ok(instance)
    }
}

impl ComponentAdapter for Cached {
    forward_adapter!();
    forward_views!();

    fn component_instance(
        &self,
        container: &dyn Container,
        ctx: &mut ResolutionContext,
    ) -> Result<Instance> {
        if let Some(instance) = self.stored()? {
            return Ok(instance);
        }
        match self.delegate.construction_lock() {
            Some(lock) => lock.run(&mut || self.build_and_store(container, ctx)),
            None => self.build_and_store(container, ctx),
        }
    }

    fn descriptor(&self) -> String {
        format!("{CACHED_PREFIX}:{}", self.delegate.descriptor())
    }

    fn accept(&self, visitor: &mut dyn ComponentVisitor) {
        visitor.visit_behavior(self);
        self.delegate.accept(visitor);
    }

    fn cached_instance(&self) -> Option<Instance> {
        self.stored().ok().flatten()
    }

    fn flush(&self) {
        match lock_write(&self.store, "instance cache") {
            Ok(mut store) => *store = None,
            Err(err) => warn!(key = %self.component_key(), error = %err, "cache flush failed"),
        }
        self.delegate.flush();
    }
}
