//! Adapter for values built outside the container

use pico_domain::constants::INSTANCE_PREFIX;
use pico_domain::context::ResolutionContext;
use pico_domain::error::Result;
use pico_domain::ports::{ComponentAdapter, ComponentVisitor, Container, LifecycleStrategy};
use pico_domain::value_objects::{Characteristics, ComponentKey, Instance, TypeInfo};
use std::sync::Arc;

/// Always returns the value it was registered with
///
/// The value counts as cached, so it takes part in start, stop and dispose
/// like any instance the container built itself.
#[derive(Debug)]
pub struct InstanceAdapter {
    key: ComponentKey,
    instance: Instance,
    characteristics: Characteristics,
    lifecycle: Option<Arc<dyn LifecycleStrategy>>,
}

impl InstanceAdapter {
    /// Register `instance` under `key`
    pub fn new<K: Into<ComponentKey>>(key: K, instance: Instance) -> Self {
        Self {
            key: key.into(),
            instance,
            characteristics: Characteristics::new(),
            lifecycle: None,
        }
    }

    /// Use a dedicated lifecycle strategy for this value
    #[must_use]
    pub fn with_lifecycle(mut self, strategy: Arc<dyn LifecycleStrategy>) -> Self {
        self.lifecycle = Some(strategy);
        self
    }

    /// Record characteristics for diagnostics
    #[must_use]
    pub fn with_characteristics(mut self, characteristics: Characteristics) -> Self {
        self.characteristics = characteristics;
        self
    }
}

impl ComponentAdapter for InstanceAdapter {
    fn component_key(&self) -> &ComponentKey {
        &self.key
    }

    fn implementation(&self) -> TypeInfo {
        self.instance.implementation()
    }

    fn exposes(&self, ty: TypeInfo) -> bool {
        self.instance.exposes(ty)
    }

    fn exposed_types(&self) -> Vec<TypeInfo> {
        self.instance.exposed_types().to_vec()
    }

    fn component_instance(
        &self,
        _container: &dyn Container,
        _ctx: &mut ResolutionContext,
    ) -> Result<Instance> {
        Ok(self.instance.clone())
    }

    fn verify(&self, _container: &dyn Container, _ctx: &mut ResolutionContext) -> Result<()> {
        Ok(())
    }

    fn descriptor(&self) -> String {
        format!("{INSTANCE_PREFIX}-{}", self.key)
    }

    fn accept(&self, visitor: &mut dyn ComponentVisitor) {
        visitor.visit_adapter(self);
    }

    fn characteristics(&self) -> &Characteristics {
        &self.characteristics
    }

    fn lifecycle_strategy(&self) -> Option<Arc<dyn LifecycleStrategy>> {
        self.lifecycle.clone()
    }

    fn cached_instance(&self) -> Option<Instance> {
        Some(self.instance.clone())
    }
}
