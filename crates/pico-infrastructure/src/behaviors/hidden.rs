//! Implementation hiding

use pico_domain::constants::HIDDEN_PREFIX;
use pico_domain::context::ResolutionContext;
use pico_domain::error::{Error, Result};
use pico_domain::ports::{ComponentAdapter, ComponentVisitor, Container};
use pico_domain::value_objects::{Instance, TypeInfo};

/// Hands out instances that can no longer be viewed as their implementation
///
/// Every declared interface stays reachable; only the concrete type view is
/// dropped. Lifecycle and caching below this link still see the full
/// instance.
#[derive(Debug)]
pub struct HiddenImplementation {
    delegate: Box<dyn ComponentAdapter>,
    exposed: Vec<TypeInfo>,
}

impl HiddenImplementation {
    /// Hide the implementation of `delegate`; it must expose an interface
    pub fn new(delegate: Box<dyn ComponentAdapter>) -> Result<Self> {
        let implementation = delegate.implementation();
        let exposed: Vec<TypeInfo> = delegate
            .exposed_types()
            .into_iter()
            .filter(|ty| *ty != implementation)
            .collect();
        if exposed.is_empty() {
            return Err(Error::configuration(format!(
                "hide-impl on '{}' requires at least one exposed interface",
                delegate.component_key()
            )));
        }
        Ok(Self { delegate, exposed })
    }
}

impl ComponentAdapter for HiddenImplementation {
    forward_adapter!();

    fn exposes(&self, ty: TypeInfo) -> bool {
        self.exposed.contains(&ty)
    }

    fn exposed_types(&self) -> Vec<TypeInfo> {
        self.exposed.clone()
    }

    fn component_instance(
        &self,
        container: &dyn Container,
        ctx: &mut ResolutionContext,
    ) -> Result<Instance> {
        let instance = self.delegate.component_instance(container, ctx)?;
        Ok(instance.restricted(&self.exposed))
    }

    fn descriptor(&self) -> String {
        format!("{HIDDEN_PREFIX}:{}", self.delegate.descriptor())
    }

    fn accept(&self, visitor: &mut dyn ComponentVisitor) {
        visitor.visit_behavior(self);
        self.delegate.accept(visitor);
    }
}
