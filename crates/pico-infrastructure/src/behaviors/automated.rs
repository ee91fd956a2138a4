//! Automatic instantiation on start

use pico_domain::constants::AUTOMATED_PREFIX;
use pico_domain::context::ResolutionContext;
use pico_domain::error::Result;
use pico_domain::ports::{ComponentAdapter, ComponentVisitor, Container};
use pico_domain::value_objects::Instance;

/// Marks a component to be instantiated when its container starts
#[derive(Debug)]
pub struct Automated {
    delegate: Box<dyn ComponentAdapter>,
}

impl Automated {
    /// Instantiate `delegate` on start
    pub fn new(delegate: Box<dyn ComponentAdapter>) -> Self {
        Self { delegate }
    }
}

impl ComponentAdapter for Automated {
    forward_adapter!();
    forward_views!();

    fn component_instance(
        &self,
        container: &dyn Container,
        ctx: &mut ResolutionContext,
    ) -> Result<Instance> {
        self.delegate.component_instance(container, ctx)
    }

    fn descriptor(&self) -> String {
        format!("{AUTOMATED_PREFIX}:{}", self.delegate.descriptor())
    }

    fn accept(&self, visitor: &mut dyn ComponentVisitor) {
        visitor.visit_behavior(self);
        self.delegate.accept(visitor);
    }

    fn is_automatic(&self) -> bool {
        true
    }
}
