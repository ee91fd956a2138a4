//! Container-wide verification

use pico_domain::context::ResolutionContext;
use pico_domain::error::{Error, Result};
use pico_domain::ports::{ComponentAdapter, ComponentVisitor, Container};
use tracing::debug;

/// Verifies every adapter of each visited container, collecting failures
#[derive(Debug, Default)]
pub struct VerifyingVisitor {
    failures: Vec<Error>,
    verified: usize,
    behaviors: usize,
}

impl VerifyingVisitor {
    /// A visitor with nothing verified yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of adapter chains visited
    pub fn verified(&self) -> usize {
        self.verified
    }

    /// Number of behavior links visited
    pub fn behaviors(&self) -> usize {
        self.behaviors
    }

    /// Failures collected so far, in registration order
    pub fn failures(&self) -> &[Error] {
        &self.failures
    }

    /// `Ok` when nothing failed, otherwise every failure at once
    pub fn into_result(self) -> Result<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Verification {
                failures: self.failures,
            })
        }
    }
}

impl ComponentVisitor for VerifyingVisitor {
    fn visit_container(&mut self, container: &dyn Container) {
        for adapter in container.component_adapters() {
            let mut ctx = ResolutionContext::new();
            if let Err(err) = adapter.verify(container, &mut ctx) {
                debug!(container = container.name(), key = %adapter.component_key(), error = %err, "verification failed");
                self.failures.push(err);
            }
        }
    }

    fn visit_adapter(&mut self, _adapter: &dyn ComponentAdapter) {
        self.verified += 1;
    }

    fn visit_behavior(&mut self, _behavior: &dyn ComponentAdapter) {
        self.behaviors += 1;
    }
}
