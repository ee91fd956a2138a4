//! Monitor reporting through `tracing`

use super::NullComponentMonitor;
use pico_domain::error::{BoxError, Error};
use pico_domain::ports::{ComponentMonitor, Container};
use pico_domain::value_objects::{ComponentKey, Instance, LifecyclePhase, Member};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Reports every event as a structured `tracing` event, then forwards it
///
/// Replacement errors and substitute instances come from the delegate.
#[derive(Debug, Clone)]
pub struct TracingComponentMonitor {
    delegate: Arc<dyn ComponentMonitor>,
}

impl TracingComponentMonitor {
    /// A monitor forwarding to [`NullComponentMonitor`]
    pub fn new() -> Self {
        Self::with_delegate(Arc::new(NullComponentMonitor))
    }

    /// A monitor forwarding to `delegate`
    pub fn with_delegate(delegate: Arc<dyn ComponentMonitor>) -> Self {
        Self { delegate }
    }
}

impl Default for TracingComponentMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentMonitor for TracingComponentMonitor {
    fn instantiating(&self, container: &dyn Container, key: &ComponentKey, member: &Member) {
        trace!(container = container.name(), key = %key, member = %member, "instantiating");
        self.delegate.instantiating(container, key, member);
    }

    fn instantiated(
        &self,
        container: &dyn Container,
        key: &ComponentKey,
        member: &Member,
        injected: usize,
        duration: Duration,
    ) {
        debug!(
            container = container.name(),
            key = %key,
            member = %member,
            injected,
            duration_ms = duration.as_millis(),
            "instantiated"
        );
        self.delegate
            .instantiated(container, key, member, injected, duration);
    }

    fn instantiation_failed(
        &self,
        container: &dyn Container,
        key: &ComponentKey,
        member: &Member,
        error: Error,
    ) -> Error {
        warn!(container = container.name(), key = %key, member = %member, error = %error, "instantiation failed");
        self.delegate
            .instantiation_failed(container, key, member, error)
    }

    fn invoking(&self, container: &dyn Container, key: &ComponentKey, member: &Member) {
        trace!(container = container.name(), key = %key, member = %member, "invoking");
        self.delegate.invoking(container, key, member);
    }

    fn invoked(
        &self,
        container: &dyn Container,
        key: &ComponentKey,
        member: &Member,
        duration: Duration,
    ) {
        debug!(
            container = container.name(),
            key = %key,
            member = %member,
            duration_ms = duration.as_millis(),
            "invoked"
        );
        self.delegate.invoked(container, key, member, duration);
    }

    fn invocation_failed(
        &self,
        container: &dyn Container,
        key: &ComponentKey,
        member: &Member,
        error: Error,
    ) -> Error {
        warn!(container = container.name(), key = %key, member = %member, error = %error, "invocation failed");
        self.delegate
            .invocation_failed(container, key, member, error)
    }

    fn lifecycle_invocation_failed(
        &self,
        container: &dyn Container,
        key: &ComponentKey,
        phase: LifecyclePhase,
        error: &BoxError,
    ) {
        warn!(container = container.name(), key = %key, phase = %phase, error = %error, "lifecycle invocation failed");
        self.delegate
            .lifecycle_invocation_failed(container, key, phase, error);
    }

    fn no_component_found(&self, container: &dyn Container, key: &ComponentKey) -> Option<Instance> {
        debug!(container = container.name(), key = %key, "no component found");
        self.delegate.no_component_found(container, key)
    }
}
