//! Container construction

use super::default::DefaultContainer;
use crate::config::ContainerConfig;
use crate::config::loader::validate_config;
use crate::lifecycle::StartableLifecycleStrategy;
use crate::monitors::{NullComponentMonitor, TracingComponentMonitor};
use pico_domain::error::Result;
use pico_domain::ports::{ComponentMonitor, Container, LifecycleStrategy};
use std::sync::Arc;
use tracing::debug;

/// Builder for [`DefaultContainer`]
///
/// Defaults: [`ContainerConfig::default`] (caching on),
/// [`StartableLifecycleStrategy`], and [`NullComponentMonitor`] unless the
/// configuration asks for component events, which selects
/// [`TracingComponentMonitor`].
#[derive(Debug, Default)]
pub struct ContainerBuilder {
    config: ContainerConfig,
    monitor: Option<Arc<dyn ComponentMonitor>>,
    lifecycle: Option<Arc<dyn LifecycleStrategy>>,
    parent: Option<Arc<DefaultContainer>>,
}

impl ContainerBuilder {
    /// A builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a loaded or built configuration
    #[must_use]
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the container name
    #[must_use]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the monitor handed to every adapter
    #[must_use]
    pub fn with_monitor(mut self, monitor: Arc<dyn ComponentMonitor>) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Set the default lifecycle strategy
    #[must_use]
    pub fn with_lifecycle_strategy(mut self, strategy: Arc<dyn LifecycleStrategy>) -> Self {
        self.lifecycle = Some(strategy);
        self
    }

    /// Nest the container under `parent`
    #[must_use]
    pub fn with_parent(mut self, parent: &Arc<DefaultContainer>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    /// Validate the configuration and build the container
    pub fn build(self) -> Result<Arc<DefaultContainer>> {
        validate_config(&self.config)?;
        let monitor: Arc<dyn ComponentMonitor> = match self.monitor {
            Some(monitor) => monitor,
            None if self.config.logging.component_events => {
                Arc::new(TracingComponentMonitor::new())
            }
            None => Arc::new(NullComponentMonitor),
        };
        let lifecycle = self
            .lifecycle
            .unwrap_or_else(|| Arc::new(StartableLifecycleStrategy));
        let parent = self
            .parent
            .as_ref()
            .map(|parent| Arc::clone(parent) as Arc<dyn Container>);
        let config = self.config;
        let container = Arc::new_cyclic(|self_ref| {
            DefaultContainer::new(self_ref.clone(), config, parent, monitor, lifecycle)
        });
        if let Some(parent) = &self.parent {
            parent.adopt(&container)?;
        }
        debug!(
            container = container.name(),
            parent = ?self.parent.as_ref().map(|p| p.name().to_string()),
            "container built"
        );
        Ok(container)
    }
}
