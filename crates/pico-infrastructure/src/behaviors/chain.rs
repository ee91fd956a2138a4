//! Adapter chain assembly

use super::{Automated, Cached, HiddenImplementation, Locked, PropertyApplied};
use crate::config::{ComponentConfig, ContainerConfig};
use crate::definition::{ComponentDefinition, ComponentDescriptor};
use crate::injectors::{InjectionKind, Injector};
use pico_domain::error::{Error, Result};
use pico_domain::ports::{ComponentAdapter, ComponentMonitor};
use pico_domain::value_objects::characteristics::names;
use pico_domain::value_objects::{Characteristics, TypeInfo};
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Assembles adapter chains from characteristics
///
/// Effective characteristics are the container defaults, overlaid with the
/// definition's own, overlaid with the per-component configuration. A `none`
/// switch anywhere in the latter two drops the container defaults. Every
/// switch present must be consumed; leftovers fail the registration.
#[derive(Debug, Clone, Default)]
pub struct BehaviorChain {
    defaults: Characteristics,
    components: BTreeMap<String, ComponentConfig>,
}

impl BehaviorChain {
    /// A chain builder using `defaults` for every component
    pub fn new(defaults: Characteristics) -> Self {
        Self {
            defaults,
            components: BTreeMap::new(),
        }
    }

    /// A chain builder reading defaults and per-component overrides from `config`
    pub fn from_config(config: &ContainerConfig) -> Self {
        Self {
            defaults: config.default_characteristics(),
            components: config.components.clone(),
        }
    }

    /// Container-wide defaults
    pub fn defaults(&self) -> &Characteristics {
        &self.defaults
    }

    /// Effective characteristics for a component
    pub fn effective(&self, key: &str, requested: &Characteristics) -> Characteristics {
        let configured = self
            .components
            .get(key)
            .map(ComponentConfig::characteristics)
            .unwrap_or_default();
        let explicit = requested.overlay(&configured);
        if explicit.contains(names::NONE) {
            explicit
        } else {
            self.defaults.overlay(&explicit)
        }
    }

    /// Build the adapter chain for `definition`
    pub fn assemble<C: Any + Send + Sync>(
        &self,
        definition: ComponentDefinition<C>,
        monitor: &Arc<dyn ComponentMonitor>,
    ) -> Result<Box<dyn ComponentAdapter>> {
        let ComponentDefinition {
            key,
            views,
            plan,
            parameters,
            characteristics,
            properties,
            mut property_values,
            lifecycle,
            monitor: own_monitor,
        } = definition;

        let rendered_key = key.to_string();
        let effective = self.effective(&rendered_key, &characteristics);
        if let Some(configured) = self.components.get(&rendered_key) {
            property_values.extend(configured.properties.clone());
        }

        let mut reader = effective.reader();
        reader.value(names::NONE);
        let kind = match reader.value(names::INJECTION).map(str::to_owned) {
            Some(value) => InjectionKind::from_name(&value)?,
            None => InjectionKind::adapting(&plan),
        };
        let use_names = reader.flag_or(names::USE_NAMES, false)?;
        // enable-circular is read again from the chain characteristics while resolving
        reader.flag(names::ENABLE_CIRCULAR)?;
        let locking = reader.flag_or(names::LOCKING, false)?;
        let synchronizing = reader.flag_or(names::SYNCHRONIZING, false)?;
        let caching = reader.flag_or(names::CACHE, false)?;
        let property_applying = reader
            .flag(names::PROPERTY_APPLYING)?
            .unwrap_or(!property_values.is_empty());
        let automatic = reader.flag_or(names::AUTOMATIC, false)?;
        let hide_impl = reader.flag_or(names::HIDE_IMPL, false)?;

        let unprocessed = reader.unprocessed();
        if !unprocessed.is_empty() {
            return Err(Error::UnprocessedCharacteristics {
                key,
                names: unprocessed,
            });
        }

        let monitor = own_monitor.unwrap_or_else(|| Arc::clone(monitor));
        let descriptor = ComponentDescriptor {
            key,
            implementation: TypeInfo::of::<C>(),
            views: Arc::new(views),
            parameters,
            characteristics: effective,
            monitor: Arc::clone(&monitor),
            lifecycle,
            use_names,
        };

        let mut adapter: Box<dyn ComponentAdapter> =
            Box::new(Injector::new(kind, descriptor, plan)?);
        if locking || synchronizing {
            adapter = Box::new(Locked::new(adapter));
        }
        if caching {
            adapter = Box::new(Cached::new(adapter));
        }
        if property_applying {
            adapter = Box::new(PropertyApplied::new(
                adapter,
                &properties,
                property_values,
                monitor,
            )?);
        }
        if automatic {
            adapter = Box::new(Automated::new(adapter));
        }
        if hide_impl {
            adapter = Box::new(HiddenImplementation::new(adapter)?);
        }

        debug!(
            key = %adapter.component_key(),
            descriptor = %adapter.descriptor(),
            "adapter chain assembled"
        );
        Ok(adapter)
    }
}
