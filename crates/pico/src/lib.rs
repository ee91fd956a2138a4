//! # Pico Container
//!
//! A small inversion-of-control container. Components are registered with
//! explicit definitions, wired through constructor, setter or method
//! injection, decorated with behaviors chosen by characteristics, and driven
//! through a start/stop/dispose lifecycle.
//!
//! ## Example
//!
//! ```ignore
//! use pico::prelude::*;
//! use std::sync::Arc;
//!
//! trait Engine: Send + Sync {}
//! #[derive(Default)]
//! struct V8;
//! impl Engine for V8 {}
//! struct Car { engine: Arc<dyn Engine> }
//!
//! let container = ContainerBuilder::new().build()?;
//! container.add_component(
//!     ComponentDefinition::<V8>::new()
//!         .default_constructor()
//!         .expose::<dyn Engine>(|engine| engine),
//! )?;
//! container.add_component(
//!     ComponentDefinition::<Car>::new()
//!         .constructor([Slot::of::<dyn Engine>("engine")], |args| {
//!             Ok(Car { engine: args.get::<dyn Engine>(0)? })
//!         }),
//! )?;
//! let car = container.get::<Car>(ComponentKey::of::<Car>())?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Error taxonomy, value objects and port traits
//! - `infrastructure` - Definitions, parameters, injectors, behaviors,
//!   the default container, monitors, configuration and logging

use pico_infrastructure::config::ConfigLoader;
use std::sync::Arc;
use tracing::info;

/// Domain layer - keys, instances, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use pico_domain::*;
}

/// Infrastructure layer - container, injection and ambient stack
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use pico_infrastructure::*;
}

/// Everything needed to define components and build containers
pub mod prelude {
    pub use pico_domain::error::{BoxError, Error, Result};
    pub use pico_domain::ports::{
        ComponentAdapter, ComponentMonitor, Container, Disposable, LifecycleStrategy, Parameter,
        Startable,
    };
    pub use pico_domain::value_objects::characteristics::{
        AUTOMATIC, CACHE, CDI, ENABLE_CIRCULAR, HIDE_IMPL, LOCK, METHOD_INJECTION,
        MULTI_INJECTION, NO_CACHE, NO_PROPERTY_APPLYING, NONE, PROPERTY_APPLYING, SDI,
        SYNCHRONIZE, USE_NAMES,
    };
    pub use pico_domain::value_objects::{
        Characteristic, Characteristics, ComponentKey, Deferred, Instance, Slot, TypeInfo,
    };
    pub use pico_infrastructure::container::{ContainerBuilder, ContainerState, DefaultContainer};
    pub use pico_infrastructure::definition::ComponentDefinition;
    pub use pico_infrastructure::parameters::{
        ComponentParameter, ConstantParameter, DefaultValueParameter,
    };
}

// Re-export commonly used types at the crate root
pub use domain::{BoxError, Error, Result};
pub use infrastructure::{ComponentDefinition, ContainerBuilder, DefaultContainer};

/// Load configuration through `loader` and build a root container from it
///
/// Installing a subscriber is left to the caller (see
/// [`infrastructure::logging::init_logging`]); `logging.component_events`
/// decides whether component events reach it.
pub fn bootstrap(loader: &ConfigLoader) -> Result<Arc<DefaultContainer>> {
    let config = loader.load()?;
    let container = ContainerBuilder::new().with_config(config).build()?;
    info!(container = %container.config().name, "container bootstrapped");
    Ok(container)
}
