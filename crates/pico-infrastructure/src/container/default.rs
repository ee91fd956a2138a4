//! The default container
//!
//! Holds the registry, resolves keys and types against it and its parents,
//! and sequences start, stop and dispose over the instances it has cached.
//!
//! ```text
//! Constructed ──start──▶ Started ──stop──▶ Stopped ──dispose──▶ Disposed
//!                          ▲                  │
//!                          └──────start───────┘
//! ```
//!
//! Start order is the order in which cached instances were completed, so
//! dependencies always start before their dependents. Stop and dispose run in
//! strict reverse order and are best effort: every component is attempted and
//! the failures are reported together afterwards.

use super::builder::ContainerBuilder;
use super::registry::Registry;
use super::visitor::VerifyingVisitor;
use crate::adapters::InstanceAdapter;
use crate::behaviors::BehaviorChain;
use crate::config::ContainerConfig;
use crate::definition::ComponentDefinition;
use crate::utils::{lock_mutex, lock_read, lock_write};
use pico_domain::context::{ResolutionContext, ScopeId};
use pico_domain::error::{BoxError, Error, LifecycleFailure, Result};
use pico_domain::ports::{
    ComponentAdapter, ComponentMonitor, ComponentVisitor, Container, LifecycleStrategy,
};
use pico_domain::value_objects::{ComponentKey, Instance, LifecyclePhase, TypeInfo};
use std::any::Any;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock, Weak};
use tracing::{debug, info, warn};

/// Lifecycle state of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerState {
    /// Built, never started
    Constructed,
    /// Started and not yet stopped
    Started,
    /// Stopped; may be started again
    Stopped,
    /// Disposed; terminal
    Disposed,
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Constructed => "constructed",
            Self::Started => "started",
            Self::Stopped => "stopped",
            Self::Disposed => "disposed",
        })
    }
}

/// A started instance together with the strategy that started it
#[derive(Debug, Clone)]
struct StartedComponent {
    key: ComponentKey,
    instance: Instance,
    strategy: Arc<dyn LifecycleStrategy>,
}

/// Lifecycle bookkeeping: state, creation order and what is running
#[derive(Debug)]
struct LifecycleBook {
    state: ContainerState,
    created: Vec<ComponentKey>,
    started: Vec<StartedComponent>,
}

/// Registry plus resolution and lifecycle root
///
/// Built through [`ContainerBuilder`]; always lives behind an `Arc` so that
/// children can refer back to it.
pub struct DefaultContainer {
    name: String,
    config: ContainerConfig,
    chain: BehaviorChain,
    parent: Option<Arc<dyn Container>>,
    self_ref: Weak<DefaultContainer>,
    registry: RwLock<Registry>,
    monitor: Arc<dyn ComponentMonitor>,
    lifecycle: Arc<dyn LifecycleStrategy>,
    book: Mutex<LifecycleBook>,
    children: RwLock<Vec<Weak<DefaultContainer>>>,
}

impl DefaultContainer {
    pub(crate) fn new(
        self_ref: Weak<DefaultContainer>,
        config: ContainerConfig,
        parent: Option<Arc<dyn Container>>,
        monitor: Arc<dyn ComponentMonitor>,
        lifecycle: Arc<dyn LifecycleStrategy>,
    ) -> Self {
        Self {
            name: config.name.clone(),
            chain: BehaviorChain::from_config(&config),
            config,
            parent,
            self_ref,
            registry: RwLock::new(Registry::default()),
            monitor,
            lifecycle,
            book: Mutex::new(LifecycleBook {
                state: ContainerState::Constructed,
                created: Vec::new(),
                started: Vec::new(),
            }),
            children: RwLock::new(Vec::new()),
        }
    }

    /// Configuration the container was built from
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> Result<ContainerState> {
        Ok(lock_mutex(&self.book, "lifecycle")?.state)
    }

    /// Number of locally registered components
    pub fn len(&self) -> Result<usize> {
        Ok(lock_read(&self.registry, "registry")?.len())
    }

    /// Whether nothing is registered locally
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    // Registration

    /// Register a component built from `definition`
    ///
    /// The adapter chain is assembled here, once, from the effective
    /// characteristics.
    pub fn add_component<C: Any + Send + Sync>(
        &self,
        definition: ComponentDefinition<C>,
    ) -> Result<Arc<dyn ComponentAdapter>> {
        let adapter: Arc<dyn ComponentAdapter> =
            Arc::from(self.chain.assemble(definition, &self.monitor)?);
        self.add_adapter(Arc::clone(&adapter))?;
        Ok(adapter)
    }

    /// Register a ready-made adapter
    pub fn add_adapter(&self, adapter: Arc<dyn ComponentAdapter>) -> Result<()> {
        let key = adapter.component_key().clone();
        let descriptor = adapter.descriptor();
        lock_write(&self.registry, "registry")?.insert(adapter, &self.name)?;
        debug!(container = %self.name, key = %key, descriptor = %descriptor, "component registered");
        Ok(())
    }

    /// Register an already built value under `key`
    ///
    /// The value takes part in the lifecycle from the moment it is added.
    pub fn add_instance<K: Into<ComponentKey>>(&self, key: K, instance: Instance) -> Result<()> {
        let adapter = InstanceAdapter::new(key, instance);
        let key = adapter.component_key().clone();
        self.add_adapter(Arc::new(adapter))?;
        self.record_creation(&key)
    }

    /// Register a plain value exposing only its own type
    pub fn add_value<K, V>(&self, key: K, value: V) -> Result<()>
    where
        K: Into<ComponentKey>,
        V: Any + Send + Sync,
    {
        self.add_instance(key, Instance::new(value))
    }

    /// Unregister `key`, returning its adapter
    ///
    /// Refused while the container is started.
    pub fn remove_component<K: Into<ComponentKey>>(
        &self,
        key: K,
    ) -> Result<Option<Arc<dyn ComponentAdapter>>> {
        let key = key.into();
        let mut book = lock_mutex(&self.book, "lifecycle")?;
        if book.state == ContainerState::Started {
            return Err(Error::RegistryLocked {
                container: self.name.clone(),
                operation: "remove".to_string(),
                key,
            });
        }
        let removed = lock_write(&self.registry, "registry")?.remove(&key);
        if removed.is_some() {
            book.created.retain(|created| created != &key);
            debug!(container = %self.name, key = %key, "component removed");
        }
        Ok(removed)
    }

    // Resolution

    /// Instance registered under `key`, here or in a parent
    pub fn component_instance<K: Into<ComponentKey>>(&self, key: K) -> Result<Instance> {
        let key = key.into();
        let mut ctx = ResolutionContext::new();
        if let Some(instance) = self.find_instance(&key, &mut ctx)? {
            return Ok(instance);
        }
        self.monitor
            .no_component_found(self, &key)
            .ok_or_else(|| Error::not_found(key))
    }

    /// Instance registered under `key`, viewed as `T`
    pub fn get<T: ?Sized + Send + Sync + 'static>(
        &self,
        key: impl Into<ComponentKey>,
    ) -> Result<Arc<T>> {
        let key = key.into();
        let instance = self.component_instance(key.clone())?;
        instance
            .get::<T>()
            .ok_or_else(|| Error::type_mismatch(&key, std::any::type_name::<T>()))
    }

    /// The single instance exposing `T`, here or in a parent
    pub fn get_by_type<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let ty = TypeInfo::of::<T>();
        let key = ComponentKey::Type(ty);
        let mut ctx = ResolutionContext::new();
        let instance = match self.find_instance_of_type(ty, &mut ctx)? {
            Some(instance) => instance,
            None => self
                .monitor
                .no_component_found(self, &key)
                .ok_or_else(|| Error::not_found(key.clone()))?,
        };
        instance
            .get::<T>()
            .ok_or_else(|| Error::type_mismatch(&key, ty.short_name()))
    }

    /// Adapter exposing `ty`, here or in a parent
    ///
    /// Several local adapters exposing `ty` are an error rather than a choice.
    pub fn component_adapter_of_type(
        &self,
        ty: TypeInfo,
    ) -> Result<Option<Arc<dyn ComponentAdapter>>> {
        if let Some(adapter) = self.local_adapter_of_type(ty)? {
            return Ok(Some(adapter));
        }
        let mut scope = self.parent.clone();
        while let Some(container) = scope {
            if let Some(adapter) = container.local_adapter_of_type(ty)? {
                return Ok(Some(adapter));
            }
            scope = container.parent();
        }
        Ok(None)
    }

    /// Check every local component without instantiating anything
    pub fn verify(&self) -> Result<()> {
        let mut visitor = VerifyingVisitor::new();
        self.accept(&mut visitor);
        debug!(container = %self.name, verified = visitor.verified(), failures = visitor.failures().len(), "verification finished");
        visitor.into_result()
    }

    /// Visit this container and every adapter chain in registration order
    pub fn accept(&self, visitor: &mut dyn ComponentVisitor) {
        visitor.visit_container(self);
        for adapter in self.component_adapters() {
            adapter.accept(visitor);
        }
    }

    // Nesting

    /// A child container resolving through this one
    ///
    /// The child shares this container's configuration, monitor and
    /// lifecycle strategy and follows its start, stop and dispose.
    pub fn make_child(&self) -> Result<Arc<DefaultContainer>> {
        let parent = self
            .self_ref
            .upgrade()
            .ok_or_else(|| Error::internal(format!("container '{}' is being dropped", self.name)))?;
        let index = lock_read(&self.children, "children")?.len();
        let config = ContainerConfig {
            name: format!("{}/{index}", self.name),
            ..self.config.clone()
        };
        ContainerBuilder::new()
            .with_config(config)
            .with_monitor(Arc::clone(&self.monitor))
            .with_lifecycle_strategy(Arc::clone(&self.lifecycle))
            .with_parent(&parent)
            .build()
    }

    pub(crate) fn adopt(&self, child: &Arc<DefaultContainer>) -> Result<()> {
        let mut children = lock_write(&self.children, "children")?;
        children.retain(|weak| weak.strong_count() > 0);
        children.push(Arc::downgrade(child));
        Ok(())
    }

    /// Children that are still alive, in creation order
    pub fn live_children(&self) -> Result<Vec<Arc<DefaultContainer>>> {
        Ok(lock_read(&self.children, "children")?
            .iter()
            .filter_map(Weak::upgrade)
            .collect())
    }

    // Lifecycle

    /// Instantiate automatic components, start cached instances, then children
    ///
    /// The first failure aborts the remaining starts. Components already
    /// running from an earlier failed call are not started again.
    pub fn start(&self) -> Result<()> {
        self.check_state(LifecyclePhase::Start, |state| {
            matches!(state, ContainerState::Constructed | ContainerState::Stopped)
        })?;

        for adapter in self.component_adapters() {
            if adapter.is_automatic() {
                let mut ctx = ResolutionContext::new();
                self.resolve_adapter(adapter.as_ref(), &mut ctx)?;
            }
        }

        let (created, running) = {
            let book = lock_mutex(&self.book, "lifecycle")?;
            let running: Vec<ComponentKey> =
                book.started.iter().map(|started| started.key.clone()).collect();
            (book.created.clone(), running)
        };
        for key in created {
            if running.contains(&key) {
                continue;
            }
            let Some((instance, strategy)) = self.lifecycle_target(&key) else {
                continue;
            };
            if let Err(cause) = strategy.start(&instance) {
                self.monitor
                    .lifecycle_invocation_failed(self, &key, LifecyclePhase::Start, &cause);
                return Err(Error::LifecycleStart { key, source: cause });
            }
            debug!(container = %self.name, key = %key, "component started");
            lock_mutex(&self.book, "lifecycle")?
                .started
                .push(StartedComponent {
                    key,
                    instance,
                    strategy,
                });
        }

        for child in self.live_children()? {
            if matches!(
                child.state()?,
                ContainerState::Constructed | ContainerState::Stopped
            ) {
                child.start()?;
            }
        }

        let mut book = lock_mutex(&self.book, "lifecycle")?;
        book.state = ContainerState::Started;
        info!(container = %self.name, started = book.started.len(), "container started");
        Ok(())
    }

    /// Stop children, then every started instance in reverse start order
    pub fn stop(&self) -> Result<()> {
        self.check_state(LifecyclePhase::Stop, |state| {
            state == ContainerState::Started
        })?;
        let failures = self.stop_all()?;
        lock_mutex(&self.book, "lifecycle")?.state = ContainerState::Stopped;
        info!(container = %self.name, failures = failures.len(), "container stopped");
        lifecycle_result(LifecyclePhase::Stop, failures)
    }

    /// Stop if needed, dispose children, then dispose cached instances in
    /// reverse creation order and drop every cache
    pub fn dispose(&self) -> Result<()> {
        self.check_state(LifecyclePhase::Dispose, |state| {
            state != ContainerState::Disposed
        })?;
        let mut failures = self.stop_all()?;

        for child in self.live_children()? {
            if child.state()? != ContainerState::Disposed {
                collect_child_failures(&child, child.dispose(), &mut failures);
            }
        }

        let created = lock_mutex(&self.book, "lifecycle")?.created.clone();
        for key in created.iter().rev() {
            let Some((instance, strategy)) = self.lifecycle_target(key) else {
                continue;
            };
            if let Err(cause) = strategy.dispose(&instance) {
                failures.push(self.lifecycle_failure(key, LifecyclePhase::Dispose, &cause));
            }
        }

        for adapter in self.component_adapters() {
            adapter.flush();
        }

        let mut book = lock_mutex(&self.book, "lifecycle")?;
        book.created.clear();
        book.state = ContainerState::Disposed;
        info!(container = %self.name, failures = failures.len(), "container disposed");
        lifecycle_result(LifecyclePhase::Dispose, failures)
    }

    fn stop_all(&self) -> Result<Vec<LifecycleFailure>> {
        let mut failures = Vec::new();
        for child in self.live_children()? {
            if child.state()? == ContainerState::Started {
                collect_child_failures(&child, child.stop(), &mut failures);
            }
        }
        let started = std::mem::take(&mut lock_mutex(&self.book, "lifecycle")?.started);
        for component in started.iter().rev() {
            if let Err(cause) = component.strategy.stop(&component.instance) {
                failures.push(self.lifecycle_failure(
                    &component.key,
                    LifecyclePhase::Stop,
                    &cause,
                ));
            } else {
                debug!(container = %self.name, key = %component.key, "component stopped");
            }
        }
        Ok(failures)
    }

    fn lifecycle_failure(
        &self,
        key: &ComponentKey,
        phase: LifecyclePhase,
        cause: &BoxError,
    ) -> LifecycleFailure {
        self.monitor
            .lifecycle_invocation_failed(self, key, phase, cause);
        warn!(container = %self.name, key = %key, phase = %phase, error = %cause, "lifecycle call failed");
        LifecycleFailure {
            key: key.clone(),
            message: cause.to_string(),
        }
    }

    /// Cached instance of `key` and the strategy driving it, when it has a lifecycle
    fn lifecycle_target(
        &self,
        key: &ComponentKey,
    ) -> Option<(Instance, Arc<dyn LifecycleStrategy>)> {
        let adapter = self.local_adapter(key)?;
        let instance = adapter.cached_instance()?;
        let strategy = adapter
            .lifecycle_strategy()
            .unwrap_or_else(|| Arc::clone(&self.lifecycle));
        strategy
            .has_lifecycle(&instance)
            .then_some((instance, strategy))
    }

    fn check_state(
        &self,
        operation: LifecyclePhase,
        allowed: impl Fn(ContainerState) -> bool,
    ) -> Result<()> {
        let state = self.state()?;
        if allowed(state) {
            Ok(())
        } else {
            Err(Error::InvalidLifecycleState {
                container: self.name.clone(),
                operation,
                state: state.to_string(),
            })
        }
    }

    fn record_creation(&self, key: &ComponentKey) -> Result<()> {
        let mut book = lock_mutex(&self.book, "lifecycle")?;
        if !book.created.contains(key) {
            book.created.push(key.clone());
        }
        Ok(())
    }
}

fn collect_child_failures(
    child: &DefaultContainer,
    outcome: Result<()>,
    failures: &mut Vec<LifecycleFailure>,
) {
    match outcome {
        Ok(()) => {}
        Err(Error::Lifecycle {
            failures: nested, ..
        }) => failures.extend(nested),
        Err(other) => failures.push(LifecycleFailure {
            key: ComponentKey::named(child.name()),
            message: other.to_string(),
        }),
    }
}

fn lifecycle_result(phase: LifecyclePhase, failures: Vec<LifecycleFailure>) -> Result<()> {
    if failures.is_empty() {
        Ok(())
    } else {
        Err(Error::Lifecycle { phase, failures })
    }
}

impl Container for DefaultContainer {
    fn name(&self) -> &str {
        &self.name
    }

    fn parent(&self) -> Option<Arc<dyn Container>> {
        self.parent.clone()
    }

    fn monitor(&self) -> Arc<dyn ComponentMonitor> {
        Arc::clone(&self.monitor)
    }

    fn local_adapter(&self, key: &ComponentKey) -> Option<Arc<dyn ComponentAdapter>> {
        match lock_read(&self.registry, "registry") {
            Ok(registry) => registry.get(key),
            Err(err) => {
                warn!(container = %self.name, error = %err, "registry unavailable");
                None
            }
        }
    }

    fn component_adapters(&self) -> Vec<Arc<dyn ComponentAdapter>> {
        match lock_read(&self.registry, "registry") {
            Ok(registry) => registry.adapters(),
            Err(err) => {
                warn!(container = %self.name, error = %err, "registry unavailable");
                Vec::new()
            }
        }
    }

    fn resolve_adapter(
        &self,
        adapter: &dyn ComponentAdapter,
        ctx: &mut ResolutionContext,
    ) -> Result<Instance> {
        let instance = adapter.component_instance(self, ctx)?;
        let key = adapter.component_key();
        ctx.complete(ScopeId::of(self), key, &instance);
        if adapter.cached_instance().is_some() {
            self.record_creation(key)?;
        }
        Ok(instance)
    }
}

impl fmt::Debug for DefaultContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultContainer")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name().to_string()))
            .field("chain", &self.chain)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}
