//! Shared fixtures: a small car/engine graph, a lifecycle journal and a
//! recording monitor

#![allow(dead_code)]

use pico_domain::error::{BoxError, Error};
use pico_domain::ports::{ComponentMonitor, Container, Disposable, Startable};
use pico_domain::value_objects::{ComponentKey, Instance, LifecyclePhase, Member, Slot};
use pico_infrastructure::container::{ContainerBuilder, DefaultContainer};
use pico_infrastructure::definition::ComponentDefinition;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub trait Engine: Send + Sync {
    fn power(&self) -> u32;
}

#[derive(Debug, Default)]
pub struct V8;

impl Engine for V8 {
    fn power(&self) -> u32 {
        8
    }
}

#[derive(Debug, Default)]
pub struct V6;

impl Engine for V6 {
    fn power(&self) -> u32 {
        6
    }
}

pub struct Car {
    pub engine: Arc<dyn Engine>,
}

pub fn v8() -> ComponentDefinition<V8> {
    ComponentDefinition::<V8>::new()
        .default_constructor()
        .expose::<dyn Engine>(|engine| engine)
}

pub fn v6() -> ComponentDefinition<V6> {
    ComponentDefinition::<V6>::new()
        .default_constructor()
        .expose::<dyn Engine>(|engine| engine)
}

pub fn car() -> ComponentDefinition<Car> {
    ComponentDefinition::<Car>::new().constructor([Slot::of::<dyn Engine>("engine")], |args| {
        Ok(Car {
            engine: args.get::<dyn Engine>(0)?,
        })
    })
}

pub fn container() -> Arc<DefaultContainer> {
    ContainerBuilder::new().build().unwrap()
}

/// Ordered record of lifecycle calls
#[derive(Debug, Default)]
pub struct Journal {
    entries: Mutex<Vec<String>>,
}

impl Journal {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record(&self, entry: String) {
        self.entries.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn starting_with(&self, prefix: &str) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.starts_with(prefix))
            .collect()
    }
}

/// Lifecycle-aware component writing to a journal
pub struct Service {
    pub name: &'static str,
    pub journal: Arc<Journal>,
    pub fail_on: Option<LifecyclePhase>,
}

impl Service {
    fn call(&self, phase: LifecyclePhase) -> Result<(), BoxError> {
        self.journal.record(format!("{phase} {}", self.name));
        if self.fail_on == Some(phase) {
            return Err(format!("{} refused to {phase}", self.name).into());
        }
        Ok(())
    }
}

impl Startable for Service {
    fn start(&self) -> Result<(), BoxError> {
        self.call(LifecyclePhase::Start)
    }

    fn stop(&self) -> Result<(), BoxError> {
        self.call(LifecyclePhase::Stop)
    }
}

impl Disposable for Service {
    fn dispose(&self) -> Result<(), BoxError> {
        self.call(LifecyclePhase::Dispose)
    }
}

/// A startable service keyed by `name`, depending on the named services in `deps`
pub fn service(
    name: &'static str,
    deps: &[&'static str],
    journal: &Arc<Journal>,
    fail_on: Option<LifecyclePhase>,
) -> ComponentDefinition<Service> {
    let journal = Arc::clone(journal);
    let parameters = deps
        .iter()
        .map(|dep| {
            Arc::new(pico_infrastructure::parameters::ComponentParameter::key(*dep))
                as Arc<dyn pico_domain::ports::Parameter>
        })
        .collect::<Vec<_>>();
    let slots = deps
        .iter()
        .map(|dep| Slot::of::<Service>(dep))
        .collect::<Vec<_>>();
    let arity = slots.len();
    ComponentDefinition::<Service>::new()
        .key(name)
        .constructor(slots, move |args| {
            for index in 0..arity {
                args.get::<Service>(index)?;
            }
            Ok(Service {
                name,
                journal: Arc::clone(&journal),
                fail_on,
            })
        })
        .parameters(parameters)
        .startable()
        .disposable()
}

/// Monitor recording every event as a short string
#[derive(Debug, Default)]
pub struct RecordingMonitor {
    events: Mutex<Vec<String>>,
    substitute: Option<Instance>,
    pub instantiations: AtomicUsize,
}

impl RecordingMonitor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn substituting(instance: Instance) -> Arc<Self> {
        Arc::new(Self {
            substitute: Some(instance),
            ..Self::default()
        })
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ComponentMonitor for RecordingMonitor {
    fn instantiating(&self, _container: &dyn Container, key: &ComponentKey, member: &Member) {
        self.push(format!("instantiating {key} {member}"));
    }

    fn instantiated(
        &self,
        _container: &dyn Container,
        key: &ComponentKey,
        member: &Member,
        injected: usize,
        _duration: Duration,
    ) {
        self.instantiations.fetch_add(1, Ordering::SeqCst);
        self.push(format!("instantiated {key} {member} injected={injected}"));
    }

    fn instantiation_failed(
        &self,
        _container: &dyn Container,
        key: &ComponentKey,
        member: &Member,
        error: Error,
    ) -> Error {
        self.push(format!("instantiation failed {key} {member}"));
        error
    }

    fn invoking(&self, _container: &dyn Container, key: &ComponentKey, member: &Member) {
        self.push(format!("invoking {key} {member}"));
    }

    fn invoked(
        &self,
        _container: &dyn Container,
        key: &ComponentKey,
        member: &Member,
        _duration: Duration,
    ) {
        self.push(format!("invoked {key} {member}"));
    }

    fn invocation_failed(
        &self,
        _container: &dyn Container,
        key: &ComponentKey,
        member: &Member,
        error: Error,
    ) -> Error {
        self.push(format!("invocation failed {key} {member}"));
        error
    }

    fn lifecycle_invocation_failed(
        &self,
        _container: &dyn Container,
        key: &ComponentKey,
        phase: LifecyclePhase,
        _error: &BoxError,
    ) {
        self.push(format!("lifecycle failed {key} {phase}"));
    }

    fn no_component_found(&self, _container: &dyn Container, key: &ComponentKey) -> Option<Instance> {
        self.push(format!("no component {key}"));
        self.substitute.clone()
    }
}
