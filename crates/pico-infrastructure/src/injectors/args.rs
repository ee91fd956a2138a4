//! Arguments handed to constructors, setters and injection methods

use pico_domain::context::{ResolutionContext, ScopeId};
use pico_domain::error::{Error, Result};
use pico_domain::ports::{ComponentAdapter, Container, Resolution};
use pico_domain::value_objects::characteristics::names;
use pico_domain::value_objects::{ComponentKey, Deferred, DeferredCell, Instance, Slot};
use std::sync::{Arc, OnceLock};

/// One materialized slot value
#[derive(Debug, Clone)]
pub enum Argument {
    /// A built dependency or literal
    Value(Instance),
    /// A handle filled now or once a circular dependency completes
    Deferred(DeferredCell),
    /// An optional slot nothing could satisfy
    Absent,
}

/// Positional arguments of one member invocation
#[derive(Debug, Clone)]
pub struct Args {
    key: ComponentKey,
    values: Vec<Argument>,
}

impl Args {
    /// Arguments for the component registered under `key`
    pub fn new(key: ComponentKey, values: Vec<Argument>) -> Self {
        Self { key, values }
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no arguments
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether every argument is absent
    pub fn all_absent(&self) -> bool {
        self.values.iter().all(|v| matches!(v, Argument::Absent))
    }

    /// Raw argument at `index`
    pub fn argument(&self, index: usize) -> Option<&Argument> {
        self.values.get(index)
    }

    /// Required dependency at `index`, viewed as `T`
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self, index: usize) -> Result<Arc<T>> {
        match self.values.get(index) {
            Some(Argument::Value(instance)) => self.view(instance),
            Some(Argument::Deferred(cell)) => match cell.get() {
                Some(instance) => self.view(instance),
                None => Err(Error::unsatisfiable(
                    &self.key,
                    format!("argument {index}"),
                    "circular dependency is still under construction; declare the slot deferred",
                )),
            },
            Some(Argument::Absent) | None => Err(Error::unsatisfiable(
                &self.key,
                format!("argument {index}"),
                "no value supplied",
            )),
        }
    }

    /// Optional dependency at `index`, viewed as `T`
    pub fn optional<T: ?Sized + Send + Sync + 'static>(&self, index: usize) -> Result<Option<Arc<T>>> {
        match self.values.get(index) {
            Some(Argument::Absent) | None => Ok(None),
            Some(_) => self.get(index).map(Some),
        }
    }

    /// Deferred dependency at `index`
    pub fn deferred<T: ?Sized + Send + Sync + 'static>(&self, index: usize) -> Result<Deferred<T>> {
        match self.values.get(index) {
            Some(Argument::Deferred(cell)) => Ok(Deferred::new(Arc::clone(cell))),
            Some(Argument::Value(instance)) => Ok(Deferred::new(filled(instance.clone()))),
            Some(Argument::Absent) | None => Err(Error::unsatisfiable(
                &self.key,
                format!("argument {index}"),
                "no value supplied",
            )),
        }
    }

    /// Clone of the value at `index`
    pub fn cloned<T: Clone + Send + Sync + 'static>(&self, index: usize) -> Result<T> {
        let value = self.get::<T>(index)?;
        Ok(T::clone(&value))
    }

    fn view<T: ?Sized + Send + Sync + 'static>(&self, instance: &Instance) -> Result<Arc<T>> {
        instance
            .get::<T>()
            .ok_or_else(|| Error::type_mismatch(&self.key, std::any::type_name::<T>()))
    }
}

fn filled(instance: Instance) -> DeferredCell {
    let cell = OnceLock::new();
    let _ = cell.set(instance);
    Arc::new(cell)
}

/// Whether a deferred slot may take an unfilled handle to `adapter`
///
/// True when the target, as registered in `scope`, is on the current
/// resolution stack and opted into circular references.
pub(crate) fn defers_to(
    slot: &Slot,
    scope: &dyn Container,
    adapter: &dyn ComponentAdapter,
    ctx: &ResolutionContext,
) -> bool {
    slot.is_deferred()
        && ctx.is_resolving(ScopeId::of(scope), adapter.component_key())
        && adapter
            .characteristics()
            .is_enabled(names::ENABLE_CIRCULAR)
}

/// Turn a read-only resolution into a value, building adapters as needed
pub(crate) fn materialize(
    container: &dyn Container,
    slot: &Slot,
    resolution: Resolution,
    ctx: &mut ResolutionContext,
) -> Result<Argument> {
    match resolution {
        Resolution::Value(instance) if slot.is_deferred() => {
            Ok(Argument::Deferred(filled(instance)))
        }
        Resolution::Value(instance) => Ok(Argument::Value(instance)),
        Resolution::Adapter { adapter, owner } => {
            let scope: &dyn Container = owner.as_deref().unwrap_or(container);
            if defers_to(slot, scope, adapter.as_ref(), ctx) {
                return Ok(Argument::Deferred(
                    ctx.defer(ScopeId::of(scope), adapter.component_key()),
                ));
            }
            let instance = scope.resolve_adapter(adapter.as_ref(), ctx)?;
            if slot.is_deferred() {
                Ok(Argument::Deferred(filled(instance)))
            } else {
                Ok(Argument::Value(instance))
            }
        }
        Resolution::Unsatisfied { .. } => Ok(Argument::Absent),
    }
}
