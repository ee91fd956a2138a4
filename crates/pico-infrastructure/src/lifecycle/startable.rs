//! Lifecycle through the `Startable` and `Disposable` capabilities

use pico_domain::error::BoxError;
use pico_domain::ports::{Disposable, LifecycleStrategy, Startable};
use pico_domain::value_objects::{Instance, TypeInfo};

/// Drives instances that expose [`Startable`] and/or [`Disposable`]
///
/// Instances exposing neither are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct StartableLifecycleStrategy;

impl LifecycleStrategy for StartableLifecycleStrategy {
    fn has_lifecycle(&self, instance: &Instance) -> bool {
        instance.exposes(TypeInfo::of::<dyn Startable>())
            || instance.exposes(TypeInfo::of::<dyn Disposable>())
    }

    fn start(&self, instance: &Instance) -> Result<(), BoxError> {
        match instance.get::<dyn Startable>() {
            Some(startable) => startable.start(),
            None => Ok(()),
        }
    }

    fn stop(&self, instance: &Instance) -> Result<(), BoxError> {
        match instance.get::<dyn Startable>() {
            Some(startable) => startable.stop(),
            None => Ok(()),
        }
    }

    fn dispose(&self, instance: &Instance) -> Result<(), BoxError> {
        match instance.get::<dyn Disposable>() {
            Some(disposable) => disposable.dispose(),
            None => Ok(()),
        }
    }
}

/// Treats every instance as lifecycle-free
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLifecycleStrategy;

impl LifecycleStrategy for NullLifecycleStrategy {
    fn has_lifecycle(&self, _instance: &Instance) -> bool {
        false
    }

    fn start(&self, _instance: &Instance) -> Result<(), BoxError> {
        Ok(())
    }

    fn stop(&self, _instance: &Instance) -> Result<(), BoxError> {
        Ok(())
    }

    fn dispose(&self, _instance: &Instance) -> Result<(), BoxError> {
        Ok(())
    }
}
