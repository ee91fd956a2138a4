//! Lifecycle ports
//!
//! The container only talks to a [`LifecycleStrategy`]. Components opt into
//! the stock strategy by exposing themselves as [`Startable`] and/or
//! [`Disposable`].

use crate::error::BoxError;
use crate::value_objects::Instance;
use std::fmt;

/// A component that can be started and stopped
pub trait Startable: Send + Sync {
    /// Called when the container starts
    fn start(&self) -> Result<(), BoxError>;

    /// Called when the container stops
    fn stop(&self) -> Result<(), BoxError>;
}

/// A component holding resources released on disposal
pub trait Disposable: Send + Sync {
    /// Called when the container is disposed
    fn dispose(&self) -> Result<(), BoxError>;
}

/// Mechanics of start, stop and dispose for built instances
pub trait LifecycleStrategy: Send + Sync + fmt::Debug {
    /// Whether the instance takes part in the lifecycle at all
    fn has_lifecycle(&self, instance: &Instance) -> bool;

    /// Start the instance
    fn start(&self, instance: &Instance) -> Result<(), BoxError>;

    /// Stop the instance
    fn stop(&self, instance: &Instance) -> Result<(), BoxError>;

    /// Dispose the instance
    fn dispose(&self, instance: &Instance) -> Result<(), BoxError>;
}
