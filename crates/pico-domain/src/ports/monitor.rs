//! Component monitor port
//!
//! Side channel notified around every instantiation and member invocation.
//! A monitor may replace the error of a failed step but is never needed for
//! correct resolution; the default method bodies form a complete no-op.

use super::container::Container;
use crate::error::{BoxError, Error};
use crate::value_objects::{ComponentKey, Instance, LifecyclePhase, Member};
use std::fmt;
use std::time::Duration;

/// Observer of construction and invocation events
#[allow(unused_variables)]
pub trait ComponentMonitor: Send + Sync + fmt::Debug {
    /// A constructor is about to run
    fn instantiating(&self, container: &dyn Container, key: &ComponentKey, member: &Member) {}

    /// A constructor returned
    fn instantiated(
        &self,
        container: &dyn Container,
        key: &ComponentKey,
        member: &Member,
        injected: usize,
        duration: Duration,
    ) {
    }

    /// A constructor failed; the returned error replaces `error`
    fn instantiation_failed(
        &self,
        container: &dyn Container,
        key: &ComponentKey,
        member: &Member,
        error: Error,
    ) -> Error {
        error
    }

    /// A setter, method or property applier is about to run
    fn invoking(&self, container: &dyn Container, key: &ComponentKey, member: &Member) {}

    /// A setter, method or property applier returned
    fn invoked(
        &self,
        container: &dyn Container,
        key: &ComponentKey,
        member: &Member,
        duration: Duration,
    ) {
    }

    /// A setter, method or property applier failed; the returned error replaces `error`
    fn invocation_failed(
        &self,
        container: &dyn Container,
        key: &ComponentKey,
        member: &Member,
        error: Error,
    ) -> Error {
        error
    }

    /// A start, stop or dispose call failed
    fn lifecycle_invocation_failed(
        &self,
        container: &dyn Container,
        key: &ComponentKey,
        phase: LifecyclePhase,
        error: &BoxError,
    ) {
    }

    /// Nothing is registered under `key`; a returned instance is used instead
    fn no_component_found(&self, container: &dyn Container, key: &ComponentKey) -> Option<Instance> {
        None
    }
}
