//! Container port
//!
//! The read side of a container as seen by adapters and parameters during
//! resolution. Registration and lifecycle live on the concrete container.

use super::adapter::ComponentAdapter;
use super::monitor::ComponentMonitor;
use crate::context::ResolutionContext;
use crate::error::{Error, Result};
use crate::value_objects::{ComponentKey, Instance, TypeInfo};
use std::fmt;
use std::sync::Arc;

/// Registry and resolution root
pub trait Container: Send + Sync + fmt::Debug {
    /// Container name, used in diagnostics
    fn name(&self) -> &str;

    /// Parent container, if nested
    fn parent(&self) -> Option<Arc<dyn Container>>;

    /// Monitor notified about container-level events
    fn monitor(&self) -> Arc<dyn ComponentMonitor>;

    /// Adapter registered locally under `key`
    fn local_adapter(&self, key: &ComponentKey) -> Option<Arc<dyn ComponentAdapter>>;

    /// Local adapters in registration order
    fn component_adapters(&self) -> Vec<Arc<dyn ComponentAdapter>>;

    /// Instantiate an adapter owned by this container
    ///
    /// Dependencies of the adapter are resolved against this container,
    /// never against a child that happened to ask for it.
    fn resolve_adapter(
        &self,
        adapter: &dyn ComponentAdapter,
        ctx: &mut ResolutionContext,
    ) -> Result<Instance>;

    /// Adapter for `key`, here or in the parent chain
    fn component_adapter(&self, key: &ComponentKey) -> Option<Arc<dyn ComponentAdapter>> {
        self.local_adapter(key)
            .or_else(|| self.parent().and_then(|parent| parent.component_adapter(key)))
    }

    /// Local adapter exposing `ty`
    ///
    /// An adapter keyed by the type itself wins; otherwise exactly one
    /// adapter may expose the type.
    fn local_adapter_of_type(&self, ty: TypeInfo) -> Result<Option<Arc<dyn ComponentAdapter>>> {
        if let Some(adapter) = self.local_adapter(&ComponentKey::Type(ty)) {
            return Ok(Some(adapter));
        }
        let mut found: Vec<_> = self
            .component_adapters()
            .into_iter()
            .filter(|adapter| adapter.exposes(ty))
            .collect();
        match found.len() {
            0 => Ok(None),
            1 => Ok(found.pop()),
            _ => Err(Error::ambiguous(
                &ComponentKey::Type(ty),
                ty.short_name(),
                found.iter().map(|a| a.component_key().clone()).collect(),
            )),
        }
    }

    /// Resolve `key` here, falling back to the parent chain
    fn find_instance(
        &self,
        key: &ComponentKey,
        ctx: &mut ResolutionContext,
    ) -> Result<Option<Instance>> {
        if let Some(adapter) = self.local_adapter(key) {
            return self.resolve_adapter(adapter.as_ref(), ctx).map(Some);
        }
        match self.parent() {
            Some(parent) => parent.find_instance(key, ctx),
            None => Ok(None),
        }
    }

    /// Resolve the single component exposing `ty`, falling back to the parent chain
    fn find_instance_of_type(
        &self,
        ty: TypeInfo,
        ctx: &mut ResolutionContext,
    ) -> Result<Option<Instance>> {
        if let Some(adapter) = self.local_adapter_of_type(ty)? {
            return self.resolve_adapter(adapter.as_ref(), ctx).map(Some);
        }
        match self.parent() {
            Some(parent) => parent.find_instance_of_type(ty, ctx),
            None => Ok(None),
        }
    }
}
