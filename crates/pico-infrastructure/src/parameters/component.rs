//! Resolution of a slot against the container graph

use crate::injectors::defers_to;
use pico_domain::context::ResolutionContext;
use pico_domain::error::{Error, Result};
use pico_domain::ports::{
    ComponentAdapter, ComponentVisitor, Container, Parameter, Resolution, ResolveRequest,
};
use pico_domain::value_objects::ComponentKey;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    ByType,
    ByKey(ComponentKey),
}

/// Supplies a slot from an adapter registered in the container or its parents
///
/// By type, an adapter registered under the slot type itself wins over the
/// other adapters exposing that type; several of those are ambiguous. With
/// parameter names enabled, an adapter registered under the slot name and
/// exposing the slot type is tried first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentParameter {
    target: Target,
    fallback: bool,
}

impl ComponentParameter {
    /// Resolution by type, falling back to the slot default
    pub const DEFAULT: Self = Self {
        target: Target::ByType,
        fallback: true,
    };

    /// Resolution by the slot type
    pub fn by_type() -> Self {
        Self {
            target: Target::ByType,
            fallback: false,
        }
    }

    /// Resolution by an explicit key
    pub fn key<K: Into<ComponentKey>>(key: K) -> Self {
        Self {
            target: Target::ByKey(key.into()),
            fallback: false,
        }
    }

    /// Use the slot default when nothing matches
    #[must_use]
    pub fn with_default_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }

    fn find_by_key(
        container: &dyn Container,
        key: &ComponentKey,
    ) -> Option<Arc<dyn ComponentAdapter>> {
        container.local_adapter(key)
    }

    fn find_by_type(
        container: &dyn Container,
        request: &ResolveRequest<'_>,
        local: bool,
    ) -> Result<Option<Arc<dyn ComponentAdapter>>> {
        let ty = request.slot.ty();
        let excluded = |key: &ComponentKey| local && key == request.adapter;

        if request.use_names {
            let named = ComponentKey::named(request.slot.name());
            if let Some(adapter) = container.local_adapter(&named)
                && adapter.exposes(ty)
                && !excluded(&named)
            {
                return Ok(Some(adapter));
            }
        }

        let exact = ComponentKey::Type(ty);
        if !excluded(&exact)
            && let Some(adapter) = container.local_adapter(&exact)
        {
            return Ok(Some(adapter));
        }

        let mut candidates: Vec<_> = container
            .component_adapters()
            .into_iter()
            .filter(|adapter| adapter.exposes(ty) && !excluded(adapter.component_key()))
            .collect();
        match candidates.len() {
            0 => Ok(None),
            1 => Ok(candidates.pop()),
            _ => Err(Error::ambiguous(
                request.adapter,
                ty.short_name(),
                candidates
                    .iter()
                    .map(|adapter| adapter.component_key().clone())
                    .collect(),
            )),
        }
    }

    fn search(&self, request: &ResolveRequest<'_>) -> Result<Resolution> {
        let mut scope: Option<Arc<dyn Container>> = None;
        loop {
            let container: &dyn Container = scope.as_deref().unwrap_or(request.container);
            let found = match &self.target {
                Target::ByType => Self::find_by_type(container, request, scope.is_none())?,
                Target::ByKey(key) => Self::find_by_key(container, key),
            };
            if let Some(adapter) = found {
                return Ok(Resolution::Adapter {
                    adapter,
                    owner: scope,
                });
            }
            match container.parent() {
                Some(parent) => scope = Some(parent),
                None => break,
            }
        }

        if self.fallback
            && let Some(default) = request.slot.default_value()
        {
            return Ok(Resolution::Value(default));
        }
        Ok(Resolution::unsatisfied(match &self.target {
            Target::ByType => format!("no component exposes {}", request.slot.ty()),
            Target::ByKey(key) => format!("no component is registered under '{key}'"),
        }))
    }
}

impl Default for ComponentParameter {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Parameter for ComponentParameter {
    fn resolve(&self, request: &ResolveRequest<'_>) -> Result<Resolution> {
        let resolution = self.search(request)?;
        if let Resolution::Adapter { adapter, .. } = &resolution
            && !adapter.exposes(request.slot.ty())
        {
            return Ok(Resolution::unsatisfied(format!(
                "'{}' does not expose {}",
                adapter.component_key(),
                request.slot.ty()
            )));
        }
        Ok(resolution)
    }

    fn verify(&self, request: &ResolveRequest<'_>, ctx: &mut ResolutionContext) -> Result<()> {
        match self.resolve(request)? {
            Resolution::Value(_) => Ok(()),
            Resolution::Adapter { adapter, owner } => {
                let scope: &dyn Container = owner.as_deref().unwrap_or(request.container);
                if defers_to(request.slot, scope, adapter.as_ref(), ctx) {
                    return Ok(());
                }
                adapter.verify(scope, ctx)
            }
            Resolution::Unsatisfied { .. } if request.slot.is_optional() => Ok(()),
            Resolution::Unsatisfied { reason } => Err(Error::unsatisfiable(
                request.adapter,
                request.slot.to_string(),
                reason,
            )),
        }
    }

    fn accept(&self, visitor: &mut dyn ComponentVisitor) {
        visitor.visit_parameter(self);
    }
}
