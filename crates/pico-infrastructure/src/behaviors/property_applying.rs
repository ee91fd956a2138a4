//! Property application

use crate::definition::PropertyFn;
use crate::utils::TimedOperation;
use pico_domain::constants::PROPERTY_APPLIED_PREFIX;
use pico_domain::context::ResolutionContext;
use pico_domain::error::{Error, Result};
use pico_domain::ports::{ComponentAdapter, ComponentMonitor, ComponentVisitor, Container};
use pico_domain::value_objects::{ComponentKey, Instance, Member};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

struct PropertyValue {
    member: Member,
    apply: PropertyFn,
    value: serde_json::Value,
}

/// Applies configured property values to every instance handed out
pub struct PropertyApplied {
    delegate: Box<dyn ComponentAdapter>,
    values: Vec<PropertyValue>,
    monitor: Arc<dyn ComponentMonitor>,
}

impl PropertyApplied {
    /// Apply `values` through the declared `appliers`
    ///
    /// Every value must name a declared property.
    pub fn new(
        delegate: Box<dyn ComponentAdapter>,
        appliers: &BTreeMap<String, PropertyFn>,
        values: BTreeMap<String, serde_json::Value>,
        monitor: Arc<dyn ComponentMonitor>,
    ) -> Result<Self> {
        let values = values
            .into_iter()
            .map(|(name, value)| match appliers.get(&name) {
                Some(apply) => Ok(PropertyValue {
                    member: Member::property(&name),
                    apply: Arc::clone(apply),
                    value,
                }),
                None => Err(Error::UnknownProperty {
                    key: delegate.component_key().clone(),
                    property: name,
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            delegate,
            values,
            monitor,
        })
    }

    fn apply(
        &self,
        container: &dyn Container,
        key: &ComponentKey,
        instance: &Instance,
        property: &PropertyValue,
    ) -> Result<()> {
        let member = &property.member;
        let call = TimedOperation::invocation(self.monitor.as_ref(), container, key, member);
        (property.apply)(instance, property.value.clone())
            .map_err(|cause| call.invocation_failed(cause))?;
        call.invoked();
        Ok(())
    }
}

impl ComponentAdapter for PropertyApplied {
    forward_adapter!();
    forward_views!();

    fn component_instance(
        &self,
        container: &dyn Container,
        ctx: &mut ResolutionContext,
    ) -> Result<Instance> {
        let instance = self.delegate.component_instance(container, ctx)?;
        let key = self.delegate.component_key();
        for property in &self.values {
            self.apply(container, key, &instance, property)?;
        }
        Ok(instance)
    }

    fn descriptor(&self) -> String {
        format!("{PROPERTY_APPLIED_PREFIX}:{}", self.delegate.descriptor())
    }

    fn accept(&self, visitor: &mut dyn ComponentVisitor) {
        visitor.visit_behavior(self);
        self.delegate.accept(visitor);
    }
}

impl fmt::Debug for PropertyApplied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyApplied")
            .field("delegate", &self.delegate)
            .field(
                "properties",
                &self
                    .values
                    .iter()
                    .map(|p| p.member.name())
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
