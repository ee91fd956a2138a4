//! Literal slot values

use pico_domain::context::ResolutionContext;
use pico_domain::error::{Error, Result};
use pico_domain::ports::{ComponentVisitor, Parameter, Resolution, ResolveRequest};
use pico_domain::value_objects::Instance;
use std::any::Any;

/// Supplies a slot with a fixed value, bypassing the container
#[derive(Debug, Clone)]
pub struct ConstantParameter {
    value: Instance,
}

impl ConstantParameter {
    /// A constant exposing only its concrete type
    pub fn new<V: Any + Send + Sync>(value: V) -> Self {
        Self {
            value: Instance::new(value),
        }
    }

    /// A constant with prepared views, e.g. a trait object
    pub fn from_instance(value: Instance) -> Self {
        Self { value }
    }

    /// The supplied value
    pub fn value(&self) -> &Instance {
        &self.value
    }
}

impl Parameter for ConstantParameter {
    fn resolve(&self, request: &ResolveRequest<'_>) -> Result<Resolution> {
        if self.value.exposes(request.slot.ty()) {
            Ok(Resolution::Value(self.value.clone()))
        } else {
            Ok(Resolution::unsatisfied(format!(
                "constant {} does not expose {}",
                self.value.implementation(),
                request.slot.ty()
            )))
        }
    }

    fn verify(&self, request: &ResolveRequest<'_>, _ctx: &mut ResolutionContext) -> Result<()> {
        match self.resolve(request)? {
            Resolution::Unsatisfied { reason } => Err(Error::unsatisfiable(
                request.adapter,
                request.slot.to_string(),
                reason,
            )),
            _ => Ok(()),
        }
    }

    fn accept(&self, visitor: &mut dyn ComponentVisitor) {
        visitor.visit_parameter(self);
    }
}
