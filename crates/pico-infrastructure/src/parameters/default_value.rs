//! Slot defaults

use pico_domain::context::ResolutionContext;
use pico_domain::error::{Error, Result};
use pico_domain::ports::{ComponentVisitor, Parameter, Resolution, ResolveRequest};

/// Supplies a slot with the default declared on the slot itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultValueParameter;

impl Parameter for DefaultValueParameter {
    fn resolve(&self, request: &ResolveRequest<'_>) -> Result<Resolution> {
        Ok(match request.slot.default_value() {
            Some(value) => Resolution::Value(value),
            None => Resolution::unsatisfied("slot declares no default value"),
        })
    }

    fn verify(&self, request: &ResolveRequest<'_>, _ctx: &mut ResolutionContext) -> Result<()> {
        if request.slot.has_default() || request.slot.is_optional() {
            Ok(())
        } else {
            Err(Error::unsatisfiable(
                request.adapter,
                request.slot.to_string(),
                "slot declares no default value",
            ))
        }
    }

    fn accept(&self, visitor: &mut dyn ComponentVisitor) {
        visitor.visit_parameter(self);
    }
}
