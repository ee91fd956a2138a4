//! Injector: the innermost adapter of every chain
//!
//! An injector selects the members to call, resolves their slots against the
//! container and builds the instance. The strategy is a tag rather than a
//! separate type per variant:
//!
//! | Kind | Construction | Members invoked |
//! |------|--------------|-----------------|
//! | `Constructor` | greediest satisfiable constructor | none |
//! | `Setter` | greediest satisfiable constructor | setters |
//! | `Method` | greediest satisfiable constructor | injection methods |
//! | `Multi` | greediest satisfiable constructor | setters, then methods |
//!
//! All slots are resolved (read only) before anything is built, so a missing
//! required dependency fails before the constructor runs.

use super::args::{Args, materialize};
use crate::constants::INJECTOR_SUFFIX;
use crate::definition::{ComponentDescriptor, ConstructorSpec, InjectionPlan, MemberSpec};
use crate::parameters::ComponentParameter;
use crate::utils::TimedOperation;
use pico_domain::context::{ResolutionContext, ScopeId};
use pico_domain::error::{Error, Result};
use pico_domain::ports::{
    ComponentAdapter, ComponentVisitor, Container, LifecycleStrategy, Parameter, Resolution,
    ResolveRequest,
};
use pico_domain::value_objects::characteristics::injection;
use pico_domain::value_objects::{
    Characteristics, ComponentKey, Instance, MemberKind, Slot, TypeInfo,
};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

static DEFAULT_PARAMETER: ComponentParameter = ComponentParameter::DEFAULT;

/// Injection strategy of an [`Injector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InjectionKind {
    /// Constructor injection
    Constructor,
    /// Setter injection
    Setter,
    /// Method injection
    Method,
    /// Constructor, then setters, then methods
    Multi,
}

impl InjectionKind {
    /// Parse the value of the `injection` characteristic
    pub fn from_name(value: &str) -> Result<Self> {
        match value {
            injection::CONSTRUCTOR => Ok(Self::Constructor),
            injection::SETTER => Ok(Self::Setter),
            injection::METHOD => Ok(Self::Method),
            injection::MULTI => Ok(Self::Multi),
            other => Err(Error::invalid_characteristic(
                "injection",
                other,
                "expected constructor, setter, method or multi",
            )),
        }
    }

    /// Strategy used when none is asked for
    pub fn adapting<C>(plan: &InjectionPlan<C>) -> Self {
        if plan.has_members() {
            Self::Multi
        } else {
            Self::Constructor
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Constructor => "Constructor",
            Self::Setter => "Setter",
            Self::Method => "Method",
            Self::Multi => "Multi",
        }
    }

    fn injects_setters(self) -> bool {
        matches!(self, Self::Setter | Self::Multi)
    }

    fn injects_methods(self) -> bool {
        matches!(self, Self::Method | Self::Multi)
    }
}

/// Outcome of resolving every slot of one member
enum SlotOutcome {
    Satisfied(Vec<Resolution>),
    Unsatisfied { dependency: String, reason: String },
}

fn parameter_at(explicit: Option<&[Arc<dyn Parameter>]>, index: usize) -> &dyn Parameter {
    match explicit.and_then(|params| params.get(index)) {
        Some(parameter) => parameter.as_ref(),
        None => &DEFAULT_PARAMETER,
    }
}

/// Raw adapter building instances of `C`
pub struct Injector<C> {
    kind: InjectionKind,
    descriptor: ComponentDescriptor,
    plan: InjectionPlan<C>,
}

impl<C: Any + Send + Sync> Injector<C> {
    /// Create an injector; at least one constructor must be declared
    pub fn new(
        kind: InjectionKind,
        descriptor: ComponentDescriptor,
        plan: InjectionPlan<C>,
    ) -> Result<Self> {
        if plan.constructors.is_empty() {
            return Err(Error::configuration(format!(
                "component '{}' declares no constructor",
                descriptor.key
            )));
        }
        Ok(Self {
            kind,
            descriptor,
            plan,
        })
    }

    /// Injection strategy
    pub fn kind(&self) -> InjectionKind {
        self.kind
    }

    fn key(&self) -> &ComponentKey {
        &self.descriptor.key
    }

    fn request<'a>(&'a self, container: &'a dyn Container, slot: &'a Slot) -> ResolveRequest<'a> {
        ResolveRequest {
            container,
            adapter: &self.descriptor.key,
            slot,
            use_names: self.descriptor.use_names,
        }
    }

    /// Explicit parameters feed the constructor unless members are injected
    fn constructor_parameters(&self) -> Option<&[Arc<dyn Parameter>]> {
        match self.kind {
            InjectionKind::Constructor | InjectionKind::Multi => self.descriptor.parameters(),
            InjectionKind::Setter | InjectionKind::Method => None,
        }
    }

    fn member_parameters(&self) -> Option<&[Arc<dyn Parameter>]> {
        match self.kind {
            InjectionKind::Setter | InjectionKind::Method => self.descriptor.parameters(),
            InjectionKind::Constructor | InjectionKind::Multi => None,
        }
    }

    fn injected_members(&self) -> Vec<&MemberSpec<C>> {
        let mut members = Vec::new();
        if self.kind.injects_setters() {
            members.extend(self.plan.setters.iter());
        }
        if self.kind.injects_methods() {
            members.extend(self.plan.methods.iter());
        }
        members
    }

    fn resolve_slots(
        &self,
        container: &dyn Container,
        slots: &[Slot],
        explicit: Option<&[Arc<dyn Parameter>]>,
        offset: usize,
    ) -> Result<SlotOutcome> {
        let mut resolutions = Vec::with_capacity(slots.len());
        for (index, slot) in slots.iter().enumerate() {
            let parameter = parameter_at(explicit, offset + index);
            let resolution = parameter.resolve(&self.request(container, slot))?;
            if let Resolution::Unsatisfied { reason } = &resolution
                && !slot.is_optional()
            {
                return Ok(SlotOutcome::Unsatisfied {
                    dependency: slot.to_string(),
                    reason: reason.clone(),
                });
            }
            resolutions.push(resolution);
        }
        Ok(SlotOutcome::Satisfied(resolutions))
    }

    /// Pick the greediest constructor whose slots can all be satisfied
    fn select_constructor(
        &self,
        container: &dyn Container,
    ) -> Result<(&ConstructorSpec<C>, Vec<Resolution>)> {
        let explicit = self.constructor_parameters();
        let mut candidates: Vec<&ConstructorSpec<C>> = self
            .plan
            .constructors
            .iter()
            .filter(|ctor| explicit.is_none_or(|params| params.len() == ctor.slots.len()))
            .collect();
        candidates.sort_by(|a, b| b.slots.len().cmp(&a.slots.len()));

        let mut chosen: Option<(&ConstructorSpec<C>, Vec<Resolution>)> = None;
        let mut rivals = 0;
        let mut first_failure: Option<(String, String)> = None;
        for ctor in candidates {
            if let Some((best, _)) = &chosen
                && ctor.slots.len() < best.slots.len()
            {
                break;
            }
            match self.resolve_slots(container, &ctor.slots, explicit, 0)? {
                SlotOutcome::Satisfied(resolutions) => {
                    if chosen.is_some() {
                        rivals += 1;
                    } else {
                        chosen = Some((ctor, resolutions));
                    }
                }
                SlotOutcome::Unsatisfied { dependency, reason } => {
                    first_failure.get_or_insert((dependency, reason));
                }
            }
        }

        match chosen {
            Some((ctor, _)) if rivals > 0 => Err(Error::AmbiguousConstructor {
                key: self.key().clone(),
                arity: ctor.slots.len(),
                count: rivals + 1,
            }),
            Some(found) => Ok(found),
            None => {
                let (dependency, reason) = first_failure.unwrap_or_else(|| {
                    (
                        "constructor".to_string(),
                        format!(
                            "no constructor takes {} explicit parameter(s)",
                            explicit.map_or(0, <[_]>::len)
                        ),
                    )
                });
                Err(Error::unsatisfiable(self.key(), dependency, reason))
            }
        }
    }

    fn resolve_members(
        &self,
        container: &dyn Container,
    ) -> Result<Vec<(&MemberSpec<C>, Vec<Resolution>)>> {
        let explicit = self.member_parameters();
        let mut offset = 0;
        let mut resolved = Vec::new();
        for member in self.injected_members() {
            match self.resolve_slots(container, &member.slots, explicit, offset)? {
                SlotOutcome::Satisfied(resolutions) => resolved.push((member, resolutions)),
                SlotOutcome::Unsatisfied { dependency, reason } => {
                    return Err(Error::unsatisfiable(self.key(), dependency, reason));
                }
            }
            offset += member.slots.len();
        }
        Ok(resolved)
    }

    fn materialize_all(
        &self,
        container: &dyn Container,
        slots: &[Slot],
        resolutions: Vec<Resolution>,
        ctx: &mut ResolutionContext,
    ) -> Result<Args> {
        let mut values = Vec::with_capacity(slots.len());
        for (slot, resolution) in slots.iter().zip(resolutions) {
            values.push(materialize(container, slot, resolution, ctx)?);
        }
        Ok(Args::new(self.key().clone(), values))
    }

    fn instantiate(&self, container: &dyn Container, ctx: &mut ResolutionContext) -> Result<Instance> {
        let key = self.key();
        let monitor = &self.descriptor.monitor;
        let (ctor, resolutions) = self.select_constructor(container)?;
        let members = self.resolve_members(container)?;

        let args = self.materialize_all(container, &ctor.slots, resolutions, ctx)?;
        let call = TimedOperation::instantiation(monitor.as_ref(), container, key, &ctor.member);
        let mut component = (ctor.build)(&args).map_err(|cause| call.instantiation_failed(cause))?;
        call.instantiated(args.len());
        debug!(key = %key, member = %ctor.member, "component instantiated");

        for (member, resolutions) in members {
            let args = self.materialize_all(container, &member.slots, resolutions, ctx)?;
            if member.member.kind() == MemberKind::Setter && args.all_absent() {
                debug!(key = %key, member = %member.member, "optional setter skipped");
                continue;
            }
            self.invoke(container, member, &mut component, &args)?;
        }

        Ok(Instance::from_parts(
            Arc::new(component),
            self.descriptor.implementation,
            Arc::clone(&self.descriptor.views),
        ))
    }

    fn invoke(
        &self,
        container: &dyn Container,
        spec: &MemberSpec<C>,
        component: &mut C,
        args: &Args,
    ) -> Result<()> {
        let key = self.key();
        let monitor = &self.descriptor.monitor;
        let call = TimedOperation::invocation(monitor.as_ref(), container, key, &spec.member);
        (spec.apply)(component, args).map_err(|cause| call.invocation_failed(cause))?;
        call.invoked();
        Ok(())
    }

    fn verify_slots(
        &self,
        container: &dyn Container,
        slots: &[Slot],
        explicit: Option<&[Arc<dyn Parameter>]>,
        offset: usize,
        ctx: &mut ResolutionContext,
    ) -> Result<()> {
        for (index, slot) in slots.iter().enumerate() {
            parameter_at(explicit, offset + index).verify(&self.request(container, slot), ctx)?;
        }
        Ok(())
    }

    fn verify_members(&self, container: &dyn Container, ctx: &mut ResolutionContext) -> Result<()> {
        let (ctor, _) = self.select_constructor(container)?;
        self.verify_slots(container, &ctor.slots, self.constructor_parameters(), 0, ctx)?;
        let explicit = self.member_parameters();
        let mut offset = 0;
        for member in self.injected_members() {
            self.verify_slots(container, &member.slots, explicit, offset, ctx)?;
            offset += member.slots.len();
        }
        Ok(())
    }
}

impl<C: Any + Send + Sync> ComponentAdapter for Injector<C> {
    fn component_key(&self) -> &ComponentKey {
        &self.descriptor.key
    }

    fn implementation(&self) -> TypeInfo {
        self.descriptor.implementation
    }

    fn exposes(&self, ty: TypeInfo) -> bool {
        self.descriptor.views.contains(ty)
    }

    fn exposed_types(&self) -> Vec<TypeInfo> {
        self.descriptor.views.types().to_vec()
    }

    fn component_instance(
        &self,
        container: &dyn Container,
        ctx: &mut ResolutionContext,
    ) -> Result<Instance> {
        let (scope, key) = (ScopeId::of(container), self.key());
        ctx.enter(scope, key)?;
        let result = self.instantiate(container, ctx);
        ctx.leave(scope, key, result.is_ok());
        result
    }

    fn verify(&self, container: &dyn Container, ctx: &mut ResolutionContext) -> Result<()> {
        let (scope, key) = (ScopeId::of(container), self.key());
        ctx.enter(scope, key)?;
        let result = self.verify_members(container, ctx);
        ctx.leave(scope, key, result.is_ok());
        result
    }

    fn descriptor(&self) -> String {
        format!("{}{INJECTOR_SUFFIX}-{}", self.kind.label(), self.key())
    }

    fn accept(&self, visitor: &mut dyn ComponentVisitor) {
        visitor.visit_adapter(self);
        if let Some(parameters) = self.descriptor.parameters() {
            for parameter in parameters {
                parameter.accept(visitor);
            }
        }
    }

    fn characteristics(&self) -> &Characteristics {
        &self.descriptor.characteristics
    }

    fn lifecycle_strategy(&self) -> Option<Arc<dyn LifecycleStrategy>> {
        self.descriptor.lifecycle.clone()
    }
}

impl<C> fmt::Debug for Injector<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("kind", &self.kind)
            .field("descriptor", &self.descriptor)
            .field("plan", &self.plan)
            .finish()
    }
}
