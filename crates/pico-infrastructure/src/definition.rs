//! Component definitions
//!
//! A [`ComponentDefinition`] is the explicit, registration-time description of
//! how to build one component: its constructors, setters and injection
//! methods with their declared slots, the interfaces it exposes, the
//! properties it accepts and the characteristics it asks for. Nothing is
//! discovered at runtime.
//!
//! ```ignore
//! let car = ComponentDefinition::<Car>::new()
//!     .constructor([Slot::of::<dyn Engine>("engine")], |args| {
//!         Ok(Car { engine: args.get::<dyn Engine>(0)? })
//!     })
//!     .expose::<dyn Vehicle>(|car| car)
//!     .startable();
//! container.add_component(car)?;
//! ```

use crate::injectors::Args;
use pico_domain::error::{BoxError, Error};
use pico_domain::ports::{
    ComponentMonitor, Disposable, LifecycleStrategy, Parameter, Startable,
};
use pico_domain::value_objects::{
    Characteristic, Characteristics, ComponentKey, Instance, Member, Slot, TypeInfo, ViewTable,
};
use serde::de::DeserializeOwned;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub(crate) type BuildFn<C> = Box<dyn Fn(&Args) -> Result<C, BoxError> + Send + Sync>;
pub(crate) type MemberFn<C> = Box<dyn Fn(&mut C, &Args) -> Result<(), BoxError> + Send + Sync>;

/// Applies one JSON property value to a built instance
pub type PropertyFn = Arc<dyn Fn(&Instance, serde_json::Value) -> Result<(), BoxError> + Send + Sync>;

/// One declared constructor
pub struct ConstructorSpec<C> {
    pub(crate) member: Member,
    pub(crate) slots: Vec<Slot>,
    pub(crate) build: BuildFn<C>,
}

/// One declared setter or injection method
pub struct MemberSpec<C> {
    pub(crate) member: Member,
    pub(crate) slots: Vec<Slot>,
    pub(crate) apply: MemberFn<C>,
}

/// Every injection member of a component, in declaration order
pub struct InjectionPlan<C> {
    pub(crate) constructors: Vec<ConstructorSpec<C>>,
    pub(crate) setters: Vec<MemberSpec<C>>,
    pub(crate) methods: Vec<MemberSpec<C>>,
}

impl<C> InjectionPlan<C> {
    fn new() -> Self {
        Self {
            constructors: Vec::new(),
            setters: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Whether any setter or injection method is declared
    pub fn has_members(&self) -> bool {
        !self.setters.is_empty() || !self.methods.is_empty()
    }
}

impl<C> fmt::Debug for InjectionPlan<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |members: &[MemberSpec<C>]| {
            members
                .iter()
                .map(|m| m.member.to_string())
                .collect::<Vec<_>>()
        };
        f.debug_struct("InjectionPlan")
            .field(
                "constructors",
                &self
                    .constructors
                    .iter()
                    .map(|c| c.slots.len())
                    .collect::<Vec<_>>(),
            )
            .field("setters", &names(&self.setters))
            .field("methods", &names(&self.methods))
            .finish()
    }
}

/// Builder describing how to construct and wire a component of type `C`
pub struct ComponentDefinition<C> {
    pub(crate) key: ComponentKey,
    pub(crate) views: ViewTable,
    pub(crate) plan: InjectionPlan<C>,
    pub(crate) parameters: Option<Vec<Arc<dyn Parameter>>>,
    pub(crate) characteristics: Characteristics,
    pub(crate) properties: BTreeMap<String, PropertyFn>,
    pub(crate) property_values: BTreeMap<String, serde_json::Value>,
    pub(crate) lifecycle: Option<Arc<dyn LifecycleStrategy>>,
    pub(crate) monitor: Option<Arc<dyn ComponentMonitor>>,
}

impl<C: Any + Send + Sync> ComponentDefinition<C> {
    /// A definition keyed by `C` itself
    pub fn new() -> Self {
        Self {
            key: ComponentKey::of::<C>(),
            views: ViewTable::concrete::<C>(),
            plan: InjectionPlan::new(),
            parameters: None,
            characteristics: Characteristics::new(),
            properties: BTreeMap::new(),
            property_values: BTreeMap::new(),
            lifecycle: None,
            monitor: None,
        }
    }

    /// Register under `key` instead of the implementation type
    #[must_use]
    pub fn key<K: Into<ComponentKey>>(mut self, key: K) -> Self {
        self.key = key.into();
        self
    }

    /// Declare a constructor taking `slots`
    #[must_use]
    pub fn constructor<S, F>(mut self, slots: S, build: F) -> Self
    where
        S: IntoIterator<Item = Slot>,
        F: Fn(&Args) -> Result<C, BoxError> + Send + Sync + 'static,
    {
        let slots: Vec<Slot> = slots.into_iter().collect();
        self.plan.constructors.push(ConstructorSpec {
            member: Member::constructor(slots.len()),
            slots,
            build: Box::new(build),
        });
        self
    }

    /// Declare a required setter for a dependency of type `T`
    #[must_use]
    pub fn setter<T, F>(self, name: &str, apply: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&mut C, Arc<T>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.push_setter(Slot::of::<T>(name), apply)
    }

    /// Declare a setter skipped when nothing provides `T`
    #[must_use]
    pub fn optional_setter<T, F>(self, name: &str, apply: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&mut C, Arc<T>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.push_setter(Slot::optional::<T>(name), apply)
    }

    fn push_setter<T, F>(mut self, slot: Slot, apply: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&mut C, Arc<T>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let member = Member::setter(slot.name());
        self.plan.setters.push(MemberSpec {
            member,
            slots: vec![slot],
            apply: Box::new(move |component: &mut C, args: &Args| -> Result<(), BoxError> {
                let dependency = args.get::<T>(0)?;
                apply(component, dependency)
            }),
        });
        self
    }

    /// Declare an injection method taking `slots`
    #[must_use]
    pub fn method<S, F>(mut self, name: &str, slots: S, apply: F) -> Self
    where
        S: IntoIterator<Item = Slot>,
        F: Fn(&mut C, &Args) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let slots: Vec<Slot> = slots.into_iter().collect();
        self.plan.methods.push(MemberSpec {
            member: Member::method(name, slots.len()),
            slots,
            apply: Box::new(apply),
        });
        self
    }

    /// Expose instances as `T` through `cast`
    #[must_use]
    pub fn expose<T>(mut self, cast: fn(Arc<C>) -> Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.views.insert(cast);
        self
    }

    /// Declare a property applier; values arrive as JSON and are deserialized into `V`
    #[must_use]
    pub fn property<V, F>(mut self, name: &str, apply: F) -> Self
    where
        V: DeserializeOwned + 'static,
        F: Fn(&C, V) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let applier: PropertyFn = Arc::new(
            move |instance: &Instance, value: serde_json::Value| -> Result<(), BoxError> {
                let target = instance.get::<C>().ok_or_else(|| {
                    Error::internal(format!(
                        "property target is not a {}",
                        TypeInfo::of::<C>().short_name()
                    ))
                })?;
                let value: V = serde_json::from_value(value)?;
                apply(&target, value)
            },
        );
        self.properties.insert(name.to_string(), applier);
        self
    }

    /// Supply a value for a declared property
    #[must_use]
    pub fn with_property<S: Into<String>>(mut self, name: S, value: serde_json::Value) -> Self {
        self.property_values.insert(name.into(), value);
        self
    }

    /// Supply explicit parameters, replacing resolution by type
    #[must_use]
    pub fn parameters<I>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Parameter>>,
    {
        self.parameters = Some(parameters.into_iter().collect());
        self
    }

    /// Append one explicit parameter
    #[must_use]
    pub fn parameter<P: Parameter + 'static>(mut self, parameter: P) -> Self {
        self.parameters
            .get_or_insert_with(Vec::new)
            .push(Arc::new(parameter));
        self
    }

    /// Ask for a characteristic, overriding the container default
    #[must_use]
    pub fn with(mut self, characteristic: Characteristic) -> Self {
        self.characteristics = self.characteristics.with(characteristic);
        self
    }

    /// Ask for a set of characteristics
    #[must_use]
    pub fn with_characteristics(mut self, characteristics: &Characteristics) -> Self {
        self.characteristics = self.characteristics.overlay(characteristics);
        self
    }

    /// Use a dedicated lifecycle strategy for this component
    #[must_use]
    pub fn lifecycle(mut self, strategy: Arc<dyn LifecycleStrategy>) -> Self {
        self.lifecycle = Some(strategy);
        self
    }

    /// Use a dedicated monitor for this component
    #[must_use]
    pub fn monitor(mut self, monitor: Arc<dyn ComponentMonitor>) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Key the component will be registered under
    pub fn component_key(&self) -> &ComponentKey {
        &self.key
    }
}

impl<C: Any + Send + Sync + Default> ComponentDefinition<C> {
    /// Declare the no-argument constructor `C::default()`
    #[must_use]
    pub fn default_constructor(self) -> Self {
        self.constructor([], |_| Ok(C::default()))
    }
}

impl<C: Startable + 'static> ComponentDefinition<C> {
    /// Take part in start and stop
    #[must_use]
    pub fn startable(mut self) -> Self {
        self.views.insert::<C, dyn Startable>(|component| component);
        self
    }
}

impl<C: Disposable + 'static> ComponentDefinition<C> {
    /// Take part in dispose
    #[must_use]
    pub fn disposable(mut self) -> Self {
        self.views.insert::<C, dyn Disposable>(|component| component);
        self
    }
}

impl<C: Any + Send + Sync> Default for ComponentDefinition<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ComponentDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("key", &self.key)
            .field("views", &self.views)
            .field("plan", &self.plan)
            .field("characteristics", &self.characteristics)
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Immutable, type-erased part of a definition shared by an adapter chain
pub struct ComponentDescriptor {
    pub(crate) key: ComponentKey,
    pub(crate) implementation: TypeInfo,
    pub(crate) views: Arc<ViewTable>,
    pub(crate) parameters: Option<Vec<Arc<dyn Parameter>>>,
    pub(crate) characteristics: Characteristics,
    pub(crate) monitor: Arc<dyn ComponentMonitor>,
    pub(crate) lifecycle: Option<Arc<dyn LifecycleStrategy>>,
    pub(crate) use_names: bool,
}

impl ComponentDescriptor {
    /// Registry key
    pub fn key(&self) -> &ComponentKey {
        &self.key
    }

    /// Implementation type
    pub fn implementation(&self) -> TypeInfo {
        self.implementation
    }

    /// Explicit parameters, if any
    pub fn parameters(&self) -> Option<&[Arc<dyn Parameter>]> {
        self.parameters.as_deref()
    }

    /// Effective characteristics
    pub fn characteristics(&self) -> &Characteristics {
        &self.characteristics
    }

    /// Monitor notified about this component
    pub fn monitor(&self) -> &Arc<dyn ComponentMonitor> {
        &self.monitor
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("key", &self.key)
            .field("implementation", &self.implementation.short_name())
            .field("views", &self.views)
            .field("parameters", &self.parameters)
            .field("characteristics", &self.characteristics)
            .field("use_names", &self.use_names)
            .finish_non_exhaustive()
    }
}
