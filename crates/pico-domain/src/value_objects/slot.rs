//! Declared injection points

use super::instance::Instance;
use super::key::TypeInfo;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// How an unsatisfied or circular slot is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// Must be satisfied
    Required,
    /// Left absent when nothing can satisfy it
    Optional,
    /// Receives a [`Deferred`](super::Deferred) handle
    Deferred,
}

type DefaultFactory = Arc<dyn Fn() -> Instance + Send + Sync>;

/// One constructor, setter or method argument
#[derive(Clone)]
pub struct Slot {
    name: Arc<str>,
    ty: TypeInfo,
    kind: SlotKind,
    default: Option<DefaultFactory>,
}

impl Slot {
    fn new(name: &str, ty: TypeInfo, kind: SlotKind) -> Self {
        Self {
            name: Arc::from(name),
            ty,
            kind,
            default: None,
        }
    }

    /// A required slot of type `T`
    pub fn of<T: ?Sized + 'static>(name: &str) -> Self {
        Self::new(name, TypeInfo::of::<T>(), SlotKind::Required)
    }

    /// An optional slot of type `T`
    pub fn optional<T: ?Sized + 'static>(name: &str) -> Self {
        Self::new(name, TypeInfo::of::<T>(), SlotKind::Optional)
    }

    /// A slot of type `T` that may be filled after construction
    pub fn deferred<T: ?Sized + 'static>(name: &str) -> Self {
        Self::new(name, TypeInfo::of::<T>(), SlotKind::Deferred)
    }

    /// Supply a default built by `factory` when the container cannot
    #[must_use]
    pub fn with_default<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Instance + Send + Sync + 'static,
    {
        self.default = Some(Arc::new(factory));
        self
    }

    /// Supply a clone of `value` as the default
    #[must_use]
    pub fn with_default_value<V: Any + Clone + Send + Sync>(self, value: V) -> Self {
        self.with_default(move || Instance::new(value.clone()))
    }

    /// Slot name, used for name-based matching
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type
    pub fn ty(&self) -> TypeInfo {
        self.ty
    }

    /// Slot kind
    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    /// Whether the slot may stay absent
    pub fn is_optional(&self) -> bool {
        self.kind == SlotKind::Optional
    }

    /// Whether the slot takes a deferred handle
    pub fn is_deferred(&self) -> bool {
        self.kind == SlotKind::Deferred
    }

    /// Whether a default value is declared
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// A fresh default value, if declared
    pub fn default_value(&self) -> Option<Instance> {
        self.default.as_ref().map(|factory| factory())
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("name", &self.name)
            .field("ty", &self.ty.short_name())
            .field("kind", &self.kind)
            .field("default", &self.default.is_some())
            .finish()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}
