//! Built component instances and their exposed views
//!
//! Rust has no runtime assignability check, so every instance carries a
//! [`ViewTable`]: the set of types it may be viewed as, each with the cast
//! that produces an `Arc<T>` for it. The table is assembled at registration
//! time from the component definition (the implementation type plus every
//! declared interface).

use super::key::TypeInfo;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

/// Type-erased shared component value
pub type AnyArc = Arc<dyn Any + Send + Sync>;

type ViewFn = Arc<dyn Fn(&AnyArc) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>;

/// Registration-time table of the types an instance can be viewed as
#[derive(Clone, Default)]
pub struct ViewTable {
    views: HashMap<TypeInfo, ViewFn>,
    order: Vec<TypeInfo>,
}

impl ViewTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// A table exposing only the concrete type `C`
    pub fn concrete<C: Any + Send + Sync>() -> Self {
        let mut table = Self::new();
        table.insert::<C, C>(|value| value);
        table
    }

    /// Expose `C` as `T` through `cast`, typically an unsizing coercion
    pub fn insert<C, T>(&mut self, cast: fn(Arc<C>) -> Arc<T>)
    where
        C: Any + Send + Sync,
        T: ?Sized + Send + Sync + 'static,
    {
        let info = TypeInfo::of::<T>();
        let view: ViewFn = Arc::new(move |value: &AnyArc| {
            let concrete = Arc::clone(value).downcast::<C>().ok()?;
            let boxed: Box<dyn Any + Send + Sync> = Box::new(cast(concrete));
            Some(boxed)
        });
        if self.views.insert(info, view).is_none() {
            self.order.push(info);
        }
    }

    /// Whether the table contains a view for `ty`
    pub fn contains(&self, ty: TypeInfo) -> bool {
        self.views.contains_key(&ty)
    }

    /// Exposed types in declaration order
    pub fn types(&self) -> &[TypeInfo] {
        &self.order
    }

    /// A copy of this table keeping only the listed types
    pub fn restricted(&self, keep: &[TypeInfo]) -> Self {
        let mut table = Self::new();
        for info in &self.order {
            if keep.contains(info) {
                if let Some(view) = self.views.get(info) {
                    table.views.insert(*info, Arc::clone(view));
                    table.order.push(*info);
                }
            }
        }
        table
    }

    fn view<T: ?Sized + Send + Sync + 'static>(&self, value: &AnyArc) -> Option<Arc<T>> {
        let view = self.views.get(&TypeInfo::of::<T>())?;
        let boxed = view(value)?;
        boxed.downcast::<Arc<T>>().ok().map(|arc| *arc)
    }
}

impl fmt::Debug for ViewTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.order.iter().map(TypeInfo::short_name))
            .finish()
    }
}

/// A built component value together with the views it exposes
#[derive(Clone)]
pub struct Instance {
    value: AnyArc,
    implementation: TypeInfo,
    views: Arc<ViewTable>,
}

impl Instance {
    /// Wrap a value exposing only its concrete type
    pub fn new<C: Any + Send + Sync>(value: C) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap a shared value exposing only its concrete type
    pub fn from_arc<C: Any + Send + Sync>(value: Arc<C>) -> Self {
        Self {
            value,
            implementation: TypeInfo::of::<C>(),
            views: Arc::new(ViewTable::concrete::<C>()),
        }
    }

    /// Assemble an instance from an erased value and a prepared view table
    pub fn from_parts(value: AnyArc, implementation: TypeInfo, views: Arc<ViewTable>) -> Self {
        Self {
            value,
            implementation,
            views,
        }
    }

    /// Add a view of the value as `T`
    #[must_use]
    pub fn with_view<C, T>(self, cast: fn(Arc<C>) -> Arc<T>) -> Self
    where
        C: Any + Send + Sync,
        T: ?Sized + Send + Sync + 'static,
    {
        let mut views = (*self.views).clone();
        views.insert(cast);
        Self {
            views: Arc::new(views),
            ..self
        }
    }

    /// View the instance as `T`, if it exposes `T`
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.views.view::<T>(&self.value)
    }

    /// Whether the instance exposes `ty`
    pub fn exposes(&self, ty: TypeInfo) -> bool {
        self.views.contains(ty)
    }

    /// The implementation type, even when hidden
    pub fn implementation(&self) -> TypeInfo {
        self.implementation
    }

    /// The exposed types, in declaration order
    pub fn exposed_types(&self) -> &[TypeInfo] {
        self.views.types()
    }

    /// Pointer identity of the underlying value
    pub fn same_as(&self, other: &Instance) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.value), Arc::as_ptr(&other.value))
    }

    /// The same value exposing only the listed types
    pub fn restricted(&self, keep: &[TypeInfo]) -> Self {
        Self {
            value: Arc::clone(&self.value),
            implementation: self.implementation,
            views: Arc::new(self.views.restricted(keep)),
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("implementation", &self.implementation.short_name())
            .field("views", &self.views)
            .finish()
    }
}

/// Shared cell filled once a circular reference completes
pub type DeferredCell = Arc<OnceLock<Instance>>;

/// Handle to a dependency that may still be under construction
///
/// Produced for deferred slots. When the target was already built the handle
/// is filled immediately; when it is part of an enabled circular chain it is
/// filled as soon as the target's construction finishes.
pub struct Deferred<T: ?Sized> {
    cell: DeferredCell,
    _marker: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> Deferred<T> {
    /// Wrap a cell
    pub fn new(cell: DeferredCell) -> Self {
        Self {
            cell,
            _marker: PhantomData,
        }
    }

    /// The dependency, once available
    pub fn get(&self) -> Option<Arc<T>> {
        self.cell.get().and_then(Instance::get::<T>)
    }

    /// Whether the target has finished construction
    pub fn is_ready(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: ?Sized> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("ready", &self.cell.get().is_some())
            .finish()
    }
}
