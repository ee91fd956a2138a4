//! Component keys and type identities

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of a concrete type or trait-object type
///
/// Equality and hashing use only the [`TypeId`]; the name is kept for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// Type info for `T`, which may be unsized (`dyn Trait`)
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying type id
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without module paths, e.g. `dyn Engine` or `Car`
    pub fn short_name(&self) -> String {
        shorten(self.name)
    }
}

fn shorten(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut segment = String::new();
    for ch in name.chars() {
        match ch {
            ':' => segment.clear(),
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' => {
                out.push_str(&segment);
                segment.clear();
                out.push(ch);
            }
            _ => segment.push(ch),
        }
    }
    out.push_str(&segment);
    out
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeInfo({})", self.name)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

/// Opaque identifier of a component within one container's registry
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKey {
    /// Keyed by a type, usually the implementation or an exposed interface
    Type(TypeInfo),
    /// Keyed by an arbitrary name
    Named(Arc<str>),
}

impl ComponentKey {
    /// Type key for `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::Type(TypeInfo::of::<T>())
    }

    /// Name key
    pub fn named<S: AsRef<str>>(name: S) -> Self {
        Self::Named(Arc::from(name.as_ref()))
    }

    /// The name, for named keys
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Type(_) => None,
        }
    }

    /// The type, for type keys
    pub fn as_type(&self) -> Option<TypeInfo> {
        match self {
            Self::Type(info) => Some(*info),
            Self::Named(_) => None,
        }
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(info) => fmt::Display::fmt(info, f),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<&str> for ComponentKey {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for ComponentKey {
    fn from(name: String) -> Self {
        Self::Named(Arc::from(name))
    }
}

impl From<TypeInfo> for ComponentKey {
    fn from(info: TypeInfo) -> Self {
        Self::Type(info)
    }
}

impl From<&ComponentKey> for ComponentKey {
    fn from(key: &ComponentKey) -> Self {
        key.clone()
    }
}
