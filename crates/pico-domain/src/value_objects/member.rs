//! Injection members, lifecycle phases and injector states

use std::fmt;
use std::sync::Arc;

/// What sort of member a monitor event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A declared constructor
    Constructor,
    /// A single-argument setter
    Setter,
    /// An injection method with any number of slots
    Method,
    /// A property applier
    Property,
    /// A start/stop/dispose call
    Lifecycle,
}

/// A constructor, setter, method or property of a component
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    kind: MemberKind,
    name: Arc<str>,
    arity: usize,
}

impl Member {
    /// A constructor taking `arity` arguments
    pub fn constructor(arity: usize) -> Self {
        Self {
            kind: MemberKind::Constructor,
            name: Arc::from("new"),
            arity,
        }
    }

    /// A named setter
    pub fn setter(name: &str) -> Self {
        Self {
            kind: MemberKind::Setter,
            name: Arc::from(name),
            arity: 1,
        }
    }

    /// A named injection method
    pub fn method(name: &str, arity: usize) -> Self {
        Self {
            kind: MemberKind::Method,
            name: Arc::from(name),
            arity,
        }
    }

    /// A named property
    pub fn property(name: &str) -> Self {
        Self {
            kind: MemberKind::Property,
            name: Arc::from(name),
            arity: 1,
        }
    }

    /// A lifecycle call
    pub fn lifecycle(phase: LifecyclePhase) -> Self {
        Self {
            kind: MemberKind::Lifecycle,
            name: Arc::from(phase.as_str()),
            arity: 0,
        }
    }

    /// Member kind
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Member name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of injected arguments
    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MemberKind::Constructor => write!(f, "constructor/{}", self.arity),
            MemberKind::Setter => write!(f, "setter {}", self.name),
            MemberKind::Method => write!(f, "method {}/{}", self.name, self.arity),
            MemberKind::Property => write!(f, "property {}", self.name),
            MemberKind::Lifecycle => write!(f, "{}()", self.name),
        }
    }
}

/// Container lifecycle operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    /// Start instances in creation order
    Start,
    /// Stop started instances in reverse order
    Stop,
    /// Dispose instances in reverse creation order
    Dispose,
}

impl LifecyclePhase {
    /// Lowercase name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Dispose => "dispose",
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of one key within a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InjectionState {
    /// Not touched by the current resolution
    #[default]
    Unresolved,
    /// On the resolution stack
    Resolving,
    /// Finished successfully
    Resolved,
    /// Finished with an error
    Failed,
}
