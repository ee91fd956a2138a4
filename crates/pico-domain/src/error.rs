//! Error handling types
//!
//! Every failure the container can report is a variant of [`Error`]. Errors
//! raised by user construction code travel as [`BoxError`] and are wrapped
//! into [`Error::Instantiation`] or [`Error::Invocation`] unless they already
//! are a domain [`Error`], in which case they pass through unchanged.

use crate::constants::CYCLE_SEPARATOR;
use crate::value_objects::{ComponentKey, LifecyclePhase};
use std::fmt;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error raised by user-supplied construction, setter and lifecycle code
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// One failed lifecycle invocation collected during a best-effort sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleFailure {
    /// Key of the component whose lifecycle call failed
    pub key: ComponentKey,
    /// Rendered cause
    pub message: String,
}

impl fmt::Display for LifecycleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Main error type for the pico container
#[derive(Error, Debug)]
pub enum Error {
    /// No adapter is registered for the key in the container or its parents
    #[error("No component found for key '{key}'")]
    NotFound {
        /// The key that was requested
        key: ComponentKey,
    },

    /// A key is registered twice in the same container
    #[error("Duplicate component key '{key}' in container '{container}'")]
    DuplicateKey {
        /// The clashing key
        key: ComponentKey,
        /// Name of the container that rejected the registration
        container: String,
    },

    /// A dependency of a component cannot be satisfied
    #[error("Component '{adapter}' has unsatisfied dependency {dependency}: {reason}")]
    Unsatisfiable {
        /// Key of the component requesting the dependency
        adapter: ComponentKey,
        /// Description of the missing type or key
        dependency: String,
        /// Why the dependency could not be supplied
        reason: String,
    },

    /// More than one adapter matches a type-based lookup
    #[error("Ambiguous resolution of {target} for '{adapter}': candidates [{}]", join_keys(.candidates))]
    Ambiguous {
        /// Key of the component requesting the dependency
        adapter: ComponentKey,
        /// Name of the requested type
        target: String,
        /// Keys of every matching adapter
        candidates: Vec<ComponentKey>,
    },

    /// Several constructors of the greediest satisfiable arity qualify
    #[error("Ambiguous constructors for '{key}': {count} satisfiable constructors of arity {arity}")]
    AmbiguousConstructor {
        /// Key of the component being built
        key: ComponentKey,
        /// Arity shared by the competing constructors
        arity: usize,
        /// Number of competing constructors
        count: usize,
    },

    /// Resolving a key re-entered the same key before completing
    #[error("Cyclic dependency detected: {}", join_cycle(.cycle))]
    CyclicDependency {
        /// Keys from the root of the resolution to the repeated key
        cycle: Vec<ComponentKey>,
    },

    /// The construction step raised a recoverable error
    #[error("Instantiation of '{key}' via {member} failed: {source}")]
    Instantiation {
        /// Key of the component being built
        key: ComponentKey,
        /// The constructor that failed
        member: String,
        /// The underlying cause
        #[source]
        source: BoxError,
    },

    /// A setter, injection method or property applier raised an error
    #[error("Invocation of {member} on '{key}' failed: {source}")]
    Invocation {
        /// Key of the component being injected
        key: ComponentKey,
        /// The member that failed
        member: String,
        /// The underlying cause
        #[source]
        source: BoxError,
    },

    /// A resolved value does not expose the requested type
    #[error("Type mismatch for '{key}': expected {expected}")]
    TypeMismatch {
        /// Key of the component whose value was inspected
        key: ComponentKey,
        /// Name of the type that was expected
        expected: String,
    },

    /// Characteristics were supplied that no adapter assembly step consumed
    #[error("Unprocessed characteristics for '{key}': [{}]", .names.join(", "))]
    UnprocessedCharacteristics {
        /// Key of the component being assembled
        key: ComponentKey,
        /// Names left over after assembly
        names: Vec<String>,
    },

    /// A characteristic carries a value that cannot be interpreted
    #[error("Invalid characteristic {name}={value}: {message}")]
    InvalidCharacteristic {
        /// Characteristic name
        name: String,
        /// Offending value
        value: String,
        /// Why the value is invalid
        message: String,
    },

    /// A property value was configured for a property the component does not declare
    #[error("Unknown property '{property}' for component '{key}'")]
    UnknownProperty {
        /// Key of the component
        key: ComponentKey,
        /// Name of the undeclared property
        property: String,
    },

    /// Starting a component failed; remaining starts were aborted
    #[error("Failed to start '{key}': {source}")]
    LifecycleStart {
        /// Key of the component that failed to start
        key: ComponentKey,
        /// The underlying cause
        #[source]
        source: BoxError,
    },

    /// One or more components failed during a best-effort stop or dispose sweep
    #[error("{} {phase} failure(s): [{}]", .failures.len(), join_failures(.failures))]
    Lifecycle {
        /// The sweep that collected the failures
        phase: LifecyclePhase,
        /// Every failure, in sweep order
        failures: Vec<LifecycleFailure>,
    },

    /// A lifecycle operation is not allowed in the current container state
    #[error("Cannot {operation} container '{container}' in state {state}")]
    InvalidLifecycleState {
        /// Name of the container
        container: String,
        /// The attempted operation
        operation: LifecyclePhase,
        /// Current state rendered for diagnostics
        state: String,
    },

    /// The registry refuses changes once instances may depend on it
    #[error("Registry of container '{container}' is locked: cannot {operation} '{key}'")]
    RegistryLocked {
        /// Name of the container
        container: String,
        /// The refused operation
        operation: String,
        /// Key the operation targeted
        key: ComponentKey,
    },

    /// Verification found one or more unsatisfiable components
    #[error("Verification failed for {} component(s): {}", .failures.len(), join_errors(.failures))]
    Verification {
        /// Every verification failure, in registration order
        failures: Vec<Error>,
    },

    /// JSON conversion error (property values)
    #[error("JSON conversion error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

fn join_keys(keys: &[ComponentKey]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_cycle(keys: &[ComponentKey]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(CYCLE_SEPARATOR)
}

fn join_failures(failures: &[LifecycleFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_errors(errors: &[Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// Resolution error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found(key: impl Into<ComponentKey>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create an unsatisfiable dependency error
    pub fn unsatisfiable<D: Into<String>, R: Into<String>>(
        adapter: &ComponentKey,
        dependency: D,
        reason: R,
    ) -> Self {
        Self::Unsatisfiable {
            adapter: adapter.clone(),
            dependency: dependency.into(),
            reason: reason.into(),
        }
    }

    /// Create an ambiguous resolution error
    pub fn ambiguous<S: Into<String>>(
        adapter: &ComponentKey,
        target: S,
        candidates: Vec<ComponentKey>,
    ) -> Self {
        Self::Ambiguous {
            adapter: adapter.clone(),
            target: target.into(),
            candidates,
        }
    }

    /// Create a cyclic dependency error
    pub fn cyclic(cycle: Vec<ComponentKey>) -> Self {
        Self::CyclicDependency { cycle }
    }

    /// Create a type mismatch error
    pub fn type_mismatch<S: Into<String>>(key: &ComponentKey, expected: S) -> Self {
        Self::TypeMismatch {
            key: key.clone(),
            expected: expected.into(),
        }
    }
}

// Wrapping of user code failures
impl Error {
    /// Wrap a construction failure, passing domain errors through unwrapped
    pub fn instantiation<S: Into<String>>(key: &ComponentKey, member: S, cause: BoxError) -> Self {
        match cause.downcast::<Error>() {
            Ok(domain) => *domain,
            Err(source) => Self::Instantiation {
                key: key.clone(),
                member: member.into(),
                source,
            },
        }
    }

    /// Wrap an invocation failure, passing domain errors through unwrapped
    pub fn invocation<S: Into<String>>(key: &ComponentKey, member: S, cause: BoxError) -> Self {
        match cause.downcast::<Error>() {
            Ok(domain) => *domain,
            Err(source) => Self::Invocation {
                key: key.clone(),
                member: member.into(),
                source,
            },
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid characteristic error
    pub fn invalid_characteristic<N: Into<String>, V: Into<String>, M: Into<String>>(
        name: N,
        value: V,
        message: M,
    ) -> Self {
        Self::InvalidCharacteristic {
            name: name.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Error classification
impl Error {
    /// Whether this error is a composition failure raised while building an object graph
    pub fn is_composition(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Unsatisfiable { .. }
                | Self::Ambiguous { .. }
                | Self::AmbiguousConstructor { .. }
                | Self::CyclicDependency { .. }
                | Self::Instantiation { .. }
                | Self::Invocation { .. }
                | Self::TypeMismatch { .. }
        )
    }

    /// Keys forming the cycle, when this is a cyclic dependency error
    pub fn cycle(&self) -> Option<&[ComponentKey]> {
        match self {
            Self::CyclicDependency { cycle } => Some(cycle),
            _ => None,
        }
    }
}
