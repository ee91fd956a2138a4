//! Domain layer constants

/// Characteristic value meaning "on"
pub const TRUE: &str = "true";

/// Characteristic value meaning "off"
pub const FALSE: &str = "false";

/// Separator used when rendering a dependency cycle
pub const CYCLE_SEPARATOR: &str = " -> ";

/// Descriptor prefix of the caching behavior
pub const CACHED_PREFIX: &str = "Cached";

/// Descriptor prefix of the locking behavior
pub const LOCKED_PREFIX: &str = "Locked";

/// Descriptor prefix of the property-applying behavior
pub const PROPERTY_APPLIED_PREFIX: &str = "PropertyApplied";

/// Descriptor prefix of the automatic behavior
pub const AUTOMATED_PREFIX: &str = "Automated";

/// Descriptor prefix of the implementation-hiding behavior
pub const HIDDEN_PREFIX: &str = "Hidden";

/// Descriptor prefix of the instance adapter
pub const INSTANCE_PREFIX: &str = "Instance";
