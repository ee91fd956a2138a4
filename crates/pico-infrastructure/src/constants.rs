//! Infrastructure layer constants
//!
//! Domain-level literals live in `pico_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "pico.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "pico";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "PICO";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Name given to a root container when none is configured
pub const DEFAULT_CONTAINER_NAME: &str = "root";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "PICO_LOG";

/// File stem used for rotated log files when the path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "pico";

// ============================================================================
// INJECTOR CONSTANTS
// ============================================================================

/// Descriptor suffix shared by all injectors
pub const INJECTOR_SUFFIX: &str = "Injector";
