//! Configuration loader
//!
//! Loads container configuration from defaults, a TOML file and environment
//! variables using Figment.

use crate::config::{ComponentConfig, ContainerConfig, LoggingConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_source, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use pico_domain::error::{Error, Result};
use pico_domain::value_objects::characteristics::{injection, names};
use pico_domain::value_objects::{Characteristic, Characteristics};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

/// Switches whose value is free-form rather than a boolean
const NON_BOOLEAN_SWITCHES: [&str; 2] = [names::INJECTION, names::NONE];

/// Accepted values of the `injection` switch
const INJECTION_VALUES: [&str; 4] = [
    injection::CONSTRUCTOR,
    injection::SETTER,
    injection::METHOD,
    injection::MULTI,
];

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    #[must_use]
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `ContainerConfig::default()`
    /// 2. TOML configuration file (if it exists)
    /// 3. Environment variables with prefix, nested keys split on `__`
    ///    (e.g. `PICO_CHARACTERISTICS__LOCKING=true`)
    pub fn load(&self) -> Result<ContainerConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(ContainerConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_source(config_path, true);
            } else {
                log_config_source(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_source(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let config: ContainerConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_config(&config)?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &ContainerConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).with_config_context(|| {
            format!("Failed to write config file {}", path.as_ref().display())
        })?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a loaded or built configuration
///
/// Rejects unknown characteristic names, non-boolean values for boolean
/// switches, unknown injection strategies and invalid log levels.
pub fn validate_config(config: &ContainerConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    validate_characteristics(&config.characteristics)?;
    for component in config.components.values() {
        validate_characteristics(&component.characteristics)?;
    }
    Ok(())
}

fn validate_characteristics(switches: &BTreeMap<String, String>) -> Result<()> {
    let characteristics = Characteristics::from_pairs(switches.clone());
    for (name, value) in characteristics.iter() {
        if !names::ALL.contains(&name) {
            return Err(Error::invalid_characteristic(
                name,
                value,
                "unknown characteristic",
            ));
        }
        if name == names::INJECTION && !INJECTION_VALUES.contains(&value) {
            return Err(Error::invalid_characteristic(
                name,
                value,
                format!("expected one of {}", INJECTION_VALUES.join(", ")),
            ));
        }
        if !NON_BOOLEAN_SWITCHES.contains(&name) {
            characteristics.flag(name)?;
        }
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: ContainerConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the container name
    #[must_use]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set logging configuration
    #[must_use]
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Add or replace a container-wide default characteristic
    #[must_use]
    pub fn with_characteristic(mut self, characteristic: Characteristic) -> Self {
        self.config.characteristics.insert(
            characteristic.name.to_string(),
            characteristic.value.to_string(),
        );
        self
    }

    /// Drop every container-wide default characteristic
    #[must_use]
    pub fn without_default_characteristics(mut self) -> Self {
        self.config.characteristics.clear();
        self
    }

    /// Set the overrides for one component
    #[must_use]
    pub fn with_component<S: Into<String>>(mut self, key: S, component: ComponentConfig) -> Self {
        self.config.components.insert(key.into(), component);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ContainerConfig {
        self.config
    }
}
