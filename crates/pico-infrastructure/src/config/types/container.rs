//! Container configuration types

use super::logging::LoggingConfig;
use crate::constants::DEFAULT_CONTAINER_NAME;
use pico_domain::constants::TRUE;
use pico_domain::value_objects::Characteristics;
use pico_domain::value_objects::characteristics::names;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Accept `cache = true` as well as `cache = "true"`
fn switch_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    let raw = BTreeMap::<String, Scalar>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                Scalar::Bool(flag) => flag.to_string(),
                Scalar::Int(number) => number.to_string(),
                Scalar::Text(text) => text,
            };
            (name, value)
        })
        .collect())
}

/// Per-component overrides, keyed by the component key's display string
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    /// Characteristics laid over the container defaults and the definition's own
    #[serde(deserialize_with = "switch_map")]
    pub characteristics: BTreeMap<String, String>,

    /// Property values applied after construction
    pub properties: BTreeMap<String, serde_json::Value>,
}

impl ComponentConfig {
    /// The configured characteristics as a set
    pub fn characteristics(&self) -> Characteristics {
        Characteristics::from_pairs(self.characteristics.clone())
    }
}

/// Container configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Container name used in diagnostics
    pub name: String,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Container-wide default characteristics
    #[serde(deserialize_with = "switch_map")]
    pub characteristics: BTreeMap<String, String>,

    /// Per-component overrides
    pub components: BTreeMap<String, ComponentConfig>,
}

impl ContainerConfig {
    /// The container-wide defaults as a set
    pub fn default_characteristics(&self) -> Characteristics {
        Characteristics::from_pairs(self.characteristics.clone())
    }

    /// Overrides for the component registered under `key`
    pub fn component(&self, key: &str) -> Option<&ComponentConfig> {
        self.components.get(key)
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_CONTAINER_NAME.to_string(),
            logging: LoggingConfig::default(),
            characteristics: BTreeMap::from([(names::CACHE.to_string(), TRUE.to_string())]),
            components: BTreeMap::new(),
        }
    }
}
