//! Named on/off switches steering adapter assembly
//!
//! Characteristics are read once, when an adapter chain is assembled. Each
//! assembly step consumes the switches it understands; anything left over is
//! reported as unprocessed.

use crate::constants::{FALSE, TRUE};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One named switch with its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Characteristic {
    /// Switch name
    pub name: &'static str,
    /// Switch value
    pub value: &'static str,
}

impl Characteristic {
    const fn new(name: &'static str, value: &'static str) -> Self {
        Self { name, value }
    }
}

/// Switch names
pub mod names {
    /// Selects the injection strategy
    pub const INJECTION: &str = "injection";
    /// Placeholder switch that selects nothing
    pub const NONE: &str = "none";
    /// Caching (singleton scope)
    pub const CACHE: &str = "cache";
    /// Synchronized construction; assembled as locking
    pub const SYNCHRONIZING: &str = "synchronizing";
    /// Locked construction
    pub const LOCKING: &str = "locking";
    /// Implementation hiding
    pub const HIDE_IMPL: &str = "hide-impl";
    /// Bean-style property application
    pub const PROPERTY_APPLYING: &str = "property-applying";
    /// Eager instantiation on start
    pub const AUTOMATIC: &str = "automatic";
    /// Parameter-name matching
    pub const USE_NAMES: &str = "use-parameter-names";
    /// Deferred circular references
    pub const ENABLE_CIRCULAR: &str = "enable-circular";
    /// Guarded instantiation (not supported)
    pub const GUARD: &str = "guard";
    /// Emjection (not supported)
    pub const EMJECTION: &str = "emjection_enabled";

    /// Every switch name the assembly understands or reports
    pub const ALL: [&str; 12] = [
        INJECTION,
        NONE,
        CACHE,
        SYNCHRONIZING,
        LOCKING,
        HIDE_IMPL,
        PROPERTY_APPLYING,
        AUTOMATIC,
        USE_NAMES,
        ENABLE_CIRCULAR,
        GUARD,
        EMJECTION,
    ];
}

/// Injection strategy values for the `injection` switch
pub mod injection {
    /// Constructor injection
    pub const CONSTRUCTOR: &str = "constructor";
    /// Setter injection
    pub const SETTER: &str = "setter";
    /// Method injection
    pub const METHOD: &str = "method";
    /// Constructor, then setters, then methods
    pub const MULTI: &str = "multi";
}

/// Turns on constructor injection
pub const CDI: Characteristic = Characteristic::new(names::INJECTION, injection::CONSTRUCTOR);
/// Turns on setter injection
pub const SDI: Characteristic = Characteristic::new(names::INJECTION, injection::SETTER);
/// Turns on method injection
pub const METHOD_INJECTION: Characteristic = Characteristic::new(names::INJECTION, injection::METHOD);
/// Turns on multi injection
pub const MULTI_INJECTION: Characteristic = Characteristic::new(names::INJECTION, injection::MULTI);
/// Turns off caching of component instances
pub const NO_CACHE: Characteristic = Characteristic::new(names::CACHE, FALSE);
/// Turns on caching of component instances
pub const CACHE: Characteristic = Characteristic::new(names::CACHE, TRUE);
/// Synonym for [`CACHE`]
pub const SINGLE: Characteristic = CACHE;
/// Synonym for [`NO_CACHE`]
pub const NO_SINGLE: Characteristic = NO_CACHE;
/// Turns on synchronized construction
pub const SYNCHRONIZE: Characteristic = Characteristic::new(names::SYNCHRONIZING, TRUE);
/// Turns off synchronized construction
pub const NO_SYNCHRONIZE: Characteristic = Characteristic::new(names::SYNCHRONIZING, FALSE);
/// Turns on locked construction
pub const LOCK: Characteristic = Characteristic::new(names::LOCKING, TRUE);
/// Turns off locked construction
pub const NO_LOCK: Characteristic = Characteristic::new(names::LOCKING, FALSE);
/// Turns on implementation hiding
pub const HIDE_IMPL: Characteristic = Characteristic::new(names::HIDE_IMPL, TRUE);
/// Turns off implementation hiding
pub const NO_HIDE_IMPL: Characteristic = Characteristic::new(names::HIDE_IMPL, FALSE);
/// Turns on deferred circular references
pub const ENABLE_CIRCULAR: Characteristic = Characteristic::new(names::ENABLE_CIRCULAR, TRUE);
/// Selects nothing
pub const NONE: Characteristic = Characteristic::new(names::NONE, "");
/// Turns on property application
pub const PROPERTY_APPLYING: Characteristic = Characteristic::new(names::PROPERTY_APPLYING, TRUE);
/// Turns off property application
pub const NO_PROPERTY_APPLYING: Characteristic =
    Characteristic::new(names::PROPERTY_APPLYING, FALSE);
/// Instantiates the component when the container starts
pub const AUTOMATIC: Characteristic = Characteristic::new(names::AUTOMATIC, TRUE);
/// Uses slot names to disambiguate dependencies
pub const USE_NAMES: Characteristic = Characteristic::new(names::USE_NAMES, TRUE);

/// Immutable, ordered set of characteristics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Characteristics {
    entries: BTreeMap<String, String>,
}

impl Characteristics {
    /// An empty set
    pub fn new() -> Self {
        Self::empty()
    }

    /// An empty set, usable in statics
    pub const fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Build from name/value pairs
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// A copy with `characteristic` added, replacing any previous value
    #[must_use]
    pub fn with(&self, characteristic: Characteristic) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(characteristic.name.to_string(), characteristic.value.to_string());
        Self { entries }
    }

    /// A copy with every entry of `other` laid over this set
    #[must_use]
    pub fn overlay(&self, other: &Characteristics) -> Self {
        let mut entries = self.entries.clone();
        entries.extend(other.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { entries }
    }

    /// Raw value of a switch
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Whether a switch is present
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Boolean value of a switch, `None` when absent
    pub fn flag(&self, name: &str) -> Result<Option<bool>> {
        self.get(name).map(|value| parse_flag(name, value)).transpose()
    }

    /// Whether a boolean switch is present and true
    pub fn is_enabled(&self, name: &str) -> bool {
        matches!(self.flag(name), Ok(Some(true)))
    }

    /// Start a consuming read of this set
    pub fn reader(&self) -> CharacteristicsReader<'_> {
        CharacteristicsReader {
            source: self,
            consumed: BTreeSet::new(),
        }
    }
}

impl FromIterator<Characteristic> for Characteristics {
    fn from_iter<I: IntoIterator<Item = Characteristic>>(iter: I) -> Self {
        Self::from_pairs(iter.into_iter().map(|c| (c.name, c.value)))
    }
}

impl fmt::Display for Characteristics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .entries
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>();
        write!(f, "{{{}}}", rendered.join(", "))
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        TRUE => Ok(true),
        FALSE => Ok(false),
        _ => Err(Error::invalid_characteristic(
            name,
            value,
            "expected 'true' or 'false'",
        )),
    }
}

/// Tracks which switches an assembly step has consumed
#[derive(Debug)]
pub struct CharacteristicsReader<'a> {
    source: &'a Characteristics,
    consumed: BTreeSet<String>,
}

impl CharacteristicsReader<'_> {
    /// Consume a boolean switch
    pub fn flag(&mut self, name: &str) -> Result<Option<bool>> {
        self.consumed.insert(name.to_string());
        self.source.flag(name)
    }

    /// Consume a boolean switch, treating absence as `default`
    pub fn flag_or(&mut self, name: &str, default: bool) -> Result<bool> {
        Ok(self.flag(name)?.unwrap_or(default))
    }

    /// Consume a raw switch
    pub fn value(&mut self, name: &str) -> Option<&str> {
        self.consumed.insert(name.to_string());
        self.source.get(name)
    }

    /// Names present in the source that were never consumed
    pub fn unprocessed(&self) -> Vec<String> {
        self.source
            .entries
            .keys()
            .filter(|name| !self.consumed.contains(*name))
            .cloned()
            .collect()
    }
}
