//! Configuration error context
//!
//! Foreign errors met while reading or writing configuration (figment, io,
//! toml) become [`Error::Configuration`] with the original kept as source.

use pico_domain::error::{Error, Result};
use std::fmt;

/// Attach configuration context to a foreign error
///
/// ```ignore
/// std::fs::write(&path, text)
///     .with_config_context(|| format!("Failed to write {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    fn config_context<C: fmt::Display>(self, context: C) -> Result<T>;

    /// Like [`config_context`](Self::config_context), building the message only on failure
    fn with_config_context<C, F>(self, context: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn config_context<C: fmt::Display>(self, context: C) -> Result<T> {
        self.with_config_context(|| context)
    }

    fn with_config_context<C, F>(self, context: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|err| Error::configuration_with_source(context().to_string(), err))
    }
}
