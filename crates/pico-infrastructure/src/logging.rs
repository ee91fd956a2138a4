//! Structured logging with tracing
//!
//! One `tracing-subscriber` registry with an env filter, a stdout layer and
//! an optional daily-rotated file layer, both either human-readable or JSON.

use crate::constants::{DEFAULT_LOG_FILE_STEM, LOG_ENV_VAR};
use pico_domain::error::{Error, Result};
use std::ffi::OsStr;
use std::path::Path;

pub use crate::config::LoggingConfig;
use tracing::{Level, debug, info, warn};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber described by `config`
///
/// `PICO_LOG` overrides the configured level with a full filter directive.
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut layers: Vec<BoxedLayer> = vec![filter.boxed(), stdout_layer(config.json_format)];
    if let Some(path) = &config.file_output {
        layers.push(file_layer(path, config.json_format));
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|err| Error::configuration_with_source("Failed to install logging", err))?;

    info!(level = %level, json = config.json_format, file = ?config.file_output, "logging initialized");
    Ok(())
}

fn stdout_layer(json: bool) -> BoxedLayer {
    let layer = fmt::layer().with_target(true).with_thread_names(true);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

fn file_layer(path: &Path, json: bool) -> BoxedLayer {
    let appender = tracing_appender::rolling::daily(
        path.parent().unwrap_or_else(|| Path::new(".")),
        path.file_stem()
            .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE_STEM)),
    );
    let layer = fmt::layer().with_writer(appender).with_ansi(false);
    if json { layer.json().boxed() } else { layer.boxed() }
}

/// Parse a bare level name; `warning` is accepted for `warn`
pub fn parse_log_level(level: &str) -> Result<Level> {
    let normalized = level.trim().to_ascii_lowercase();
    let name = if normalized == "warning" { "warn" } else { normalized.as_str() };
    match name {
        "trace" | "debug" | "info" | "warn" | "error" => name
            .parse::<Level>()
            .map_err(|err| Error::configuration(format!("Invalid log level {level}: {err}"))),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Record where configuration came from
pub fn log_config_source(path: &Path, found: bool) {
    if found {
        debug!(path = %path.display(), "configuration file merged");
    } else {
        warn!(path = %path.display(), "configuration file not found, using defaults");
    }
}
