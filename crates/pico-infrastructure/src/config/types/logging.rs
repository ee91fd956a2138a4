//! Logging section of the container configuration

use crate::constants::DEFAULT_LOG_LEVEL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[logging]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive or bare level (trace, debug, info, warn, error)
    pub level: String,

    /// Emit JSON lines instead of the human-readable format
    pub json_format: bool,

    /// Daily-rotated log file written next to stdout output
    pub file_output: Option<PathBuf>,

    /// Report instantiations, invocations and lifecycle failures through
    /// `TracingComponentMonitor` when no monitor is set explicitly
    pub component_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
            component_events: false,
        }
    }
}
