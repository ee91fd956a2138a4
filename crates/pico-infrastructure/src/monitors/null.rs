//! No-op monitor

use pico_domain::ports::ComponentMonitor;

/// Monitor that observes nothing and never replaces an error
#[derive(Debug, Clone, Copy, Default)]
pub struct NullComponentMonitor;

impl ComponentMonitor for NullComponentMonitor {}
