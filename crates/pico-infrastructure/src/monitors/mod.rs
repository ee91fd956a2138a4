//! Component monitors
//!
//! [`NullComponentMonitor`] is the default; [`TracingComponentMonitor`]
//! reports construction and invocation through `tracing`.

mod null;
mod tracing_monitor;

pub use null::NullComponentMonitor;
pub use tracing_monitor::TracingComponentMonitor;
