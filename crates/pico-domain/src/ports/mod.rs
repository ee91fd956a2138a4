//! Domain Port Interfaces
//!
//! Contracts between the container core and its pluggable parts. The
//! infrastructure layer supplies the stock implementations.
//!
//! - **adapter** - component adapters, construction locks and visitors
//! - **container** - the read side of a container during resolution
//! - **parameter** - per-slot resolution strategies
//! - **monitor** - observation hook around instantiation and invocation
//! - **lifecycle** - start/stop/dispose capabilities and strategies

/// Component adapter contracts
pub mod adapter;
/// Container contract
pub mod container;
/// Lifecycle contracts
pub mod lifecycle;
/// Monitor contract
pub mod monitor;
/// Parameter contract
pub mod parameter;

pub use adapter::{ComponentAdapter, ComponentVisitor, ConstructionLock};
pub use container::Container;
pub use lifecycle::{Disposable, LifecycleStrategy, Startable};
pub use monitor::ComponentMonitor;
pub use parameter::{Parameter, Resolution, ResolveRequest};
