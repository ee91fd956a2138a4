//! Monitored, timed member calls

use pico_domain::error::{BoxError, Error};
use pico_domain::ports::{ComponentMonitor, Container};
use pico_domain::value_objects::{ComponentKey, Member};
use std::time::{Duration, Instant};

/// One constructor or member call reported to a monitor
///
/// Creating the operation emits `instantiating`/`invoking`; exactly one of
/// the completion methods must follow.
///
/// ```ignore
/// let call = TimedOperation::instantiation(monitor, container, key, &member);
/// let component = build(&args).map_err(|cause| call.instantiation_failed(cause))?;
/// call.instantiated(args.len());
/// ```
pub struct TimedOperation<'a> {
    monitor: &'a dyn ComponentMonitor,
    container: &'a dyn Container,
    key: &'a ComponentKey,
    member: &'a Member,
    start: Instant,
}

impl<'a> TimedOperation<'a> {
    /// Announce construction of `key` through `member`
    pub fn instantiation(
        monitor: &'a dyn ComponentMonitor,
        container: &'a dyn Container,
        key: &'a ComponentKey,
        member: &'a Member,
    ) -> Self {
        monitor.instantiating(container, key, member);
        Self::begin(monitor, container, key, member)
    }

    /// Announce a call of `member` on an existing instance of `key`
    pub fn invocation(
        monitor: &'a dyn ComponentMonitor,
        container: &'a dyn Container,
        key: &'a ComponentKey,
        member: &'a Member,
    ) -> Self {
        monitor.invoking(container, key, member);
        Self::begin(monitor, container, key, member)
    }

    fn begin(
        monitor: &'a dyn ComponentMonitor,
        container: &'a dyn Container,
        key: &'a ComponentKey,
        member: &'a Member,
    ) -> Self {
        Self {
            monitor,
            container,
            key,
            member,
            start: Instant::now(),
        }
    }

    /// Time since the call was announced
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Report a successful construction with `injected` arguments
    pub fn instantiated(&self, injected: usize) {
        self.monitor
            .instantiated(self.container, self.key, self.member, injected, self.elapsed());
    }

    /// Report a successful member call
    pub fn invoked(&self) {
        self.monitor
            .invoked(self.container, self.key, self.member, self.elapsed());
    }

    /// Wrap `cause` and let the monitor replace the resulting error
    pub fn instantiation_failed(&self, cause: BoxError) -> Error {
        let error = Error::instantiation(self.key, self.member.to_string(), cause);
        self.monitor
            .instantiation_failed(self.container, self.key, self.member, error)
    }

    /// Wrap `cause` and let the monitor replace the resulting error
    pub fn invocation_failed(&self, cause: BoxError) -> Error {
        let error = Error::invocation(self.key, self.member.to_string(), cause);
        self.monitor
            .invocation_failed(self.container, self.key, self.member, error)
    }
}
