//! Behaviors
//!
//! Decorators that wrap exactly one inner adapter and add one concern. The
//! default chain, outer to inner, is
//! `Hidden ⊃ Automated ⊃ PropertyApplied ⊃ Cached ⊃ Locked ⊃ Injector`; which
//! links are present is decided by [`BehaviorChain`] from the component's
//! characteristics.

/// Forward the identity part of the adapter contract to `self.delegate`
macro_rules! forward_adapter {
    () => {
        fn component_key(&self) -> &pico_domain::value_objects::ComponentKey {
            self.delegate.component_key()
        }

        fn implementation(&self) -> pico_domain::value_objects::TypeInfo {
            self.delegate.implementation()
        }

        fn verify(
            &self,
            container: &dyn pico_domain::ports::Container,
            ctx: &mut pico_domain::context::ResolutionContext,
        ) -> pico_domain::error::Result<()> {
            self.delegate.verify(container, ctx)
        }

        fn delegate(&self) -> Option<&dyn pico_domain::ports::ComponentAdapter> {
            Some(self.delegate.as_ref())
        }
    };
}

/// Forward the exposed views to `self.delegate`
macro_rules! forward_views {
    () => {
        fn exposes(&self, ty: pico_domain::value_objects::TypeInfo) -> bool {
            self.delegate.exposes(ty)
        }

        fn exposed_types(&self) -> Vec<pico_domain::value_objects::TypeInfo> {
            self.delegate.exposed_types()
        }
    };
}

mod automated;
mod caching;
mod chain;
mod hidden;
mod locking;
mod property_applying;

pub use automated::Automated;
pub use caching::Cached;
pub use chain::BehaviorChain;
pub use hidden::HiddenImplementation;
pub use locking::Locked;
pub use property_applying::PropertyApplied;
