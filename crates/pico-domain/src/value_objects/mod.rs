//! Domain Value Objects
//!
//! Immutable values describing components and their resolution.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`ComponentKey`] | Registry key: a type or a name |
//! | [`TypeInfo`] | Identity of a concrete or trait-object type |
//! | [`Instance`] | Built value plus the views it exposes |
//! | [`Characteristics`] | Switches read when an adapter chain is assembled |
//! | [`Slot`] | One declared injection point |
//! | [`Member`] | Constructor, setter, method or property reported to monitors |

/// Characteristic switches
pub mod characteristics;
/// Built instances and views
pub mod instance;
/// Keys and type identities
pub mod key;
/// Members, lifecycle phases and injector states
pub mod member;
/// Injection slots
pub mod slot;

pub use characteristics::{Characteristic, Characteristics, CharacteristicsReader};
pub use instance::{AnyArc, Deferred, DeferredCell, Instance, ViewTable};
pub use key::{ComponentKey, TypeInfo};
pub use member::{InjectionState, LifecyclePhase, Member, MemberKind};
pub use slot::{Slot, SlotKind};
