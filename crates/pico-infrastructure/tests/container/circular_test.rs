//! Circular Dependency Tests
//!
//! A cycle is an error unless one side takes a deferred handle to a component
//! that allows circular construction.

use crate::test_utils::{Journal, container, service, v8};
use pico_domain::error::Error;
use pico_domain::value_objects::characteristics::ENABLE_CIRCULAR;
use pico_domain::value_objects::{ComponentKey, Deferred, Slot};
use pico_infrastructure::definition::ComponentDefinition;
use std::sync::Arc;

struct Husband {
    wife: Arc<Wife>,
}

struct Wife {
    husband: Deferred<Husband>,
}

fn husband() -> ComponentDefinition<Husband> {
    ComponentDefinition::<Husband>::new().constructor([Slot::of::<Wife>("wife")], |args| {
        Ok(Husband {
            wife: args.get::<Wife>(0)?,
        })
    })
}

fn wife() -> ComponentDefinition<Wife> {
    ComponentDefinition::<Wife>::new().constructor(
        [Slot::deferred::<Husband>("husband")],
        |args| {
            Ok(Wife {
                husband: args.deferred::<Husband>(0)?,
            })
        },
    )
}

#[test]
fn test_cycle_reports_full_path() {
    let journal = Journal::new();
    let container = container();
    container
        .add_component(service("a", &["b"], &journal, None))
        .unwrap();
    container
        .add_component(service("b", &["a"], &journal, None))
        .unwrap();

    let err = container.component_instance("a").unwrap_err();

    assert_eq!(
        err.cycle().unwrap(),
        &[
            ComponentKey::named("a"),
            ComponentKey::named("b"),
            ComponentKey::named("a"),
        ]
    );
    assert_eq!(err.to_string(), "Cyclic dependency detected: a -> b -> a");
}

#[test]
fn test_container_is_usable_after_cycle() {
    let journal = Journal::new();
    let container = container();
    container
        .add_component(service("a", &["b"], &journal, None))
        .unwrap();
    container
        .add_component(service("b", &["a"], &journal, None))
        .unwrap();
    container.add_component(v8()).unwrap();
    assert!(container.component_instance("b").is_err());

    assert!(container.component_instance(ComponentKey::of::<crate::test_utils::V8>()).is_ok());
    let again = container.component_instance("b").unwrap_err();
    assert!(matches!(again, Error::CyclicDependency { .. }));
}

#[test]
fn test_deferred_handle_is_filled_with_the_cached_instance() {
    let container = container();
    container.add_component(husband().with(ENABLE_CIRCULAR)).unwrap();
    container.add_component(wife()).unwrap();

    let husband = container.get::<Husband>(ComponentKey::of::<Husband>()).unwrap();

    assert!(husband.wife.husband.is_ready());
    let seen_by_wife = husband.wife.husband.get().unwrap();
    assert!(Arc::ptr_eq(&seen_by_wife, &husband));
    let wife = container.get::<Wife>(ComponentKey::of::<Wife>()).unwrap();
    assert!(Arc::ptr_eq(&wife, &husband.wife));
}

#[test]
fn test_cycle_without_circular_switch_is_an_error() {
    let container = container();
    container.add_component(husband()).unwrap();
    container.add_component(wife()).unwrap();

    let err = container
        .component_instance(ComponentKey::of::<Husband>())
        .unwrap_err();

    assert_eq!(err.to_string(), "Cyclic dependency detected: Husband -> Wife -> Husband");
}

#[test]
fn test_cycle_entered_from_the_other_side_is_an_error() {
    let container = container();
    container.add_component(husband().with(ENABLE_CIRCULAR)).unwrap();
    container.add_component(wife()).unwrap();

    let err = container
        .component_instance(ComponentKey::of::<Wife>())
        .unwrap_err();

    assert!(matches!(err, Error::CyclicDependency { .. }));
}
