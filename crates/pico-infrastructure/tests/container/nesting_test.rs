//! Parent/Child Container Tests

use crate::test_utils::{Car, Engine, Journal, V8, car, container, service, v6, v8};
use pico_domain::error::Error;
use pico_domain::ports::Container;
use pico_domain::value_objects::{ComponentKey, Slot};
use pico_infrastructure::container::ContainerState;
use pico_infrastructure::definition::ComponentDefinition;
use std::sync::Arc;

/// Doubles whatever engine it wraps
struct Turbo {
    inner: Arc<dyn Engine>,
}

impl Engine for Turbo {
    fn power(&self) -> u32 {
        self.inner.power() * 2
    }
}

fn turbo() -> ComponentDefinition<Turbo> {
    ComponentDefinition::<Turbo>::new()
        .key("engine")
        .constructor([Slot::of::<dyn Engine>("engine")], |args| {
            Ok(Turbo {
                inner: args.get::<dyn Engine>(0)?,
            })
        })
        .expose::<dyn Engine>(|engine| engine)
}

#[test]
fn test_child_is_named_after_parent() {
    let parent = container();

    let first = parent.make_child().unwrap();
    let second = parent.make_child().unwrap();

    assert_eq!(first.name(), "root/0");
    assert_eq!(second.name(), "root/1");
    assert_eq!(first.parent().unwrap().name(), "root");
    assert_eq!(parent.live_children().unwrap().len(), 2);
}

#[test]
fn test_child_resolves_through_parent() {
    let parent = container();
    parent.add_component(v8()).unwrap();
    let child = parent.make_child().unwrap();
    child.add_component(car()).unwrap();

    let car = child.get::<Car>(ComponentKey::of::<Car>()).unwrap();
    let engine = parent.get::<V8>(ComponentKey::of::<V8>()).unwrap();

    assert_eq!(car.engine.power(), 8);
    assert!(std::ptr::addr_eq(
        Arc::as_ptr(&car.engine),
        Arc::as_ptr(&engine)
    ));
}

#[test]
fn test_child_component_shadows_parent() {
    let parent = container();
    parent.add_component(v8()).unwrap();
    let child = parent.make_child().unwrap();
    child.add_component(v6()).unwrap();
    child.add_component(car()).unwrap();

    let car = child.get::<Car>(ComponentKey::of::<Car>()).unwrap();

    assert_eq!(car.engine.power(), 6);
    assert_eq!(parent.get_by_type::<dyn Engine>().unwrap().power(), 8);
}

#[test]
fn test_parent_cannot_see_child_components() {
    let parent = container();
    let child = parent.make_child().unwrap();
    child.add_component(v8()).unwrap();

    let err = parent.component_instance(ComponentKey::of::<V8>()).unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    assert!(parent.component_adapter(&ComponentKey::of::<V8>()).is_none());
    assert!(child.component_adapter(&ComponentKey::of::<V8>()).is_some());
}

#[test]
fn test_removing_child_component_falls_back_to_parent() {
    let parent = container();
    parent.add_component(v8().key("engine")).unwrap();
    let child = parent.make_child().unwrap();
    child.add_component(v6().key("engine")).unwrap();
    assert_eq!(child.get::<dyn Engine>("engine").unwrap().power(), 6);

    child.remove_component("engine").unwrap();

    assert_eq!(child.get::<dyn Engine>("engine").unwrap().power(), 8);
}

#[test]
fn test_parent_component_resolves_dependencies_in_parent() {
    let parent = container();
    parent.add_component(v8()).unwrap();
    parent.add_component(car()).unwrap();
    let child = parent.make_child().unwrap();
    child.add_component(v6()).unwrap();

    let car = child.get::<Car>(ComponentKey::of::<Car>()).unwrap();

    assert_eq!(car.engine.power(), 8);
}

#[test]
fn test_lifecycle_cascades_to_children() {
    let journal = Journal::new();
    let parent = container();
    parent
        .add_component(service("outer", &[], &journal, None))
        .unwrap();
    let child = parent.make_child().unwrap();
    child
        .add_component(service("inner", &[], &journal, None))
        .unwrap();
    parent.component_instance("outer").unwrap();
    child.component_instance("inner").unwrap();

    parent.start().unwrap();
    assert_eq!(child.state().unwrap(), ContainerState::Started);
    parent.stop().unwrap();
    assert_eq!(child.state().unwrap(), ContainerState::Stopped);
    parent.dispose().unwrap();

    assert_eq!(
        journal.entries(),
        vec![
            "start outer",
            "start inner",
            "stop inner",
            "stop outer",
            "dispose inner",
            "dispose outer",
        ]
    );
    assert_eq!(child.state().unwrap(), ContainerState::Disposed);
}

#[test]
fn test_child_stop_failure_is_reported_by_parent() {
    let journal = Journal::new();
    let parent = container();
    let child = parent.make_child().unwrap();
    child
        .add_component(service(
            "inner",
            &[],
            &journal,
            Some(pico_domain::value_objects::LifecyclePhase::Stop),
        ))
        .unwrap();
    child.component_instance("inner").unwrap();
    parent.start().unwrap();

    let err = parent.stop().unwrap_err();

    match err {
        Error::Lifecycle { failures, .. } => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].key, ComponentKey::named("inner"));
        }
        other => panic!("Expected Lifecycle error, got {other:?}"),
    }
}

#[test]
fn test_dropped_child_is_not_cascaded() {
    let journal = Journal::new();
    let parent = container();
    {
        let child = parent.make_child().unwrap();
        child
            .add_component(service("inner", &[], &journal, None))
            .unwrap();
        child.component_instance("inner").unwrap();
    }

    parent.start().unwrap();

    assert!(parent.live_children().unwrap().is_empty());
    assert!(journal.entries().is_empty());
}

#[test]
fn test_child_wraps_parent_component_under_same_key() {
    let parent = container();
    parent.add_component(v8().key("engine")).unwrap();
    let child = parent.make_child().unwrap();
    child.add_component(turbo()).unwrap();

    let engine = child.get::<dyn Engine>("engine").unwrap();
    let turbo = child.get::<Turbo>("engine").unwrap();
    let wrapped = parent.get::<dyn Engine>("engine").unwrap();

    assert_eq!(engine.power(), 16);
    assert!(std::ptr::addr_eq(Arc::as_ptr(&turbo.inner), Arc::as_ptr(&wrapped)));
    assert!(child.verify().is_ok());
}

#[test]
fn test_wrapper_without_parent_component_is_unsatisfied() {
    let parent = container();
    let child = parent.make_child().unwrap();
    child.add_component(turbo()).unwrap();

    let Err(err) = child.get::<dyn Engine>("engine") else {
        panic!("a wrapper must not resolve to itself");
    };

    assert!(matches!(err, Error::Unsatisfiable { .. }), "{err}");
}
