//! Resolution Tests

use crate::test_utils::{Car, Engine, V6, V8, car, container, v6, v8};
use pico_domain::error::Error;
use pico_domain::ports::Container;
use pico_domain::value_objects::characteristics::NO_CACHE;
use pico_domain::value_objects::{ComponentKey, Instance, TypeInfo};
use std::sync::Arc;

#[test]
fn test_car_receives_registered_engine() {
    let container = container();
    container.add_component(v8()).unwrap();
    container.add_component(car()).unwrap();

    let car = container.get::<Car>(ComponentKey::of::<Car>()).unwrap();

    assert_eq!(car.engine.power(), 8);
}

#[test]
fn test_cached_dependency_is_shared() {
    let container = container();
    container.add_component(v8()).unwrap();
    container.add_component(car()).unwrap();

    let first = container.get::<Car>(ComponentKey::of::<Car>()).unwrap();
    let second = container.get::<Car>(ComponentKey::of::<Car>()).unwrap();
    let engine = container.get::<V8>(ComponentKey::of::<V8>()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(std::ptr::addr_eq(
        Arc::as_ptr(&first.engine),
        Arc::as_ptr(&engine)
    ));
}

#[test]
fn test_uncached_dependents_get_fresh_instances() {
    let container = container();
    container.add_component(v8()).unwrap();
    container.add_component(car().with(NO_CACHE)).unwrap();

    let first = container.get::<Car>(ComponentKey::of::<Car>()).unwrap();
    let second = container.get::<Car>(ComponentKey::of::<Car>()).unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert!(std::ptr::addr_eq(
        Arc::as_ptr(&first.engine),
        Arc::as_ptr(&second.engine)
    ));
}

#[test]
fn test_lookup_by_type() {
    let container = container();
    container.add_component(v8()).unwrap();

    let engine = container.get_by_type::<dyn Engine>().unwrap();

    assert_eq!(engine.power(), 8);
    let adapter = container
        .component_adapter_of_type(TypeInfo::of::<dyn Engine>())
        .unwrap()
        .unwrap();
    assert_eq!(adapter.component_key(), &ComponentKey::of::<V8>());
}

#[test]
fn test_lookup_by_type_is_ambiguous_with_two_providers() {
    let container = container();
    container.add_component(v8()).unwrap();
    container.add_component(v6()).unwrap();

    let Err(err) = container.get_by_type::<dyn Engine>() else {
        panic!("two engines should be ambiguous");
    };

    assert!(matches!(err, Error::Ambiguous { ref candidates, .. } if candidates.len() == 2));
}

#[test]
fn test_duplicate_key_is_rejected() {
    let container = container();
    container.add_component(v8()).unwrap();

    let err = container.add_component(v8()).unwrap_err();

    match err {
        Error::DuplicateKey { key, container } => {
            assert_eq!(key, ComponentKey::of::<V8>());
            assert_eq!(container, "root");
        }
        other => panic!("Expected DuplicateKey error, got {other:?}"),
    }
    assert_eq!(container.len().unwrap(), 1);
}

#[test]
fn test_missing_key_is_not_found() {
    let container = container();

    let err = container.component_instance("nothing").unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    assert!(container.is_empty().unwrap());
}

#[test]
fn test_wrong_view_is_a_type_mismatch() {
    let container = container();
    container.add_component(v8()).unwrap();

    let err = container.get::<String>(ComponentKey::of::<V8>()).unwrap_err();

    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn test_registered_instance_satisfies_dependencies() {
    let container = container();
    let engine = Instance::new(V6).with_view::<V6, dyn Engine>(|engine| engine);
    container.add_instance("engine", engine.clone()).unwrap();
    container.add_component(car()).unwrap();

    let car = container.get::<Car>(ComponentKey::of::<Car>()).unwrap();
    let adapter = container.component_adapter(&ComponentKey::named("engine"));

    assert_eq!(car.engine.power(), 6);
    assert_eq!(adapter.unwrap().descriptor(), "Instance-engine");
    assert!(
        container
            .component_instance("engine")
            .unwrap()
            .same_as(&engine)
    );
}

#[test]
fn test_add_value_exposes_concrete_type() {
    let container = container();
    container
        .add_value("greeting", String::from("hello"))
        .unwrap();

    let greeting = container.get::<String>("greeting").unwrap();

    assert_eq!(greeting.as_str(), "hello");
}

#[test]
fn test_removed_component_no_longer_resolves() {
    let container = container();
    container.add_component(v8()).unwrap();
    container.add_component(car().with(NO_CACHE)).unwrap();
    container.get::<Car>(ComponentKey::of::<Car>()).unwrap();

    let removed = container.remove_component(ComponentKey::of::<V8>()).unwrap();

    assert_eq!(
        removed.unwrap().component_key(),
        &ComponentKey::of::<V8>()
    );
    assert!(
        container
            .remove_component(ComponentKey::of::<V8>())
            .unwrap()
            .is_none()
    );
    let err = container
        .component_instance(ComponentKey::of::<Car>())
        .unwrap_err();
    assert!(matches!(err, Error::Unsatisfiable { .. }));
}

#[test]
fn test_adapters_keep_registration_order() {
    let container = container();
    container.add_component(v6()).unwrap();
    container.add_component(car()).unwrap();
    container.add_component(v8().key("spare")).unwrap();

    let keys: Vec<String> = container
        .component_adapters()
        .iter()
        .map(|adapter| adapter.component_key().to_string())
        .collect();

    assert_eq!(keys, vec!["V6", "Car", "spare"]);
}
