//! Verification Tests

use crate::test_utils::{Journal, RecordingMonitor, car, container, service, v8};
use pico_domain::error::Error;
use pico_domain::value_objects::characteristics::LOCK;
use pico_infrastructure::container::{ContainerBuilder, VerifyingVisitor};

#[test]
fn test_valid_graph_verifies_without_building() {
    let monitor = RecordingMonitor::new();
    let container = ContainerBuilder::new()
        .with_monitor(monitor.clone())
        .build()
        .unwrap();
    container.add_component(v8()).unwrap();
    container.add_component(car()).unwrap();

    container.verify().unwrap();

    assert!(monitor.events().is_empty());
}

#[test]
fn test_missing_dependency_fails_verification() {
    let container = container();
    container.add_component(car()).unwrap();

    let err = container.verify().unwrap_err();

    match err {
        Error::Verification { failures } => {
            assert_eq!(failures.len(), 1);
            assert!(matches!(failures[0], Error::Unsatisfiable { .. }));
        }
        other => panic!("Expected Verification error, got {other:?}"),
    }
}

#[test]
fn test_cycle_fails_verification() {
    let journal = Journal::new();
    let container = container();
    container
        .add_component(service("a", &["b"], &journal, None))
        .unwrap();
    container
        .add_component(service("b", &["a"], &journal, None))
        .unwrap();

    let err = container.verify().unwrap_err();

    let Error::Verification { failures } = err else {
        panic!("Expected Verification error");
    };
    assert_eq!(failures.len(), 2);
    assert!(
        failures
            .iter()
            .all(|failure| matches!(failure, Error::CyclicDependency { .. }))
    );
    assert!(journal.entries().is_empty());
}

#[test]
fn test_visitor_counts_adapters_and_behaviors() {
    let container = container();
    container.add_component(v8().with(LOCK)).unwrap();
    container.add_component(car()).unwrap();
    let mut visitor = VerifyingVisitor::new();

    container.accept(&mut visitor);

    assert_eq!(visitor.verified(), 2);
    assert_eq!(visitor.behaviors(), 3);
    assert!(visitor.failures().is_empty());
    assert!(visitor.into_result().is_ok());
}
