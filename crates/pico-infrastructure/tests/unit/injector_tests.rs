//! Injector Tests
//!
//! Constructor selection, setter/method/multi injection and failure wrapping.

use crate::test_utils::{Car, Engine, RecordingMonitor, V6, V8, car, container, v8};
use pico_domain::error::Error;
use pico_domain::ports::ComponentMonitor;
use pico_domain::value_objects::characteristics::{
    CDI, METHOD_INJECTION, MULTI_INJECTION, NO_CACHE, SDI, names,
};
use pico_domain::value_objects::{Characteristics, ComponentKey, Instance, Slot};
use pico_infrastructure::container::ContainerBuilder;
use pico_infrastructure::definition::ComponentDefinition;
use pico_infrastructure::injectors::{Args, Argument, InjectionKind};
use pico_infrastructure::parameters::ConstantParameter;
use std::sync::Arc;

struct Dashboard {
    engine: Option<Arc<dyn Engine>>,
}

fn dashboard() -> ComponentDefinition<Dashboard> {
    ComponentDefinition::<Dashboard>::new()
        .constructor([], |_| Ok(Dashboard { engine: None }))
        .constructor([Slot::of::<dyn Engine>("engine")], |args| {
            Ok(Dashboard {
                engine: Some(args.get::<dyn Engine>(0)?),
            })
        })
}

#[derive(Default)]
struct Garage {
    engine: Option<Arc<dyn Engine>>,
    spare: Option<Arc<V6>>,
    wired: Vec<String>,
}

/// A V6 registered by its concrete type only, so it never competes for `dyn Engine`
fn spare() -> ComponentDefinition<V6> {
    ComponentDefinition::<V6>::new().default_constructor()
}

fn garage() -> ComponentDefinition<Garage> {
    ComponentDefinition::<Garage>::new()
        .default_constructor()
        .setter::<dyn Engine, _>("engine", |garage, engine| {
            garage.engine = Some(engine);
            garage.wired.push("engine".to_string());
            Ok(())
        })
        .optional_setter::<V6, _>("spare", |garage, spare| {
            garage.spare = Some(spare);
            garage.wired.push("spare".to_string());
            Ok(())
        })
}

#[test]
fn test_greediest_satisfiable_constructor_wins() {
    let container = container();
    container.add_component(v8()).unwrap();
    container.add_component(dashboard()).unwrap();

    let dashboard = container
        .get::<Dashboard>(ComponentKey::of::<Dashboard>())
        .unwrap();

    assert_eq!(dashboard.engine.as_ref().unwrap().power(), 8);
}

#[test]
fn test_unsatisfiable_constructor_is_skipped() {
    let container = container();
    container.add_component(dashboard()).unwrap();

    let dashboard = container
        .get::<Dashboard>(ComponentKey::of::<Dashboard>())
        .unwrap();

    assert!(dashboard.engine.is_none());
}

#[test]
fn test_equal_arity_constructors_are_ambiguous() {
    struct Gauge;
    let container = container();
    container.add_component(v8()).unwrap();
    container.add_value(ComponentKey::of::<u32>(), 5_u32).unwrap();
    container
        .add_component(
            ComponentDefinition::<Gauge>::new()
                .constructor([Slot::of::<dyn Engine>("engine")], |_| Ok(Gauge))
                .constructor([Slot::of::<u32>("scale")], |_| Ok(Gauge)),
        )
        .unwrap();

    let err = container
        .component_instance(ComponentKey::of::<Gauge>())
        .unwrap_err();

    assert!(matches!(
        err,
        Error::AmbiguousConstructor {
            arity: 1,
            count: 2,
            ..
        }
    ));
}

#[test]
fn test_missing_dependency_names_slot_and_requester() {
    let container = container();
    container.add_component(car()).unwrap();

    let err = container
        .component_instance(ComponentKey::of::<Car>())
        .unwrap_err();

    match err {
        Error::Unsatisfiable {
            adapter,
            dependency,
            ..
        } => {
            assert_eq!(adapter.to_string(), "Car");
            assert_eq!(dependency, "engine: dyn Engine");
        }
        other => panic!("Expected Unsatisfiable error, got {other:?}"),
    }
}

#[test]
fn test_explicit_parameters_pick_constructor_of_same_arity() {
    let container = container();
    container.add_component(v8()).unwrap();
    container
        .add_component(
            dashboard().parameter(ConstantParameter::from_instance(
                Instance::new(V6)
                    .with_view::<V6, dyn Engine>(|engine| engine),
            )),
        )
        .unwrap();

    let dashboard = container
        .get::<Dashboard>(ComponentKey::of::<Dashboard>())
        .unwrap();

    assert_eq!(dashboard.engine.as_ref().unwrap().power(), 6);
}

#[test]
fn test_setter_injection_invokes_setters_in_declaration_order() {
    let container = container();
    container.add_component(v8()).unwrap();
    container.add_component(spare()).unwrap();
    container.add_component(garage().with(SDI)).unwrap();

    let garage = container.get::<Garage>(ComponentKey::of::<Garage>()).unwrap();

    assert_eq!(garage.wired, vec!["engine", "spare"]);
    assert!(garage.spare.is_some());
}

#[test]
fn test_optional_setter_is_skipped_when_unsatisfied() {
    let monitor = RecordingMonitor::new();
    let container = ContainerBuilder::new()
        .with_monitor(monitor.clone())
        .build()
        .unwrap();
    container.add_component(v8()).unwrap();
    container.add_component(garage().with(SDI)).unwrap();

    let garage = container.get::<Garage>(ComponentKey::of::<Garage>()).unwrap();

    assert_eq!(garage.wired, vec!["engine"]);
    let events = monitor.events();
    assert!(events.contains(&"invoked Garage setter engine".to_string()));
    assert!(!events.iter().any(|event| event.contains("setter spare")));
}

#[test]
fn test_required_setter_fails_before_construction() {
    let monitor = RecordingMonitor::new();
    let container = ContainerBuilder::new()
        .with_monitor(monitor.clone())
        .build()
        .unwrap();
    container.add_component(garage().with(SDI)).unwrap();

    let err = container
        .component_instance(ComponentKey::of::<Garage>())
        .unwrap_err();

    assert!(matches!(err, Error::Unsatisfiable { .. }));
    assert!(monitor.events().is_empty());
}

#[test]
fn test_method_injection_passes_all_slots() {
    let container = container();
    container.add_component(v8()).unwrap();
    container.add_component(spare()).unwrap();
    container
        .add_component(
            ComponentDefinition::<Garage>::new()
                .default_constructor()
                .method(
                    "wire",
                    [Slot::of::<dyn Engine>("engine"), Slot::of::<V6>("spare")],
                    |garage, args| {
                        garage.engine = Some(args.get::<dyn Engine>(0)?);
                        garage.spare = Some(args.get::<V6>(1)?);
                        garage.wired.push("wire".to_string());
                        Ok(())
                    },
                )
                .with(METHOD_INJECTION),
        )
        .unwrap();

    let garage = container.get::<Garage>(ComponentKey::of::<Garage>()).unwrap();

    assert_eq!(garage.wired, vec!["wire"]);
    assert_eq!(garage.engine.as_ref().unwrap().power(), 8);
    assert!(garage.spare.is_some());
}

#[test]
fn test_members_select_multi_injection_by_default() {
    let container = container();
    container.add_component(v8()).unwrap();
    let adapter = container.add_component(garage().with(NO_CACHE)).unwrap();

    assert_eq!(adapter.descriptor(), "MultiInjector-Garage");
    let garage = container.get::<Garage>(ComponentKey::of::<Garage>()).unwrap();
    assert!(garage.engine.is_some());
}

#[test]
fn test_constructor_injection_ignores_setters() {
    let container = container();
    let adapter = container.add_component(garage().with(CDI)).unwrap();

    assert_eq!(adapter.descriptor(), "Cached:ConstructorInjector-Garage");
    let garage = container.get::<Garage>(ComponentKey::of::<Garage>()).unwrap();
    assert!(garage.wired.is_empty());
}

#[test]
fn test_multi_injection_runs_setters_then_methods() {
    let container = container();
    container.add_component(v8()).unwrap();
    container
        .add_component(
            garage()
                .method("polish", [], |garage, _| {
                    garage.wired.push("polish".to_string());
                    Ok(())
                })
                .with(MULTI_INJECTION),
        )
        .unwrap();

    let garage = container.get::<Garage>(ComponentKey::of::<Garage>()).unwrap();

    assert_eq!(garage.wired, vec!["engine", "polish"]);
}

#[test]
fn test_constructor_failure_is_wrapped_and_reported() {
    #[derive(Debug)]
    struct Broken;
    let monitor = RecordingMonitor::new();
    let container = ContainerBuilder::new()
        .with_monitor(monitor.clone())
        .build()
        .unwrap();
    container
        .add_component(
            ComponentDefinition::<Broken>::new().constructor([], |_| Err("no parts".into())),
        )
        .unwrap();

    let err = container
        .component_instance(ComponentKey::of::<Broken>())
        .unwrap_err();

    match err {
        Error::Instantiation { member, source, .. } => {
            assert_eq!(member, "constructor/0");
            assert_eq!(source.to_string(), "no parts");
        }
        other => panic!("Expected Instantiation error, got {other:?}"),
    }
    assert_eq!(
        monitor.events(),
        vec![
            "instantiating Broken constructor/0".to_string(),
            "instantiation failed Broken constructor/0".to_string(),
        ]
    );
}

#[test]
fn test_setter_failure_is_an_invocation_error() {
    let container = container();
    container.add_component(v8()).unwrap();
    container
        .add_component(
            ComponentDefinition::<Garage>::new()
                .default_constructor()
                .setter::<dyn Engine, _>("engine", |_, _| Err("seized".into())),
        )
        .unwrap();

    let err = container
        .component_instance(ComponentKey::of::<Garage>())
        .unwrap_err();

    assert!(matches!(err, Error::Invocation { ref member, .. } if member == "setter engine"));
}

#[test]
fn test_monitor_sees_injected_argument_count() {
    let monitor = RecordingMonitor::new();
    let container = ContainerBuilder::new()
        .with_monitor(monitor.clone() as Arc<dyn ComponentMonitor>)
        .build()
        .unwrap();
    container.add_component(v8()).unwrap();
    container.add_component(car()).unwrap();

    container
        .component_instance(ComponentKey::of::<Car>())
        .unwrap();

    assert!(
        monitor
            .events()
            .contains(&"instantiated Car constructor/1 injected=1".to_string())
    );
}

#[test]
fn test_unknown_injection_strategy_is_rejected() {
    let container = container();
    let err = container
        .add_component(v8().with_characteristics(&Characteristics::from_pairs([(
            names::INJECTION,
            "field",
        )])))
        .unwrap_err();

    assert!(matches!(err, Error::InvalidCharacteristic { .. }));
    assert!(InjectionKind::from_name("setter").is_ok());
}

#[test]
fn test_definition_without_constructor_is_rejected() {
    let container = container();
    let err = container
        .add_component(ComponentDefinition::<V8>::new())
        .unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_args_clone_values_and_report_missing_ones() {
    let args = Args::new(
        ComponentKey::named("greeter"),
        vec![
            Argument::Value(Instance::new(String::from("hello"))),
            Argument::Absent,
        ],
    );

    assert_eq!(args.cloned::<String>(0).unwrap(), "hello");
    assert!(matches!(
        args.cloned::<String>(1),
        Err(Error::Unsatisfiable { .. })
    ));
    assert!(matches!(
        args.cloned::<u32>(0),
        Err(Error::TypeMismatch { .. })
    ));
}
