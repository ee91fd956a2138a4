//! Configuration Validation Tests

use pico_domain::error::Error;
use pico_infrastructure::config::loader::validate_config;
use pico_infrastructure::config::{ComponentConfig, ConfigBuilder, ContainerConfig, LoggingConfig};
use pico_infrastructure::container::ContainerBuilder;

fn with_switch(name: &str, value: &str) -> ContainerConfig {
    let mut config = ContainerConfig::default();
    config
        .characteristics
        .insert(name.to_string(), value.to_string());
    config
}

#[test]
fn test_default_config_is_valid() {
    assert!(validate_config(&ContainerConfig::default()).is_ok());
}

#[test]
fn test_unknown_switch_is_rejected() {
    let err = validate_config(&with_switch("colour", "red")).unwrap_err();

    match err {
        Error::InvalidCharacteristic { name, message, .. } => {
            assert_eq!(name, "colour");
            assert_eq!(message, "unknown characteristic");
        }
        other => panic!("Expected InvalidCharacteristic error, got {other:?}"),
    }
}

#[test]
fn test_boolean_switch_needs_boolean_value() {
    assert!(validate_config(&with_switch("cache", "TRUE")).is_ok());
    assert!(matches!(
        validate_config(&with_switch("cache", "yes")),
        Err(Error::InvalidCharacteristic { .. })
    ));
}

#[test]
fn test_injection_value_is_checked() {
    assert!(validate_config(&with_switch("injection", "setter")).is_ok());
    assert!(validate_config(&with_switch("injection", "field")).is_err());
}

#[test]
fn test_component_overrides_are_checked() {
    let mut component = ComponentConfig::default();
    component
        .characteristics
        .insert("locking".to_string(), "often".to_string());
    let config = ConfigBuilder::new().with_component("V8", component).build();

    assert!(validate_config(&config).is_err());
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let config = ConfigBuilder::new()
        .with_logging(LoggingConfig {
            level: "chatty".to_string(),
            ..LoggingConfig::default()
        })
        .build();

    assert!(validate_config(&config).is_err());
}

#[test]
fn test_container_builder_validates_config() {
    let err = ContainerBuilder::new()
        .with_config(with_switch("colour", "red"))
        .build()
        .unwrap_err();

    assert!(matches!(err, Error::InvalidCharacteristic { .. }));
}
