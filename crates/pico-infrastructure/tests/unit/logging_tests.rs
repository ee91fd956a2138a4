//! Logging Tests

use pico_domain::error::Error;
use pico_infrastructure::logging::{LoggingConfig, init_logging, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level_accepts_known_levels() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
}

#[test]
fn test_parse_log_level_rejects_unknown() {
    let err = parse_log_level("chatty").unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_parse_log_level_ignores_surrounding_whitespace() {
    assert_eq!(parse_log_level(" info ").unwrap(), Level::INFO);
}

#[test]
fn test_init_logging_installs_subscriber_once() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        ..LoggingConfig::default()
    };

    init_logging(&config).unwrap();
    let err = init_logging(&config).unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_init_logging_rejects_invalid_level_before_installing() {
    let config = LoggingConfig {
        level: "loud".to_string(),
        ..LoggingConfig::default()
    };

    let err = init_logging(&config).unwrap_err();

    assert!(err.to_string().contains("Invalid log level: loud"));
}
