//! Logging setup tests

use kvc_domain::error::Error;
use kvc_infrastructure::logging::{init_logging, parse_log_level, LoggingConfig};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("WARNING").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert!(matches!(
        parse_log_level("loud"),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_init_logging_rejects_invalid_level() {
    let config = LoggingConfig {
        level: "verbose".to_string(),
        ..LoggingConfig::default()
    };

    assert!(init_logging(config).is_err());
}

#[test]
fn test_init_logging_installs_once() {
    let config = LoggingConfig::default();

    // The first call may race other tests; the second must report the existing subscriber
    let _ = init_logging(config.clone());
    assert!(init_logging(config).is_err());
}
