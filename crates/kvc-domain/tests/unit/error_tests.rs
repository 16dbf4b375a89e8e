//! Error type tests

use kvc_domain::error::Error;

#[test]
fn test_store_errors_are_flagged_as_unavailable() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let err = Error::store_with_source("Redis GET failed", io);

    assert!(err.is_store_unavailable());
    assert_eq!(err.to_string(), "Store error: Redis GET failed");
    assert!(std::error::Error::source(&err).is_some());

    assert!(!Error::loader("db down").is_store_unavailable());
}

#[test]
fn test_error_messages() {
    assert_eq!(
        Error::lock_timeout("lock:cache:shop:1", 25).to_string(),
        "Timed out waiting for lock lock:cache:shop:1 after 25 attempts"
    );
    assert_eq!(
        Error::executor("rebuild queue is full").to_string(),
        "Executor error: rebuild queue is full"
    );
    assert_eq!(
        Error::invalid_argument("cache TTL must be positive").to_string(),
        "Invalid argument: cache TTL must be positive"
    );
}

#[test]
fn test_json_error_conversion() {
    let parse = serde_json::from_str::<u32>("nope").unwrap_err();
    let err: Error = parse.into();
    assert!(matches!(err, Error::Json { .. }));
}
