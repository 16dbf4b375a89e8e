//! Constants sanity checks

use kvc_domain::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_NULL_TTL_SECS, SECONDS_PER_DAY};
use kvc_infrastructure::constants::*;

#[test]
fn test_config_names() {
    assert_eq!(DEFAULT_CONFIG_FILENAME, "kvc.toml");
    assert_eq!(CONFIG_ENV_PREFIX, "KVC");
    assert!(LOG_FILTER_ENV.starts_with(CONFIG_ENV_PREFIX));
}

#[test]
fn test_defaults_are_consistent() {
    assert!(DEFAULT_NULL_TTL_SECS < DEFAULT_CACHE_TTL_SECS);
    assert!(ID_COUNTER_RETENTION_SECS >= SECONDS_PER_DAY);
    assert_eq!(LOCK_RETRY_INTERVAL_MS, 200);
    assert_eq!(REBUILD_WORKERS, 10);
}
