//! Provider Constants
//!
//! Constants specific to store implementations. Stored formats shared with
//! the cache layer live in `kvc_domain::constants`.

// ============================================================================
// REDIS STORE CONSTANTS
// ============================================================================

/// Redis default connection URL
pub const REDIS_DEFAULT_URL: &str = "redis://127.0.0.1:6379";

/// Deletes `KEYS[1]` only while it still holds `ARGV[1]`
///
/// Returns the number of keys removed (0 or 1).
pub const COMPARE_AND_DELETE_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
end
return 0
"#;
