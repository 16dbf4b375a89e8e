//! Key-Value Store Implementations
//!
//! Backing stores for the cache layer, its locks and its id counters.
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`InMemoryStore`] | Local | Sharded in-process map with lazy TTL expiry |
//! | [`RedisStore`] | Distributed | Redis-backed for multi-instance deployments |
//!
//! ## Provider Selection Guide
//!
//! - **Development/Testing**: Use `InMemoryStore`
//! - **Multi Instance**: Use `RedisStore`; locks and id counters are only
//!   distributed when every instance shares the same store

#[cfg(feature = "store-memory")]
pub mod memory;
#[cfg(feature = "store-redis")]
pub mod redis;

// Re-export for convenience
#[cfg(feature = "store-memory")]
pub use memory::InMemoryStore;
#[cfg(feature = "store-redis")]
pub use redis::RedisStore;

use kvc_domain::error::{Error, Result};
use std::time::Duration;

/// Store-native TTLs have millisecond resolution and must be positive
pub(crate) fn validate_ttl(ttl: Duration) -> Result<()> {
    if ttl.as_millis() == 0 {
        return Err(Error::invalid_argument(format!(
            "store TTL must be at least 1ms, got {ttl:?}"
        )));
    }
    Ok(())
}
