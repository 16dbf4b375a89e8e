//! Cache-aside client over the shared key-value store
//!
//! | Strategy | Entry point | Defends against |
//! |----------|-------------|-----------------|
//! | Pass-through with null caching | [`CacheClient::fetch_or_load`] | penetration |
//! | Logical expiry with async rebuild | [`CacheClient::fetch_or_load_logical`] | breakdown |
//! | Mutex-guarded pass-through | [`CacheClient::fetch_or_load_with_mutex`] | penetration and breakdown |
//!
//! A key is written by exactly one strategy: pass-through entries carry a
//! store TTL, logical entries carry an envelope and no store TTL.

pub mod client;
pub mod keys;
pub mod logical_expire;
pub mod mutex;
pub mod pass_through;
pub mod stats;

pub use client::CacheClient;
pub use keys::CacheKey;
pub use stats::CacheStats;

use kvc_domain::error::{Error, Result};
use std::time::Duration;

fn validate_ttl(ttl: Duration, what: &str) -> Result<()> {
    if ttl.is_zero() {
        return Err(Error::invalid_argument(format!("{what} must be positive")));
    }
    Ok(())
}

/// A stored value that is empty or whitespace reads as the null marker
fn is_null_marker(raw: &str) -> bool {
    raw.trim().is_empty()
}
