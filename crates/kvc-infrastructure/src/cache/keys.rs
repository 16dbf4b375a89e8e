//! Cache key utilities

use kvc_domain::error::{Error, Result};
use std::fmt::Display;

/// Cache key utilities
pub struct CacheKey;

impl CacheKey {
    /// Join a key prefix and a record id (`"cache:shop:" + 1`)
    pub fn compose<I: Display + ?Sized>(prefix: &str, id: &I) -> Result<String> {
        let key = format!("{prefix}{id}");
        Self::validate(&key)?;
        Ok(key)
    }

    /// Lock key guarding the rebuild of `cache_key`
    pub fn lock_key(lock_prefix: &str, cache_key: &str) -> String {
        format!("{lock_prefix}{cache_key}")
    }

    /// Validate cache key format
    pub fn validate(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::invalid_argument("Cache key cannot be empty"));
        }

        if key.chars().any(char::is_control) {
            return Err(Error::invalid_argument(format!(
                "Cache key contains control characters: {key:?}"
            )));
        }

        Ok(())
    }
}
