//! Lock configuration types

use crate::constants::{LOCK_MAX_ATTEMPTS, LOCK_RETRY_INTERVAL_MS};
use kvc_domain::constants::{DEFAULT_LOCK_KEY_PREFIX, DEFAULT_LOCK_TTL_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a held lock is released
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LockReleaseMode {
    /// Random token per acquisition, released by compare-and-delete
    #[default]
    Token,
    /// Fixed marker value, released by plain delete
    ///
    /// May release a lock that expired and was re-acquired by someone else.
    Unconditional,
}

/// Lock configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LockConfig {
    /// Safety TTL of a held lock
    pub ttl_secs: u64,

    /// Prefix prepended to the cache key to form the lock key
    pub key_prefix: String,

    /// Release mode
    pub release_mode: LockReleaseMode,

    /// Sleep between attempts of the mutex-guarded load
    pub retry_interval_ms: u64,

    /// Attempts before the mutex-guarded load fails with a lock timeout
    pub max_attempts: u32,
}

impl LockConfig {
    /// Lock safety TTL
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Retry interval of the mutex-guarded load
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_LOCK_TTL_SECS,
            key_prefix: DEFAULT_LOCK_KEY_PREFIX.to_string(),
            release_mode: LockReleaseMode::default(),
            retry_interval_ms: LOCK_RETRY_INTERVAL_MS,
            max_attempts: LOCK_MAX_ATTEMPTS,
        }
    }
}
