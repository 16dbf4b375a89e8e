//! Cache configuration types

use kvc_domain::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_LOGICAL_TTL_SECS, DEFAULT_NULL_TTL_SECS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL of positive entries written by the pass-through strategies
    pub default_ttl_secs: u64,

    /// TTL of null markers recording a confirmed-absent record
    pub null_ttl_secs: u64,

    /// Logical TTL of entries written by the rebuild path
    pub logical_ttl_secs: u64,
}

impl CacheConfig {
    /// Default positive TTL
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Null marker TTL
    pub fn null_ttl(&self) -> Duration {
        Duration::from_secs(self.null_ttl_secs)
    }

    /// Logical TTL
    pub fn logical_ttl(&self) -> Duration {
        Duration::from_secs(self.logical_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            null_ttl_secs: DEFAULT_NULL_TTL_SECS,
            logical_ttl_secs: DEFAULT_LOGICAL_TTL_SECS,
        }
    }
}
