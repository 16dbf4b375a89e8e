//! Id generator configuration types

use crate::constants::ID_COUNTER_RETENTION_SECS;
use kvc_domain::constants::{ID_COUNTER_KEY_PREFIX, ID_ORIGIN_EPOCH_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Id generator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IdConfig {
    /// Unix seconds subtracted from the clock to form the timestamp segment
    pub origin_epoch_secs: i64,

    /// Prefix of the daily counter keys
    pub key_prefix: String,

    /// TTL applied to a daily counter when it is created; `None` keeps counters forever
    pub counter_retention_secs: Option<u64>,
}

impl IdConfig {
    /// Counter retention as a duration
    pub fn counter_retention(&self) -> Option<Duration> {
        self.counter_retention_secs.map(Duration::from_secs)
    }
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            origin_epoch_secs: ID_ORIGIN_EPOCH_SECS,
            key_prefix: ID_COUNTER_KEY_PREFIX.to_string(),
            counter_retention_secs: Some(ID_COUNTER_RETENTION_SECS),
        }
    }
}
