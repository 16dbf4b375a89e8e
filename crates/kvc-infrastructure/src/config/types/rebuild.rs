//! Rebuild pool configuration types

use crate::constants::{REBUILD_QUEUE_CAPACITY, REBUILD_WORKERS};
use serde::{Deserialize, Serialize};

/// Rebuild pool configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RebuildConfig {
    /// Number of worker tasks
    pub workers: usize,

    /// Jobs that may wait in the queue before submissions are rejected
    pub queue_capacity: usize,
}

impl Default for RebuildConfig {
    fn default() -> Self {
        Self {
            workers: REBUILD_WORKERS,
            queue_capacity: REBUILD_QUEUE_CAPACITY,
        }
    }
}
