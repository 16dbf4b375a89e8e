//! Store configuration types

use serde::{Deserialize, Serialize};

/// Backing store providers
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    /// Process-local store
    #[default]
    Memory,
    /// Shared Redis server
    Redis,
}

/// Store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store provider
    pub provider: StoreProvider,

    /// Redis URL (for Redis provider; defaults to the local server)
    pub redis_url: Option<String>,
}
