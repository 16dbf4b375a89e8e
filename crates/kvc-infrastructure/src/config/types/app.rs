//! Main application configuration

use serde::{Deserialize, Serialize};

pub use super::cache::CacheConfig;
pub use super::id::IdConfig;
pub use super::lock::{LockConfig, LockReleaseMode};
pub use super::logging::LoggingConfig;
pub use super::rebuild::RebuildConfig;
pub use super::store::{StoreConfig, StoreProvider};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backing store
    pub store: StoreConfig,
    /// Cache strategies
    pub cache: CacheConfig,
    /// Distributed lock
    pub lock: LockConfig,
    /// Id generator
    pub id: IdConfig,
    /// Rebuild pool
    pub rebuild: RebuildConfig,
    /// Logging
    pub logging: LoggingConfig,
}
