//! Configuration management
//!
//! Layered configuration: defaults, then a TOML file, then `KVC_`
//! environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{
    AppConfig, CacheConfig, IdConfig, LockConfig, LockReleaseMode, LoggingConfig, RebuildConfig,
    StoreConfig, StoreProvider,
};
