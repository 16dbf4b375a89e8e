//! # KVC - Store Implementations
//!
//! This crate contains the user-selectable key-value store implementations.
//! Each store implements the [`KeyValueStore`] port defined in `kvc-domain`;
//! the cache client, distributed lock and id generator in
//! `kvc-infrastructure` are all built on top of that single port.
//!
//! ## Stores
//!
//! | Store | Feature | Description |
//! |-------|---------|-------------|
//! | `InMemoryStore` | `store-memory` | Process-local sharded map |
//! | `RedisStore` | `store-redis` | Shared Redis server |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! kvc-providers = { version = "0.1", default-features = false, features = ["store-redis"] }
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use kvc_providers::store::InMemoryStore;
//! use kvc_providers::KeyValueStore;
//!
//! let store = InMemoryStore::new();
//! store.set("cache:shop:1", "{}", None).await?;
//! ```

// Re-export kvc-domain types commonly used with providers
pub use kvc_domain::error::{Error, Result};
pub use kvc_domain::ports::providers::{KeyTtl, KeyValueStore};

/// Provider-specific constants
pub mod constants;

/// Key-value store implementations
///
/// Implements `KeyValueStore` for in-process and Redis backends.
pub mod store;
