//! # KVC
//!
//! Cache-aside over a shared key-value store.
//!
//! This crate is the public API. It re-exports the domain types, the store
//! providers and the infrastructure services.
//!
//! ## Features
//!
//! - **Penetration defense**: absent records are cached as a short-lived null marker
//! - **Breakdown defense**: logical expiry serves stale values while one
//!   background rebuild per key refreshes them
//! - **Mutex pass-through**: concurrent misses load once under a store lock
//! - **Distributed ids**: time-ordered 64-bit ids from a per-day store counter
//!
//! ## Example
//!
//! ```ignore
//! use kvc::infrastructure::config::AppConfig;
//! use kvc::init_app;
//!
//! let app = init_app(AppConfig::default()).await?;
//! let shop: Option<Shop> = app
//!     .cache
//!     .fetch_or_load("cache:shop:", 1_u64, app.cache.default_ttl(), &loader)
//!     .await?;
//! let order_id = app.ids.next_id("order").await?;
//! app.shutdown().await;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Ports, value objects and the error type
//! - `providers` - In-memory and Redis key-value stores
//! - `infrastructure` - Cache client, lock, id generator, rebuild pool, config and logging

/// Domain layer - ports, value objects and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use kvc_domain::*;
}

/// Store providers
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use kvc_providers::*;
}

/// Infrastructure layer - cache client, lock, ids, pool, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use kvc_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the composition root and the main services
pub use infrastructure::di::{init_app, init_app_with_store, AppContext};
pub use infrastructure::executor::{InlineExecutor, RebuildPool};
pub use infrastructure::id::IdGenerator;
pub use infrastructure::lock::StoreLockProvider;
pub use infrastructure::{CacheClient, CacheStats};
pub use providers::store::{InMemoryStore, RedisStore};
