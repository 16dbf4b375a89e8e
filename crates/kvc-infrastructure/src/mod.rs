//! # Infrastructure Layer
//!
//! Cache-aside client, distributed lock, id generator and the cross-cutting
//! concerns that support them. Store implementations are in `kvc-providers`.
//!
//! ## Module Categories
//!
//! ### Caching
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Pass-through, logical-expiry and mutex-guarded strategies |
//! | [`executor`] | Rebuild worker pool and inline executor |
//!
//! ### Coordination
//! | Module | Description |
//! |--------|-------------|
//! | [`lock`] | Distributed lock over the shared store |
//! | [`id`] | Daily-counter id generator |
//!
//! ### Configuration & Wiring
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-layered TOML and environment configuration |
//! | [`di`] | Composition root |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod cache;
pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod executor;
pub mod id;
pub mod lock;
pub mod logging;
pub mod utils;

// Re-export commonly used types
pub use cache::{CacheClient, CacheStats};
pub use di::{init_app, AppContext};
pub use error_ext::ErrorContext;
