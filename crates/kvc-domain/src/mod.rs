//! # KVC Domain Layer
//!
//! Core types and port contracts for a cache-aside layer over a shared
//! key-value store, its distributed lock and its id generator.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`constants`] | Stored formats and stable defaults |
//! | [`error`] | Domain error type and `Result` alias |
//! | [`ports`] | Store, lock, executor, clock, codec and loader contracts |
//! | [`value_objects`] | Logical-expiry envelope and generated ids |
//!
//! Implementations live in `kvc-providers` (stores) and
//! `kvc-infrastructure` (cache client, lock, id generator, worker pool).

/// Domain-level constants
pub mod constants;
/// Error handling types
pub mod error;
/// Boundary contracts
pub mod ports;
/// Value objects
pub mod value_objects;

// Re-export commonly used types
pub use error::{Error, Result};
pub use ports::{
    Clock, JsonCodec, KeyTtl, KeyValueStore, LockGuard, LockProvider, RebuildJob, RecordLoader,
    SystemClock, TaskExecutor, ValueCodec,
};
pub use value_objects::{GeneratedId, LogicalEnvelope};
