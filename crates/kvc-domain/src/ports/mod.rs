//! Domain Port Interfaces
//!
//! Defines all boundary contracts between domain and external layers.
//! This follows the Dependency Inversion Principle:
//! - High-level modules (domain) define interfaces
//! - Low-level modules (providers, infrastructure) implement them
//!
//! ## Organization
//!
//! - **infrastructure/** - Infrastructure services (locks, executors, clocks)
//! - **providers/** - External collaborators (backing store, codec, loader)

/// Infrastructure service ports
pub mod infrastructure;
/// External service provider ports
pub mod providers;

// Re-export commonly used port traits for convenience
pub use infrastructure::{
    Clock, LockGuard, LockProvider, RebuildJob, SystemClock, TaskExecutor,
};
pub use providers::{JsonCodec, KeyTtl, KeyValueStore, RecordLoader, ValueCodec};
