//! External Provider Ports
//!
//! Ports for the collaborators the cache layer depends on but does not own.
//!
//! ## Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | KeyValueStore | Shared backing store (get/set/NX/INCR/expire) |
//! | ValueCodec | Serializer for stored values |
//! | RecordLoader | Database fallback for cache misses |

/// Value codec port
pub mod codec;
/// Record loader port
pub mod loader;
/// Key-value store port
pub mod store;

// Re-export provider ports for convenience
pub use codec::{JsonCodec, ValueCodec};
pub use loader::RecordLoader;
pub use store::{KeyTtl, KeyValueStore};
