//! Key-Value Store Port
//!
//! Port for the shared backing store every cache component coordinates
//! through. Implementations include an in-process store and Redis.
//!
//! Values are UTF-8 strings as produced by a [`ValueCodec`]. An entry whose
//! store-native TTL has elapsed behaves as missing for every operation.
//!
//! [`ValueCodec`]: super::codec::ValueCodec

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Remaining lifetime of a stored key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    /// No live entry under the key
    Missing,
    /// Entry exists and never expires on its own
    Persistent,
    /// Entry exists and expires after the given duration
    Expires(Duration),
}

impl KeyTtl {
    /// Whether a live entry exists under the key
    pub fn exists(&self) -> bool {
        !matches!(self, Self::Missing)
    }
}

/// Backing store port
///
/// # Example
///
/// ```ignore
/// use kvc_domain::ports::providers::KeyValueStore;
/// use std::time::Duration;
///
/// store.set("cache:shop:1", &json, Some(Duration::from_secs(1800))).await?;
/// if store.set_if_absent("lock:cache:shop:1", "1", Duration::from_secs(10)).await? {
///     // lock held
/// }
/// let next = store.increment("icr:order:2024:05:01").await?;
/// ```
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous entry
    ///
    /// `ttl` of `None` stores the entry without store-native expiry.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;

    /// Delete `key`
    ///
    /// # Returns
    /// True if a live entry was removed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Atomically write `value` with `ttl` only if no live entry exists
    ///
    /// # Returns
    /// True iff this call created the entry
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool>;

    /// Atomically delete `key` only if it currently holds `expected`
    ///
    /// # Returns
    /// True if the entry matched and was removed
    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool>;

    /// Atomically increment the integer counter under `key`
    ///
    /// A missing key starts from zero. A non-integer value is a store error.
    ///
    /// # Returns
    /// The post-increment value
    async fn increment(&self, key: &str) -> Result<i64>;

    /// Set a store-native TTL on an existing key
    ///
    /// # Returns
    /// True if the key existed and the TTL was applied
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool>;

    /// Inspect the remaining lifetime of `key`
    async fn time_to_live(&self, key: &str) -> Result<KeyTtl>;

    /// Get the name/identifier of this store implementation
    ///
    /// # Returns
    /// A string identifier for the store (e.g., "memory", "redis")
    fn provider_name(&self) -> &str;
}
