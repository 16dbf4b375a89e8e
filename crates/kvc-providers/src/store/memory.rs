//! In-memory key-value store
//!
//! Process-local implementation of the [`KeyValueStore`] port backed by a
//! sharded concurrent map. Suitable for single-instance deployments and tests.
//!
//! ## Features
//!
//! - Per-entry store-native TTL, checked lazily on access
//! - Atomic conditional set, compare-and-delete and increment per key
//! - Expiry follows `tokio::time`, so paused test clocks apply
//!
//! ## Example
//!
//! ```ignore
//! use kvc_providers::store::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! store.set("cache:shop:1", "{\"id\":1}", None).await?;
//! ```

use super::validate_ttl;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use kvc_domain::error::{Error, Result};
use kvc_domain::ports::providers::{KeyTtl, KeyValueStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    expires_at: Option<Instant>,
}

impl StoredValue {
    fn new(value: &str, ttl: Option<Duration>, now: Instant) -> Self {
        Self {
            value: value.to_string(),
            expires_at: ttl.and_then(|ttl| now.checked_add(ttl)),
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| at > now)
    }
}

/// In-memory store
///
/// Cloning is cheap and clones share the same entries.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<DashMap<String, StoredValue>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|entry| entry.value().is_live(now))
            .count()
    }

    /// Whether the store holds no live entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop entries whose TTL has elapsed
    ///
    /// # Returns
    /// Number of entries removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, value| value.is_live(now));
        before.saturating_sub(self.entries.len())
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if entry.is_live(now) => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove_if(key, |_, value| !value.is_live(now));
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        if let Some(ttl) = ttl {
            validate_ttl(ttl)?;
        }
        let now = Instant::now();
        self.entries
            .insert(key.to_string(), StoredValue::new(value, ttl, now));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .remove(key)
            .is_some_and(|(_, value)| value.is_live(now)))
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        validate_ttl(ttl)?;
        let now = Instant::now();
        let created = match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_live(now) {
                    false
                } else {
                    occupied.insert(StoredValue::new(value, Some(ttl), now));
                    true
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(StoredValue::new(value, Some(ttl), now));
                true
            }
        };
        Ok(created)
    }

    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .remove_if(key, |_, value| value.is_live(now) && value.value == expected)
            .is_some())
    }

    async fn increment(&self, key: &str) -> Result<i64> {
        let now = Instant::now();
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) if occupied.get().is_live(now) => {
                let current: i64 = occupied.get().value.parse().map_err(|_| {
                    Error::store(format!("value at {key} is not an integer"))
                })?;
                let next = current
                    .checked_add(1)
                    .ok_or_else(|| Error::store(format!("increment would overflow at {key}")))?;
                occupied.get_mut().value = next.to_string();
                Ok(next)
            }
            Entry::Occupied(mut occupied) => {
                occupied.insert(StoredValue::new("1", None, now));
                Ok(1)
            }
            Entry::Vacant(vacant) => {
                vacant.insert(StoredValue::new("1", None, now));
                Ok(1)
            }
        }
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        validate_ttl(ttl)?;
        let now = Instant::now();
        match self.entries.get_mut(key) {
            Some(mut entry) if entry.is_live(now) => {
                entry.expires_at = now.checked_add(ttl);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn time_to_live(&self, key: &str) -> Result<KeyTtl> {
        let now = Instant::now();
        let ttl = match self.entries.get(key) {
            Some(entry) if entry.is_live(now) => match entry.expires_at {
                Some(at) => KeyTtl::Expires(at.saturating_duration_since(now)),
                None => KeyTtl::Persistent,
            },
            _ => KeyTtl::Missing,
        };
        Ok(ttl)
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("entries", &self.entries.len())
            .finish()
    }
}
