//! Cache client
//!
//! Holds the collaborators shared by every strategy and the plain write and
//! read helpers. The strategies live in sibling modules as further `impl`
//! blocks on [`CacheClient`].

use super::keys::CacheKey;
use super::stats::{CacheStats, StatsRecorder};
use super::{is_null_marker, validate_ttl};
use crate::config::{CacheConfig, LockConfig};
use kvc_domain::constants::NULL_MARKER;
use kvc_domain::error::Result;
use kvc_domain::ports::{
    Clock, JsonCodec, KeyValueStore, LockGuard, LockProvider, RecordLoader, SystemClock,
    TaskExecutor, ValueCodec,
};
use kvc_domain::value_objects::LogicalEnvelope;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Timing and key settings applied by every strategy
#[derive(Debug, Clone)]
pub(crate) struct CachePolicy {
    pub(crate) default_ttl: Duration,
    pub(crate) null_ttl: Duration,
    pub(crate) logical_ttl: Duration,
    pub(crate) lock_ttl: Duration,
    pub(crate) lock_key_prefix: String,
    pub(crate) retry_interval: Duration,
    pub(crate) max_attempts: u32,
}

impl CachePolicy {
    fn from_config(cache: &CacheConfig, lock: &LockConfig) -> Self {
        Self {
            default_ttl: cache.default_ttl(),
            null_ttl: cache.null_ttl(),
            logical_ttl: cache.logical_ttl(),
            lock_ttl: lock.ttl(),
            lock_key_prefix: lock.key_prefix.clone(),
            retry_interval: lock.retry_interval(),
            max_attempts: lock.max_attempts,
        }
    }
}

/// What a single read of a pass-through key found
pub(crate) enum Lookup<V> {
    Hit(V),
    NullMarker,
    Miss,
}

/// Cache-aside client
///
/// Cloning is cheap; clones share collaborators and counters.
pub struct CacheClient<C: ValueCodec = JsonCodec> {
    pub(crate) store: Arc<dyn KeyValueStore>,
    pub(crate) lock: Arc<dyn LockProvider>,
    pub(crate) executor: Arc<dyn TaskExecutor>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) codec: Arc<C>,
    pub(crate) policy: CachePolicy,
    pub(crate) stats: Arc<StatsRecorder>,
}

impl CacheClient<JsonCodec> {
    /// Create a client with default TTLs, the system clock and the JSON codec
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        lock: Arc<dyn LockProvider>,
        executor: Arc<dyn TaskExecutor>,
    ) -> Self {
        Self {
            store,
            lock,
            executor,
            clock: Arc::new(SystemClock),
            codec: Arc::new(JsonCodec::new()),
            policy: CachePolicy::from_config(&CacheConfig::default(), &LockConfig::default()),
            stats: Arc::new(StatsRecorder::default()),
        }
    }
}

// Construction and configuration
impl<C: ValueCodec> CacheClient<C> {
    /// Apply cache TTL settings
    pub fn with_config(mut self, config: &CacheConfig) -> Self {
        self.policy.default_ttl = config.default_ttl();
        self.policy.null_ttl = config.null_ttl();
        self.policy.logical_ttl = config.logical_ttl();
        self
    }

    /// Apply lock settings
    ///
    /// A `max_attempts` of zero is raised to one so the cache is always read.
    pub fn with_lock_config(mut self, config: &LockConfig) -> Self {
        self.policy.lock_ttl = config.ttl();
        self.policy.lock_key_prefix.clone_from(&config.key_prefix);
        self.policy.retry_interval = config.retry_interval();
        self.policy.max_attempts = config.max_attempts.max(1);
        self
    }

    /// Use a different time source for logical expiry
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use a different value codec
    pub fn with_codec<C2: ValueCodec>(self, codec: C2) -> CacheClient<C2> {
        CacheClient {
            store: self.store,
            lock: self.lock,
            executor: self.executor,
            clock: self.clock,
            codec: Arc::new(codec),
            policy: self.policy,
            stats: self.stats,
        }
    }

    /// TTL of positive pass-through entries
    pub fn default_ttl(&self) -> Duration {
        self.policy.default_ttl
    }

    /// TTL of null markers
    pub fn null_ttl(&self) -> Duration {
        self.policy.null_ttl
    }

    /// Logical TTL used by rebuilds unless a caller passes its own
    pub fn logical_ttl(&self) -> Duration {
        self.policy.logical_ttl
    }

    /// Lock key guarding `cache_key`
    pub fn lock_key(&self, cache_key: &str) -> String {
        CacheKey::lock_key(&self.policy.lock_key_prefix, cache_key)
    }

    /// Counter snapshot
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

// Write helpers
impl<C: ValueCodec> CacheClient<C> {
    /// Write `value` under `key` with a store-native TTL
    pub async fn store<V>(&self, key: &str, value: &V, ttl: Duration) -> Result<()>
    where
        V: Serialize + Sync + ?Sized,
    {
        CacheKey::validate(key)?;
        validate_ttl(ttl, "cache TTL")?;
        let raw = self.codec.encode(value)?;
        self.store.set(key, &raw, Some(ttl)).await
    }

    /// Write `value` under `key` in an envelope expiring `logical_ttl` from now
    ///
    /// The entry has no store TTL; it stays until overwritten or invalidated.
    pub async fn store_with_logical_expiry<V>(
        &self,
        key: &str,
        value: &V,
        logical_ttl: Duration,
    ) -> Result<()>
    where
        V: Serialize + Sync,
    {
        CacheKey::validate(key)?;
        validate_ttl(logical_ttl, "logical TTL")?;
        let envelope = LogicalEnvelope::expiring_after(value, logical_ttl, self.clock.now())?;
        let raw = self.codec.encode(&envelope)?;
        self.store.set(key, &raw, None).await
    }

    /// Delete `key`; true if a live entry was removed
    pub async fn invalidate(&self, key: &str) -> Result<bool> {
        CacheKey::validate(key)?;
        let removed = self.store.delete(key).await?;
        debug!(key, removed, "Invalidated cache key");
        Ok(removed)
    }
}

// Read helpers
impl<C: ValueCodec> CacheClient<C> {
    /// Read a pass-through entry; a null marker reads as `None`
    pub async fn get<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>> {
        CacheKey::validate(key)?;
        Ok(match self.lookup(key).await? {
            Lookup::Hit(value) => Some(value),
            Lookup::NullMarker | Lookup::Miss => None,
        })
    }

    /// Read a logical entry with its expiry, stale or not
    pub async fn get_logical<V: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<LogicalEnvelope<V>>> {
        CacheKey::validate(key)?;
        match self.store.get(key).await? {
            Some(raw) if !is_null_marker(&raw) => Ok(Some(self.codec.decode(&raw)?)),
            _ => Ok(None),
        }
    }

    pub(crate) async fn lookup<V: DeserializeOwned>(&self, key: &str) -> Result<Lookup<V>> {
        Ok(match self.store.get(key).await? {
            None => Lookup::Miss,
            Some(raw) if is_null_marker(&raw) => Lookup::NullMarker,
            Some(raw) => Lookup::Hit(self.codec.decode(&raw)?),
        })
    }

    /// Run the loader and cache its answer: the value with `ttl`, or a null marker
    pub(crate) async fn load_and_populate<Id, V, L>(
        &self,
        key: &str,
        id: Id,
        ttl: Duration,
        loader: &L,
    ) -> Result<Option<V>>
    where
        Id: Send + 'static,
        V: Serialize + Send + Sync + 'static,
        L: RecordLoader<Id, V> + ?Sized,
    {
        self.stats.loader_call();
        match loader.load(id).await? {
            Some(value) => {
                let raw = self.codec.encode(&value)?;
                self.store.set(key, &raw, Some(ttl)).await?;
                debug!(key, "Cached loaded value");
                Ok(Some(value))
            }
            None => {
                self.store
                    .set(key, NULL_MARKER, Some(self.policy.null_ttl))
                    .await?;
                debug!(key, "Cached null marker");
                Ok(None)
            }
        }
    }

    /// Release a lock, logging instead of failing
    pub(crate) async fn release_quietly(&self, guard: &LockGuard) {
        if let Err(e) = self.lock.release(guard).await {
            warn!(lock_key = %guard.key, error = %e, "Failed to release lock");
        }
    }
}

impl<C: ValueCodec> Clone for CacheClient<C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            lock: Arc::clone(&self.lock),
            executor: Arc::clone(&self.executor),
            clock: Arc::clone(&self.clock),
            codec: Arc::clone(&self.codec),
            policy: self.policy.clone(),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<C: ValueCodec> fmt::Debug for CacheClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheClient")
            .field("store", &self.store.provider_name())
            .field("executor", &self.executor.name())
            .field("codec", &self.codec.name())
            .field("policy", &self.policy)
            .finish()
    }
}
