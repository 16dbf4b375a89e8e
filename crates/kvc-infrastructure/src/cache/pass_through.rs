//! Pass-through read with null caching
//!
//! A confirmed-absent record is cached as a short-lived null marker, so
//! repeated lookups of a missing id stop reaching the loader.

use super::client::{CacheClient, Lookup};
use super::keys::CacheKey;
use super::validate_ttl;
use kvc_domain::error::Result;
use kvc_domain::ports::{RecordLoader, ValueCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::time::Duration;
use tracing::debug;

impl<C: ValueCodec> CacheClient<C> {
    /// Read `key_prefix + id`, falling back to `loader` on a miss
    ///
    /// - hit: the cached value, loader not called
    /// - null marker: `None`, loader not called
    /// - miss: loader result cached with `ttl`, or a null marker when absent
    ///
    /// No lock is taken; concurrent misses may each call the loader.
    pub async fn fetch_or_load<Id, V, L>(
        &self,
        key_prefix: &str,
        id: Id,
        ttl: Duration,
        loader: &L,
    ) -> Result<Option<V>>
    where
        Id: Display + Send + 'static,
        V: Serialize + DeserializeOwned + Send + Sync + 'static,
        L: RecordLoader<Id, V> + ?Sized,
    {
        validate_ttl(ttl, "cache TTL")?;
        let key = CacheKey::compose(key_prefix, &id)?;

        match self.lookup(&key).await? {
            Lookup::Hit(value) => {
                self.stats.hit();
                debug!(key = %key, "Cache hit");
                return Ok(Some(value));
            }
            Lookup::NullMarker => {
                self.stats.null_hit();
                debug!(key = %key, "Null marker hit");
                return Ok(None);
            }
            Lookup::Miss => self.stats.miss(),
        }

        self.load_and_populate(&key, id, ttl, loader).await
    }
}
