//! Mutex-guarded pass-through read
//!
//! Like the plain pass-through, but on a miss only the lock holder calls the
//! loader; everyone else sleeps and re-reads until the entry appears or the
//! attempt budget runs out.

use super::client::{CacheClient, Lookup};
use super::keys::CacheKey;
use super::validate_ttl;
use kvc_domain::error::{Error, Result};
use kvc_domain::ports::{RecordLoader, ValueCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, warn};

impl<C: ValueCodec> CacheClient<C> {
    /// Read `key_prefix + id`, loading under the key's lock on a miss
    ///
    /// Dropping the returned future stops waiting; a lock held at that point
    /// is freed by its TTL.
    ///
    /// # Errors
    /// `LockTimeout` after the configured number of attempts; store, decode
    /// and loader errors propagate (the lock is released first).
    pub async fn fetch_or_load_with_mutex<Id, V, L>(
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
        let lock_key = self.lock_key(&key);
        let max_attempts = self.policy.max_attempts;

        for attempt in 1..=max_attempts {
            match self.lookup(&key).await? {
                Lookup::Hit(value) => {
                    self.stats.hit();
                    return Ok(Some(value));
                }
                Lookup::NullMarker => {
                    self.stats.null_hit();
                    return Ok(None);
                }
                Lookup::Miss if attempt == 1 => self.stats.miss(),
                Lookup::Miss => {}
            }

            if let Some(guard) = self.lock.try_acquire(&lock_key, self.policy.lock_ttl).await? {
                let result = self.populate_under_lock(&key, id, ttl, loader).await;
                self.release_quietly(&guard).await;
                return result;
            }

            self.stats.lock_contention();
            debug!(key = %key, lock_key = %lock_key, attempt, "Lock busy, waiting");
            if attempt < max_attempts {
                tokio::time::sleep(self.policy.retry_interval).await;
            }
        }

        warn!(key = %key, lock_key = %lock_key, max_attempts, "Gave up waiting for lock");
        Err(Error::lock_timeout(lock_key, max_attempts))
    }

    async fn populate_under_lock<Id, V, L>(
        &self,
        key: &str,
        id: Id,
        ttl: Duration,
        loader: &L,
    ) -> Result<Option<V>>
    where
        Id: Send + 'static,
        V: Serialize + DeserializeOwned + Send + Sync + 'static,
        L: RecordLoader<Id, V> + ?Sized,
    {
        // The previous holder may have populated the key since our read
        match self.lookup(key).await? {
            Lookup::Hit(value) => {
                self.stats.hit();
                Ok(Some(value))
            }
            Lookup::NullMarker => {
                self.stats.null_hit();
                Ok(None)
            }
            Lookup::Miss => self.load_and_populate(key, id, ttl, loader).await,
        }
    }
}
