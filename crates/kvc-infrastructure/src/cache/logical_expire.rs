//! Logical-expiry read with asynchronous rebuild
//!
//! Entries never expire in the store; each carries an `expire_at`. A reader
//! that finds a stale entry returns it at once and, if it wins the entry's
//! lock, hands a rebuild to the executor. At most one rebuild per key runs
//! at a time and readers never wait for it.

use super::client::CacheClient;
use super::keys::CacheKey;
use super::{is_null_marker, validate_ttl};
use futures::FutureExt;
use kvc_domain::error::Result;
use kvc_domain::ports::{LockGuard, RecordLoader, ValueCodec};
use kvc_domain::value_objects::LogicalEnvelope;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

impl<C: ValueCodec> CacheClient<C> {
    /// Read the logical entry at `key_prefix + id`
    ///
    /// Returns `None` when nothing (or a null marker) is stored; the cache is
    /// expected to be pre-warmed with [`CacheClient::store_with_logical_expiry`].
    /// A stale value is returned as-is while a rebuild writes a fresh one
    /// expiring `logical_ttl` after it completes.
    ///
    /// # Errors
    /// Store errors from the read or the lock attempt, and decode errors.
    /// Rebuild failures are logged, never returned.
    pub async fn fetch_or_load_logical<Id, V, L>(
        &self,
        key_prefix: &str,
        id: Id,
        loader: Arc<L>,
        logical_ttl: Duration,
    ) -> Result<Option<V>>
    where
        Id: Display + Send + 'static,
        V: Serialize + DeserializeOwned + Send + Sync + 'static,
        L: RecordLoader<Id, V> + ?Sized + 'static,
    {
        validate_ttl(logical_ttl, "logical TTL")?;
        let key = CacheKey::compose(key_prefix, &id)?;

        let raw = match self.store.get(&key).await? {
            None => {
                self.stats.miss();
                return Ok(None);
            }
            Some(raw) if is_null_marker(&raw) => {
                self.stats.null_hit();
                return Ok(None);
            }
            Some(raw) => raw,
        };

        let envelope: LogicalEnvelope<V> = self.codec.decode(&raw)?;
        if !envelope.is_expired_at(self.clock.now()) {
            self.stats.hit();
            return Ok(Some(envelope.into_data()));
        }

        self.stats.stale_hit();
        debug!(key = %key, expire_at = %envelope.expire_at, "Serving stale value");
        self.schedule_rebuild::<Id, V, L>(key, id, loader, logical_ttl)
            .await?;
        Ok(Some(envelope.into_data()))
    }

    async fn schedule_rebuild<Id, V, L>(
        &self,
        key: String,
        id: Id,
        loader: Arc<L>,
        logical_ttl: Duration,
    ) -> Result<()>
    where
        Id: Send + 'static,
        V: Serialize + Send + Sync + 'static,
        L: RecordLoader<Id, V> + ?Sized + 'static,
    {
        let lock_key = self.lock_key(&key);
        let Some(guard) = self.lock.try_acquire(&lock_key, self.policy.lock_ttl).await? else {
            self.stats.rebuild_skipped();
            debug!(key = %key, lock_key = %lock_key, "Rebuild already in progress");
            return Ok(());
        };

        let job = self
            .clone()
            .run_rebuild::<Id, V, L>(key.clone(), id, loader, logical_ttl, guard.clone())
            .boxed();

        match self.executor.submit(job).await {
            Ok(()) => {
                self.stats.rebuild_scheduled();
                debug!(key = %key, executor = self.executor.name(), "Rebuild scheduled");
            }
            Err(e) => {
                // The rejected job was dropped unrun, so its lock is ours to free
                self.stats.rebuild_rejected();
                warn!(key = %key, error = %e, "Rebuild rejected, serving stale value");
                self.release_quietly(&guard).await;
            }
        }
        Ok(())
    }

    async fn run_rebuild<Id, V, L>(
        self,
        key: String,
        id: Id,
        loader: Arc<L>,
        logical_ttl: Duration,
        guard: LockGuard,
    ) where
        Id: Send + 'static,
        V: Serialize + Send + Sync + 'static,
        L: RecordLoader<Id, V> + ?Sized + 'static,
    {
        let rebuild = self.rebuild_entry::<Id, V, L>(&key, id, loader.as_ref(), logical_ttl);
        let outcome = AssertUnwindSafe(rebuild).catch_unwind().await;

        match outcome {
            Ok(Ok(())) => {
                self.stats.rebuild_completed();
                info!(key = %key, "Cache entry rebuilt");
            }
            Ok(Err(e)) => {
                self.stats.rebuild_failed();
                error!(key = %key, error = %e, "Cache rebuild failed");
            }
            Err(_) => {
                self.stats.rebuild_failed();
                error!(key = %key, "Cache rebuild panicked");
            }
        }

        self.release_quietly(&guard).await;
    }

    async fn rebuild_entry<Id, V, L>(
        &self,
        key: &str,
        id: Id,
        loader: &L,
        logical_ttl: Duration,
    ) -> Result<()>
    where
        Id: Send + 'static,
        V: Serialize + Send + Sync + 'static,
        L: RecordLoader<Id, V> + ?Sized,
    {
        self.stats.loader_call();
        match loader.load(id).await? {
            Some(value) => {
                self.store_with_logical_expiry(key, &value, logical_ttl)
                    .await
            }
            None => {
                self.store.delete(key).await?;
                debug!(key, "Record no longer exists, removed logical entry");
                Ok(())
            }
        }
    }
}
