//! Record Loader Port
//!
//! The database fallback consulted on a cache miss. The persistence layer
//! behind it is not part of this workspace.

use crate::error::Result;
use async_trait::async_trait;
use std::future::Future;

/// Authoritative source for cached records
///
/// Implementations must be idempotent and safe to call concurrently.
/// Any `Fn(Id) -> impl Future<Output = Result<Option<V>>>` closure is a loader.
///
/// # Example
///
/// ```ignore
/// let loader = |id: u64| async move { repository.find_shop(id).await };
/// let shop = cache.fetch_or_load("cache:shop:", 1, ttl, &loader).await?;
/// ```
#[async_trait]
pub trait RecordLoader<Id, V>: Send + Sync
where
    Id: Send + 'static,
    V: Send + 'static,
{
    /// Load the record for `id`, or `None` if it does not exist
    async fn load(&self, id: Id) -> Result<Option<V>>;
}

#[async_trait]
impl<Id, V, F, Fut> RecordLoader<Id, V> for F
where
    F: Fn(Id) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<V>>> + Send,
    Id: Send + 'static,
    V: Send + 'static,
{
    async fn load(&self, id: Id) -> Result<Option<V>> {
        (self)(id).await
    }
}
