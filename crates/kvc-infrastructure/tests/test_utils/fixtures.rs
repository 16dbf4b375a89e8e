//! Shared fixtures

use async_trait::async_trait;
use kvc_domain::error::{Error, Result};
use kvc_domain::ports::{KeyTtl, KeyValueStore, RebuildJob, RecordLoader, TaskExecutor};
use kvc_infrastructure::cache::CacheClient;
use kvc_infrastructure::config::LockConfig;
use kvc_infrastructure::lock::StoreLockProvider;
use kvc_providers::store::InMemoryStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

pub const SHOP_PREFIX: &str = "cache:shop:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: u64,
    pub name: String,
}

impl Shop {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// Loader over a fixed set of shops that counts its calls
#[derive(Debug, Default)]
pub struct CountingLoader {
    shops: HashMap<u64, Shop>,
    calls: AtomicUsize,
    delay: Option<Duration>,
    fail: bool,
}

impl CountingLoader {
    pub fn with_shops(shops: impl IntoIterator<Item = Shop>) -> Self {
        Self {
            shops: shops.into_iter().map(|shop| (shop.id, shop)).collect(),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordLoader<u64, Shop> for CountingLoader {
    async fn load(&self, id: u64) -> Result<Option<Shop>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(Error::loader(format!("database unavailable for shop {id}")));
        }
        Ok(self.shops.get(&id).cloned())
    }
}

/// Loader that blocks until the test opens its gate
#[derive(Debug)]
pub struct GatedLoader {
    shop: Shop,
    gate: Semaphore,
    calls: AtomicUsize,
}

impl GatedLoader {
    pub fn new(shop: Shop) -> Self {
        Self {
            shop,
            gate: Semaphore::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn open(&self) {
        self.gate.add_permits(1_000);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordLoader<u64, Shop> for GatedLoader {
    async fn load(&self, _id: u64) -> Result<Option<Shop>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| Error::loader_with_source("gate closed", e))?;
        Ok(Some(self.shop.clone()))
    }
}

/// Loader that panics
#[derive(Debug, Default)]
pub struct PanickingLoader;

#[async_trait]
impl RecordLoader<u64, Shop> for PanickingLoader {
    async fn load(&self, id: u64) -> Result<Option<Shop>> {
        panic!("loader blew up for shop {id}");
    }
}

/// Store whose every operation fails as unavailable
#[derive(Debug, Default)]
pub struct FailingStore;

fn unavailable() -> Error {
    Error::store("store unavailable")
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(unavailable())
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<()> {
        Err(unavailable())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Err(unavailable())
    }

    async fn set_if_absent(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<bool> {
        Err(unavailable())
    }

    async fn delete_if_equals(&self, _key: &str, _expected: &str) -> Result<bool> {
        Err(unavailable())
    }

    async fn increment(&self, _key: &str) -> Result<i64> {
        Err(unavailable())
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> Result<bool> {
        Err(unavailable())
    }

    async fn time_to_live(&self, _key: &str) -> Result<KeyTtl> {
        Err(unavailable())
    }

    fn provider_name(&self) -> &str {
        "failing"
    }
}

/// Executor that refuses every job
#[derive(Debug, Default)]
pub struct RejectingExecutor {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl TaskExecutor for RejectingExecutor {
    async fn submit(&self, _job: RebuildJob) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Error::executor("queue full"))
    }

    fn name(&self) -> &str {
        "rejecting"
    }
}

/// Client over a fresh in-memory store, returning the store for inspection
pub fn memory_client(executor: Arc<dyn TaskExecutor>) -> (Arc<InMemoryStore>, CacheClient) {
    memory_client_with_lock(executor, &LockConfig::default())
}

pub fn memory_client_with_lock(
    executor: Arc<dyn TaskExecutor>,
    lock_config: &LockConfig,
) -> (Arc<InMemoryStore>, CacheClient) {
    let store = Arc::new(InMemoryStore::new());
    let lock = Arc::new(StoreLockProvider::from_config(store.clone(), lock_config));
    let client = CacheClient::new(store.clone(), lock, executor).with_lock_config(lock_config);
    (store, client)
}
