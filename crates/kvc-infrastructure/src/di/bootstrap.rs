//! Composition root
//!
//! Builds every component from an [`AppConfig`]:
//!
//! ```text
//! AppConfig → KeyValueStore ─┬→ StoreLockProvider ─┐
//!                            │   RebuildPool ──────┼→ CacheClient
//!                            └→ IdGenerator        │
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = ConfigLoader::new().load()?;
//! init_logging(config.logging.clone())?;
//! let context = init_app(config).await?;
//!
//! let shop: Option<Shop> = context
//!     .cache
//!     .fetch_or_load("cache:shop:", 1, context.cache.default_ttl(), &load_shop)
//!     .await?;
//! let order_id = context.ids.next_id("order").await?;
//!
//! context.shutdown().await;
//! ```

use crate::cache::CacheClient;
use crate::config::loader::validate_app_config;
use crate::config::{AppConfig, StoreConfig, StoreProvider};
use crate::executor::RebuildPool;
use crate::id::IdGenerator;
use crate::lock::StoreLockProvider;
use kvc_domain::error::Result;
use kvc_domain::ports::KeyValueStore;
use kvc_providers::constants::REDIS_DEFAULT_URL;
use kvc_providers::store::{InMemoryStore, RedisStore};
use std::sync::Arc;
use tracing::info;

/// Application context holding the wired components
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Shared backing store
    pub store: Arc<dyn KeyValueStore>,
    /// Distributed lock over the store
    pub lock: Arc<StoreLockProvider>,
    /// Worker pool running cache rebuilds
    pub rebuild_pool: Arc<RebuildPool>,
    /// Cache-aside client
    pub cache: CacheClient,
    /// Distributed id generator
    pub ids: IdGenerator,
}

impl AppContext {
    /// Drain pending rebuilds and stop the pool
    pub async fn shutdown(&self) {
        self.rebuild_pool.shutdown().await;
        info!("Application context shut down");
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("store", &self.store.provider_name())
            .field("lock", &self.lock)
            .field("rebuild_pool", &self.rebuild_pool)
            .field("cache", &self.cache)
            .field("ids", &self.ids)
            .finish()
    }
}

/// Build the store selected by configuration
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>> {
    Ok(match config.provider {
        StoreProvider::Memory => Arc::new(InMemoryStore::new()),
        StoreProvider::Redis => {
            let url = config.redis_url.as_deref().unwrap_or(REDIS_DEFAULT_URL);
            Arc::new(RedisStore::new(url)?)
        }
    })
}

/// Initialize the application context from configuration
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    validate_app_config(&config)?;
    let store = create_store(&config.store)?;
    init_app_with_store(config, store).await
}

/// Initialize the application context around an existing store
pub async fn init_app_with_store(
    config: AppConfig,
    store: Arc<dyn KeyValueStore>,
) -> Result<AppContext> {
    validate_app_config(&config)?;

    let lock = Arc::new(StoreLockProvider::from_config(
        Arc::clone(&store),
        &config.lock,
    ));
    let rebuild_pool = Arc::new(RebuildPool::start(&config.rebuild)?);

    let cache = CacheClient::new(Arc::clone(&store), lock.clone(), rebuild_pool.clone())
        .with_config(&config.cache)
        .with_lock_config(&config.lock);
    let ids = IdGenerator::from_config(Arc::clone(&store), &config.id);

    info!(
        store = store.provider_name(),
        workers = rebuild_pool.worker_count(),
        "Application context initialized"
    );

    Ok(AppContext {
        config: Arc::new(config),
        store,
        lock,
        rebuild_pool,
        cache,
        ids,
    })
}
