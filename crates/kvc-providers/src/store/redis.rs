//! Redis key-value store
//!
//! Distributed implementation of the [`KeyValueStore`] port. Every instance
//! pointing at the same Redis shares cache entries, locks and id counters.
//!
//! ## Features
//!
//! - `SET .. PX` for store-native TTLs, `SET .. NX PX` for lock acquisition
//! - Lua compare-and-delete for token-checked lock release
//! - Lazily established, auto-reconnecting connection manager
//!
//! ## Example
//!
//! ```ignore
//! use kvc_providers::store::RedisStore;
//!
//! let store = RedisStore::new("redis://localhost:6379")?;
//! // Or with host/port
//! let store = RedisStore::with_host_port("localhost", 6379)?;
//! ```

use super::validate_ttl;
use crate::constants::COMPARE_AND_DELETE_SCRIPT;
use async_trait::async_trait;
use kvc_domain::error::{Error, Result};
use kvc_domain::ports::providers::{KeyTtl, KeyValueStore};
use redis::aio::ConnectionManager;
use redis::{Client, Cmd, FromRedisValue, RedisError, Script};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

/// Redis store
///
/// The connection is opened on first use and shared by all clones.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
    connection: Arc<OnceCell<ConnectionManager>>,
    compare_and_delete: Script,
    address: String,
}

impl RedisStore {
    /// Create a new Redis store with connection string
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::store_with_source(format!("Failed to create Redis client: {e}"), e)
        })?;

        Ok(Self {
            client,
            connection: Arc::new(OnceCell::new()),
            compare_and_delete: Script::new(COMPARE_AND_DELETE_SCRIPT),
            address: redact_credentials(connection_string),
        })
    }

    /// Create a new Redis store with host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"))
    }

    /// Server address with credentials removed
    pub fn server_address(&self) -> &str {
        &self.address
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                let manager = ConnectionManager::new(self.client.clone())
                    .await
                    .map_err(|e| command_error("CONNECT", e))?;
                debug!(server = %self.address, "Connected to Redis");
                Ok::<_, Error>(manager)
            })
            .await?;
        Ok(manager.clone())
    }

    async fn query<T: FromRedisValue>(&self, op: &str, cmd: &Cmd) -> Result<T> {
        let mut conn = self.connection().await?;
        cmd.query_async(&mut conn)
            .await
            .map_err(|e| command_error(op, e))
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);
        self.query("GET", &cmd).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl {
            validate_ttl(ttl)?;
            cmd.arg("PX").arg(ttl_millis(ttl));
        }
        let _: () = self.query("SET", &cmd).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut cmd = redis::cmd("DEL");
        cmd.arg(key);
        let removed: i64 = self.query("DEL", &cmd).await?;
        Ok(removed > 0)
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        validate_ttl(ttl)?;
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value).arg("NX").arg("PX").arg(ttl_millis(ttl));
        let reply: Option<String> = self.query("SET NX", &cmd).await?;
        Ok(reply.is_some())
    }

    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let mut invocation = self.compare_and_delete.key(key);
        invocation.arg(expected);
        let removed: i64 = invocation
            .invoke_async(&mut conn)
            .await
            .map_err(|e| command_error("EVALSHA compare-and-delete", e))?;
        Ok(removed > 0)
    }

    async fn increment(&self, key: &str) -> Result<i64> {
        let mut cmd = redis::cmd("INCR");
        cmd.arg(key);
        self.query("INCR", &cmd).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        validate_ttl(ttl)?;
        let mut cmd = redis::cmd("PEXPIRE");
        cmd.arg(key).arg(ttl_millis(ttl));
        let applied: i64 = self.query("PEXPIRE", &cmd).await?;
        Ok(applied == 1)
    }

    async fn time_to_live(&self, key: &str) -> Result<KeyTtl> {
        let mut cmd = redis::cmd("PTTL");
        cmd.arg(key);
        let millis: i64 = self.query("PTTL", &cmd).await?;
        // -2: no such key, -1: no expiry
        Ok(match millis {
            -2 => KeyTtl::Missing,
            -1 => KeyTtl::Persistent,
            ms => KeyTtl::Expires(Duration::from_millis(ms.max(0).unsigned_abs())),
        })
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("server", &self.address)
            .field("connected", &self.connection.initialized())
            .finish()
    }
}

fn command_error(op: &str, e: RedisError) -> Error {
    Error::store_with_source(format!("Redis {op} failed: {e}"), e)
}

fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)
}

fn redact_credentials(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}
