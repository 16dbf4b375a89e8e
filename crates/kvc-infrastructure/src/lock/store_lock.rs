//! Lock provider over a key-value store
//!
//! Acquisition is a single conditional write with a safety TTL; the TTL frees
//! the lock if its holder never releases it.

use crate::config::{LockConfig, LockReleaseMode};
use async_trait::async_trait;
use kvc_domain::constants::LOCK_MARKER_VALUE;
use kvc_domain::error::{Error, Result};
use kvc_domain::ports::{KeyValueStore, LockGuard, LockProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Distributed lock backed by `set_if_absent`
#[derive(Clone)]
pub struct StoreLockProvider {
    store: Arc<dyn KeyValueStore>,
    mode: LockReleaseMode,
}

impl StoreLockProvider {
    /// Create a lock provider using token release
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_mode(store, LockReleaseMode::default())
    }

    /// Create a lock provider with an explicit release mode
    pub fn with_mode(store: Arc<dyn KeyValueStore>, mode: LockReleaseMode) -> Self {
        Self { store, mode }
    }

    /// Create a lock provider from configuration
    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &LockConfig) -> Self {
        Self::with_mode(store, config.release_mode)
    }

    /// Configured release mode
    pub fn mode(&self) -> LockReleaseMode {
        self.mode
    }

    fn next_token(&self) -> String {
        match self.mode {
            LockReleaseMode::Token => Uuid::new_v4().to_string(),
            LockReleaseMode::Unconditional => LOCK_MARKER_VALUE.to_string(),
        }
    }
}

#[async_trait]
impl LockProvider for StoreLockProvider {
    async fn try_acquire(&self, key: &str, ttl: Duration) -> Result<Option<LockGuard>> {
        if ttl.is_zero() {
            return Err(Error::invalid_argument(format!(
                "lock TTL for {key} must be positive"
            )));
        }

        let token = self.next_token();
        if self.store.set_if_absent(key, &token, ttl).await? {
            debug!(lock_key = key, "Lock acquired");
            Ok(Some(LockGuard {
                key: key.to_string(),
                token,
            }))
        } else {
            debug!(lock_key = key, "Lock held elsewhere");
            Ok(None)
        }
    }

    async fn release(&self, guard: &LockGuard) -> Result<bool> {
        let released = match self.mode {
            LockReleaseMode::Token => self.store.delete_if_equals(&guard.key, &guard.token).await?,
            LockReleaseMode::Unconditional => self.store.delete(&guard.key).await?,
        };
        if !released {
            debug!(lock_key = %guard.key, "Lock was no longer held at release");
        }
        Ok(released)
    }
}

impl std::fmt::Debug for StoreLockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreLockProvider")
            .field("store", &self.store.provider_name())
            .field("mode", &self.mode)
            .finish()
    }
}
