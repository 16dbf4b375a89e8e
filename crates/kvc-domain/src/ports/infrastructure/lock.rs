//! Distributed Lock Provider Port
//!
//! Defines the contract for distributed lock coordination services.

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Lock guard token returned when a lock is acquired
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockGuard {
    /// Lock key
    pub key: String,
    /// Value written for this lock acquisition
    pub token: String,
}

/// Distributed lock provider interface
///
/// Acquisition never blocks. The TTL is a deadlock backstop: a holder that
/// dies without releasing loses the lock when it elapses.
#[async_trait]
pub trait LockProvider: Send + Sync {
    /// Try to acquire the lock under `key` for at most `ttl`
    ///
    /// # Returns
    /// A guard if this call acquired the lock, `None` if another holder has it
    async fn try_acquire(&self, key: &str, ttl: Duration) -> Result<Option<LockGuard>>;

    /// Release a previously acquired lock
    ///
    /// # Returns
    /// True if the lock entry was removed
    async fn release(&self, guard: &LockGuard) -> Result<bool>;
}
