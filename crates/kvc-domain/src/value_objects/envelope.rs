//! Logical-expiry envelope
//!
//! Wraps a cached value with an application-level expiry timestamp. Entries
//! written this way carry no store-native TTL; staleness is judged only by
//! comparing `expire_at` with the current time.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Value plus the instant after which it is considered stale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalEnvelope<T> {
    /// Wrapped value
    pub data: T,
    /// Logical expiry instant
    pub expire_at: DateTime<Utc>,
}

impl<T> LogicalEnvelope<T> {
    /// Wrap `data` with an explicit expiry instant
    pub fn new(data: T, expire_at: DateTime<Utc>) -> Self {
        Self { data, expire_at }
    }

    /// Wrap `data` so that it expires `ttl` after `now`
    pub fn expiring_after(data: T, ttl: Duration, now: DateTime<Utc>) -> Result<Self> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| Error::invalid_argument(format!("logical TTL out of range: {e}")))?;
        let expire_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| Error::invalid_argument("logical expiry overflows the calendar"))?;
        Ok(Self::new(data, expire_at))
    }

    /// Whether the envelope is stale at `now`. Reaching `expire_at` counts as stale.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_at <= now
    }

    /// Unwrap the value
    pub fn into_data(self) -> T {
        self.data
    }
}
