//! Daily-counter id generator
//!
//! An id is `(seconds since origin) << 32 | counter`, where the counter is an
//! atomic per-day increment in the shared store. Ids for one business key are
//! unique across instances and increase with time.

use crate::config::IdConfig;
use chrono::{DateTime, Utc};
use kvc_domain::constants::{ID_COUNTER_KEY_PREFIX, ID_DATE_FORMAT, ID_ORIGIN_EPOCH_SECS};
use kvc_domain::error::{Error, Result};
use kvc_domain::ports::{Clock, KeyValueStore, SystemClock};
use kvc_domain::value_objects::GeneratedId;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Distributed id generator
#[derive(Clone)]
pub struct IdGenerator {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    origin_epoch_secs: i64,
    key_prefix: String,
    counter_retention: Option<Duration>,
}

impl IdGenerator {
    /// Create a generator with the default origin and no counter retention
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            origin_epoch_secs: ID_ORIGIN_EPOCH_SECS,
            key_prefix: ID_COUNTER_KEY_PREFIX.to_string(),
            counter_retention: None,
        }
    }

    /// Create a generator from configuration
    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &IdConfig) -> Self {
        Self {
            origin_epoch_secs: config.origin_epoch_secs,
            key_prefix: config.key_prefix.clone(),
            counter_retention: config.counter_retention(),
            ..Self::new(store)
        }
    }

    /// Use a different time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Expire each daily counter `retention` after its first increment
    pub fn with_counter_retention(mut self, retention: Option<Duration>) -> Self {
        self.counter_retention = retention;
        self
    }

    /// Store key of the counter for `business_key` on the UTC date of `now`
    pub fn counter_key(&self, business_key: &str, now: DateTime<Utc>) -> String {
        format!(
            "{}{}:{}",
            self.key_prefix,
            business_key,
            now.format(ID_DATE_FORMAT)
        )
    }

    /// Issue the next id for `business_key`
    ///
    /// # Errors
    /// `InvalidArgument` if the clock reads earlier than the origin; store
    /// errors propagate.
    pub async fn next_id(&self, business_key: &str) -> Result<GeneratedId> {
        let now = self.clock.now();
        let timestamp_segment = now.timestamp() - self.origin_epoch_secs;
        if timestamp_segment < 0 {
            return Err(Error::invalid_argument(format!(
                "clock {now} is earlier than the id origin {}",
                self.origin_epoch_secs
            )));
        }

        let key = self.counter_key(business_key, now);
        let counter = self.store.increment(&key).await?;
        if counter == 1 {
            if let Some(retention) = self.counter_retention {
                self.store.expire(&key, retention).await?;
            }
            debug!(counter_key = %key, "Started daily id counter");
        }

        Ok(GeneratedId::compose(timestamp_segment, counter))
    }
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator")
            .field("store", &self.store.provider_name())
            .field("origin_epoch_secs", &self.origin_epoch_secs)
            .field("key_prefix", &self.key_prefix)
            .field("counter_retention", &self.counter_retention)
            .finish()
    }
}
