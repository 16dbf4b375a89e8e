//! Cache client counters

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of a client's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads answered with a fresh value
    pub hits: u64,
    /// Reads that found nothing stored
    pub misses: u64,
    /// Reads answered by a null marker
    pub null_hits: u64,
    /// Logical-expiry reads answered with a stale value
    pub stale_hits: u64,
    /// Loader invocations, synchronous and rebuild
    pub loader_calls: u64,
    /// Rebuild jobs accepted by the executor
    pub rebuilds_scheduled: u64,
    /// Stale reads that found a rebuild already locked
    pub rebuilds_skipped: u64,
    /// Rebuild jobs the executor refused
    pub rebuilds_rejected: u64,
    /// Rebuild jobs that wrote their result
    pub rebuilds_completed: u64,
    /// Rebuild jobs whose loader or write failed or panicked
    pub rebuilds_failed: u64,
    /// Mutex-guarded reads that found the lock held
    pub lock_contentions: u64,
}

impl CacheStats {
    /// Share of reads served from the store without a miss
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let served = self.hits + self.null_hits + self.stale_hits;
        let total = served + self.misses;
        if total == 0 {
            0.0
        } else {
            served as f64 / total as f64
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    null_hits: AtomicU64,
    stale_hits: AtomicU64,
    loader_calls: AtomicU64,
    rebuilds_scheduled: AtomicU64,
    rebuilds_skipped: AtomicU64,
    rebuilds_rejected: AtomicU64,
    rebuilds_completed: AtomicU64,
    rebuilds_failed: AtomicU64,
    lock_contentions: AtomicU64,
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl StatsRecorder {
    pub(crate) fn hit(&self) {
        bump(&self.hits);
    }

    pub(crate) fn miss(&self) {
        bump(&self.misses);
    }

    pub(crate) fn null_hit(&self) {
        bump(&self.null_hits);
    }

    pub(crate) fn stale_hit(&self) {
        bump(&self.stale_hits);
    }

    pub(crate) fn loader_call(&self) {
        bump(&self.loader_calls);
    }

    pub(crate) fn rebuild_scheduled(&self) {
        bump(&self.rebuilds_scheduled);
    }

    pub(crate) fn rebuild_skipped(&self) {
        bump(&self.rebuilds_skipped);
    }

    pub(crate) fn rebuild_rejected(&self) {
        bump(&self.rebuilds_rejected);
    }

    pub(crate) fn rebuild_completed(&self) {
        bump(&self.rebuilds_completed);
    }

    pub(crate) fn rebuild_failed(&self) {
        bump(&self.rebuilds_failed);
    }

    pub(crate) fn lock_contention(&self) {
        bump(&self.lock_contentions);
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        CacheStats {
            hits: load(&self.hits),
            misses: load(&self.misses),
            null_hits: load(&self.null_hits),
            stale_hits: load(&self.stale_hits),
            loader_calls: load(&self.loader_calls),
            rebuilds_scheduled: load(&self.rebuilds_scheduled),
            rebuilds_skipped: load(&self.rebuilds_skipped),
            rebuilds_rejected: load(&self.rebuilds_rejected),
            rebuilds_completed: load(&self.rebuilds_completed),
            rebuilds_failed: load(&self.rebuilds_failed),
            lock_contentions: load(&self.lock_contentions),
        }
    }
}
