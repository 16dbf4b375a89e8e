//! Executor that runs each job inside `submit`

use async_trait::async_trait;
use futures::FutureExt;
use kvc_domain::error::Result;
use kvc_domain::ports::{RebuildJob, TaskExecutor};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::error;

/// Runs jobs to completion on the submitting task
///
/// A logical-expiry read that schedules a rebuild returns only after the
/// rebuild finished, which makes rebuild outcomes deterministic in tests.
#[derive(Debug, Default)]
pub struct InlineExecutor {
    submitted: AtomicUsize,
}

impl InlineExecutor {
    /// Create an executor with a zeroed submission count
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of jobs submitted so far
    pub fn submitted(&self) -> usize {
        self.submitted.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskExecutor for InlineExecutor {
    async fn submit(&self, job: RebuildJob) -> Result<()> {
        self.submitted.fetch_add(1, Ordering::SeqCst);
        if AssertUnwindSafe(job).catch_unwind().await.is_err() {
            error!("Inline job panicked");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "inline"
    }
}
