//! Background Task Executor Port
//!
//! Task-submission abstraction used for asynchronous cache rebuilds. The
//! production implementation is a bounded worker pool; tests may substitute
//! an inline or instrumented executor.

use crate::error::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;

/// A unit of background work. Jobs handle their own errors.
pub type RebuildJob = BoxFuture<'static, ()>;

/// Executor for fire-and-forget background jobs
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    /// Hand a job to the executor
    ///
    /// Returns an executor error if the job was rejected; a rejected job is
    /// dropped without running.
    async fn submit(&self, job: RebuildJob) -> Result<()>;

    /// Executor identifier for diagnostics
    fn name(&self) -> &str;
}
