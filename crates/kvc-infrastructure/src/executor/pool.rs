//! Bounded rebuild worker pool
//!
//! A fixed set of tokio tasks draining one bounded queue. Submission never
//! waits: a full queue rejects the job.

use crate::config::RebuildConfig;
use async_trait::async_trait;
use futures::FutureExt;
use kvc_domain::error::{Error, Result};
use kvc_domain::ports::{RebuildJob, TaskExecutor};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Mutex, Notify, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

type SharedReceiver = Arc<Mutex<mpsc::Receiver<RebuildJob>>>;

#[derive(Debug, Default)]
struct PoolState {
    /// Queued plus running jobs
    in_flight: AtomicUsize,
    completed: AtomicU64,
    panicked: AtomicU64,
    idle: Notify,
}

impl PoolState {
    fn finish_one(&self) {
        if self.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.idle.notify_waiters();
        }
    }
}

/// Worker pool executing rebuild jobs
pub struct RebuildPool {
    sender: RwLock<Option<mpsc::Sender<RebuildJob>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    state: Arc<PoolState>,
    worker_count: usize,
    queue_capacity: usize,
}

impl RebuildPool {
    /// Spawn the workers on the current tokio runtime
    pub fn start(config: &RebuildConfig) -> Result<Self> {
        if config.workers == 0 || config.queue_capacity == 0 {
            return Err(Error::invalid_argument(
                "rebuild pool needs at least one worker and a non-empty queue",
            ));
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| Error::executor(format!("rebuild pool needs a tokio runtime: {e}")))?;

        let (sender, receiver) = mpsc::channel(config.queue_capacity);
        let receiver: SharedReceiver = Arc::new(Mutex::new(receiver));
        let state = Arc::new(PoolState::default());

        let workers = (0..config.workers)
            .map(|worker| {
                runtime.spawn(run_worker(
                    worker,
                    Arc::clone(&receiver),
                    Arc::clone(&state),
                ))
            })
            .collect();

        info!(
            workers = config.workers,
            queue_capacity = config.queue_capacity,
            "Rebuild pool started"
        );

        Ok(Self {
            sender: RwLock::new(Some(sender)),
            workers: Mutex::new(workers),
            state,
            worker_count: config.workers,
            queue_capacity: config.queue_capacity,
        })
    }

    /// Number of workers
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Jobs queued or running
    pub fn in_flight(&self) -> usize {
        self.state.in_flight.load(Ordering::Acquire)
    }

    /// Jobs that ran to completion, including those that panicked
    pub fn completed(&self) -> u64 {
        self.state.completed.load(Ordering::Relaxed)
    }

    /// Jobs that panicked
    pub fn panicked(&self) -> u64 {
        self.state.panicked.load(Ordering::Relaxed)
    }

    /// Wait until no job is queued or running
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.state.idle.notified();
            tokio::pin!(notified);
            // Register before checking so a wakeup between the two is not lost
            notified.as_mut().enable();
            if self.in_flight() == 0 {
                return;
            }
            notified.await;
        }
    }

    /// Stop accepting jobs, drain the queue and join the workers
    pub async fn shutdown(&self) {
        if self.sender.write().await.take().is_none() {
            return;
        }

        let workers = std::mem::take(&mut *self.workers.lock().await);
        for worker in workers {
            if let Err(e) = worker.await {
                warn!(error = %e, "Rebuild worker ended abnormally");
            }
        }
        info!(completed = self.completed(), "Rebuild pool stopped");
    }
}

#[async_trait]
impl TaskExecutor for RebuildPool {
    async fn submit(&self, job: RebuildJob) -> Result<()> {
        let sender = self.sender.read().await;
        let Some(sender) = sender.as_ref() else {
            return Err(Error::executor("rebuild pool is shut down"));
        };

        self.state.in_flight.fetch_add(1, Ordering::AcqRel);
        match sender.try_send(job) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.state.finish_one();
                Err(match e {
                    TrySendError::Full(_) => Error::executor(format!(
                        "rebuild queue is full ({} jobs)",
                        self.queue_capacity
                    )),
                    TrySendError::Closed(_) => Error::executor("rebuild pool is shut down"),
                })
            }
        }
    }

    fn name(&self) -> &str {
        "rebuild-pool"
    }
}

impl std::fmt::Debug for RebuildPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RebuildPool")
            .field("workers", &self.worker_count)
            .field("queue_capacity", &self.queue_capacity)
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

async fn run_worker(worker: usize, receiver: SharedReceiver, state: Arc<PoolState>) {
    loop {
        let job = {
            let mut receiver = receiver.lock().await;
            receiver.recv().await
        };
        let Some(job) = job else {
            break;
        };

        if AssertUnwindSafe(job).catch_unwind().await.is_err() {
            state.panicked.fetch_add(1, Ordering::Relaxed);
            error!(worker, "Rebuild job panicked");
        }
        state.completed.fetch_add(1, Ordering::Relaxed);
        state.finish_one();
    }
    debug!(worker, "Rebuild worker stopped");
}
