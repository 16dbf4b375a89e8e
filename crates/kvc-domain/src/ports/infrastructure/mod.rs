//! Infrastructure Service Ports

/// Clock port
pub mod clock;
/// Background executor port
pub mod executor;
/// Distributed lock port
pub mod lock;

pub use clock::{Clock, SystemClock};
pub use executor::{RebuildJob, TaskExecutor};
pub use lock::{LockGuard, LockProvider};
