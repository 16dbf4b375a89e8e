//! Distributed mutual exclusion over the shared store

pub mod store_lock;

pub use crate::config::LockReleaseMode;
pub use store_lock::StoreLockProvider;
