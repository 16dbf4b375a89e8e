//! Background executors for cache rebuild jobs

pub mod inline;
pub mod pool;

pub use inline::InlineExecutor;
pub use pool::RebuildPool;
