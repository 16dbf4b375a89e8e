//! Configuration types module

pub mod app;
pub mod cache;
pub mod id;
pub mod lock;
pub mod logging;
pub mod rebuild;
pub mod store;

// Re-export main types
pub use app::*;
