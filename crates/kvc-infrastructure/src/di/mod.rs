//! Component wiring

pub mod bootstrap;

pub use bootstrap::{create_store, init_app, init_app_with_store, AppContext};
