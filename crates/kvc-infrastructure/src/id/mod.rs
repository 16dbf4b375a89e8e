//! Distributed id generation

pub mod generator;

pub use generator::IdGenerator;
