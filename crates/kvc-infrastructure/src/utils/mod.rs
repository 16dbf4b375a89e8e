//! Infrastructure utilities

pub mod clock;

pub use clock::ManualClock;
