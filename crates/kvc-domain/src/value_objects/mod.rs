//! Value Objects
//!
//! Immutable types describing what the cache layer stores and issues.

/// Logical-expiry envelope
pub mod envelope;
/// Generated identifiers
pub mod id;

pub use envelope::LogicalEnvelope;
pub use id::GeneratedId;
