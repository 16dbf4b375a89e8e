//! Generated identifiers
//!
//! Layout: `(seconds since origin << 32) | daily counter`.

use crate::constants::ID_COUNTER_BITS;
use serde::{Deserialize, Serialize};
use std::fmt;

const COUNTER_MASK: i64 = (1 << ID_COUNTER_BITS) - 1;

/// 64-bit identifier issued by the id generator
///
/// Ordering follows the numeric value: the timestamp segment dominates,
/// the counter breaks ties within a second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratedId(i64);

impl GeneratedId {
    /// Compose an id from its segments
    ///
    /// A counter wider than 32 bits spills into the timestamp bits; callers
    /// accept that limit.
    pub fn compose(timestamp_segment: i64, counter_segment: i64) -> Self {
        Self((timestamp_segment << ID_COUNTER_BITS) | counter_segment)
    }

    /// Wrap a raw value
    pub fn from_raw(value: i64) -> Self {
        Self(value)
    }

    /// Raw 64-bit value
    pub fn value(self) -> i64 {
        self.0
    }

    /// Seconds since the id origin
    pub fn timestamp_segment(self) -> i64 {
        self.0 >> ID_COUNTER_BITS
    }

    /// Daily counter value
    pub fn counter_segment(self) -> i64 {
        self.0 & COUNTER_MASK
    }
}

impl From<GeneratedId> for i64 {
    fn from(id: GeneratedId) -> Self {
        id.0
    }
}

impl fmt::Display for GeneratedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
