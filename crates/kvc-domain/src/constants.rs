//! Domain-level constants
//!
//! Values that define stored formats and must stay stable across deployments.
//! Tunables that operators may change live in `kvc_infrastructure::constants`.

// ============================================================================
// CACHE ENTRY CONSTANTS
// ============================================================================

/// Value stored to record that the backing store has no such record
pub const NULL_MARKER: &str = "";

/// Default TTL for positive cache entries (30 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30 * 60;

/// Default TTL for null markers (2 minutes)
pub const DEFAULT_NULL_TTL_SECS: u64 = 2 * 60;

/// Default logical TTL for entries written with logical expiry
pub const DEFAULT_LOGICAL_TTL_SECS: u64 = 20;

// ============================================================================
// LOCK CONSTANTS
// ============================================================================

/// Marker stored under a lock key in unconditional release mode
pub const LOCK_MARKER_VALUE: &str = "1";

/// Default prefix for lock keys
pub const DEFAULT_LOCK_KEY_PREFIX: &str = "lock:";

/// Default lock safety TTL
pub const DEFAULT_LOCK_TTL_SECS: u64 = 10;

// ============================================================================
// ID GENERATOR CONSTANTS
// ============================================================================

/// Origin of the timestamp segment (2022-01-01T00:00:00Z).
///
/// Changing this after ids were issued breaks their ordering.
pub const ID_ORIGIN_EPOCH_SECS: i64 = 1_640_995_200;

/// Width of the counter segment
pub const ID_COUNTER_BITS: u32 = 32;

/// Prefix for daily counter keys
pub const ID_COUNTER_KEY_PREFIX: &str = "icr:";

/// Calendar-day discriminator appended to counter keys
pub const ID_DATE_FORMAT: &str = "%Y:%m:%d";

/// Seconds in one calendar day
pub const SECONDS_PER_DAY: u64 = 86_400;
