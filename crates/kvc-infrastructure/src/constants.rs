//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Stored formats and cache defaults are defined in `kvc_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "kvc.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "kvc";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "KVC";

/// Separator for nested keys in environment variables (`KVC_CACHE__NULL_TTL_SECS`)
pub const CONFIG_ENV_NESTING_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable that overrides the configured log filter
pub const LOG_FILTER_ENV: &str = "KVC_LOG";

/// File name prefix used when the configured log path has no stem
pub const DEFAULT_LOG_FILE_PREFIX: &str = "kvc";

// ============================================================================
// LOCK CONSTANTS
// ============================================================================

/// Sleep between acquisition attempts of the mutex-guarded load
pub const LOCK_RETRY_INTERVAL_MS: u64 = 200;

/// Acquisition attempts before the mutex-guarded load gives up
pub const LOCK_MAX_ATTEMPTS: u32 = 25;

// ============================================================================
// ID GENERATOR CONSTANTS
// ============================================================================

/// How long a daily counter is kept after its first increment (2 days)
pub const ID_COUNTER_RETENTION_SECS: u64 = 2 * 86_400;

// ============================================================================
// REBUILD POOL CONSTANTS
// ============================================================================

/// Number of rebuild workers
pub const REBUILD_WORKERS: usize = 10;

/// Maximum number of queued rebuild jobs
pub const REBUILD_QUEUE_CAPACITY: usize = 1024;
