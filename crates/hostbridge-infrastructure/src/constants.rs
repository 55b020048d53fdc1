//! Infrastructure layer constants
//!
//! Domain-level constants are defined in `hostbridge_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "hostbridge.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "hostbridge";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "HOSTBRIDGE";

/// Separator between nested keys in configuration environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "HOSTBRIDGE_LOG";

/// File stem used for rolling log files when none is given
pub const DEFAULT_LOG_FILE_STEM: &str = "hostbridge";

// ============================================================================
// HOST CONSTANTS
// ============================================================================

/// Environment variable read for the host version when none is configured
pub const DEFAULT_HOST_VERSION_ENV: &str = "HOSTBRIDGE_HOST_VERSION";

// ============================================================================
// RETRY CONSTANTS
// ============================================================================

/// Default number of attempts per retried host call
pub const RETRY_DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay between attempts in milliseconds
pub const RETRY_DEFAULT_DELAY_MS: u64 = 100;

/// Default backoff exponent (`delay * attempt^factor`)
pub const RETRY_DEFAULT_BACKOFF_FACTOR: f64 = 2.0;

// ============================================================================
// METRICS CONSTANTS
// ============================================================================

/// Counter of singleton cache hits
pub const METRIC_CACHE_HITS: &str = "hostbridge_cache_hits_total";

/// Counter of singleton cache misses
pub const METRIC_CACHE_MISSES: &str = "hostbridge_cache_misses_total";

/// Counter of port selection attempts
pub const METRIC_PORT_SELECTIONS: &str = "hostbridge_port_selections_total";

/// Histogram of port selection durations in seconds
pub const METRIC_PORT_SELECTION_DURATION: &str = "hostbridge_port_selection_duration_seconds";
