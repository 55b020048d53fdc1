//! Domain layer constants
//!
//! Infrastructure defaults (config file names, retry defaults) live in
//! `hostbridge_infrastructure::constants`.

/// Minimum number of attempts a retry policy may declare
pub const MIN_RETRY_ATTEMPTS: u32 = 1;

/// Separator between the major version and the build number in host version strings
pub const HOST_VERSION_SEPARATOR: char = '.';

/// Separator used when listing available port versions in diagnostics
pub const AVAILABLE_VERSIONS_SEPARATOR: &str = ", ";

/// Separator used when rendering dependency paths
pub const DEPENDENCY_PATH_SEPARATOR: &str = " -> ";
