//! Host version ports

use crate::error::HostVersionError;

/// Raw source of the host version string
///
/// Implementations wrap whatever the host exposes (a runtime object, an
/// environment variable, a fixed string in tests). Returning `None` means the
/// host exposes no version at all.
pub trait HostVersionSource: Send + Sync {
    /// Read the raw version string, e.g. `"13.345"`
    fn read_version(&self) -> Option<String>;
}

/// Detects the running host major version
pub trait VersionDetector: Send + Sync {
    /// Major version of the running host
    fn detect_version(&self) -> Result<u32, HostVersionError>;

    /// Forget any cached version
    ///
    /// Only for test isolation: the host version cannot change while a
    /// process is running.
    fn reset_cache(&self) {}
}
