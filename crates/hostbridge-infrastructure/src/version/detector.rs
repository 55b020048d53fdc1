//! Cached major-version detector

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use hostbridge_domain::constants::HOST_VERSION_SEPARATOR;
use hostbridge_domain::ports::{HostVersionSource, VersionDetector};
use hostbridge_domain::HostVersionError;
use tracing::{debug, warn};

/// Parse the major version out of a host version string
///
/// Accepts `"13"`, `"13.345"`, `"v12.331"` and surrounding whitespace.
///
/// ```
/// use hostbridge_infrastructure::version::parse_major_version;
///
/// assert_eq!(parse_major_version(" 13.345 ").unwrap(), 13);
/// assert!(parse_major_version("").is_err());
/// ```
pub fn parse_major_version(raw: &str) -> Result<u32, HostVersionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HostVersionError::Empty);
    }
    let unprefixed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    let major = unprefixed
        .split(HOST_VERSION_SEPARATOR)
        .next()
        .unwrap_or_default();

    major
        .parse::<u32>()
        .map_err(|_| HostVersionError::Unparseable {
            raw: raw.to_string(),
        })
}

/// Detects the host major version once and caches it
///
/// Failed detections are not cached, so a host that exposes its version late
/// is picked up on the next call.
pub struct HostVersionDetector {
    source: Arc<dyn HostVersionSource>,
    cached: RwLock<Option<u32>>,
}

impl HostVersionDetector {
    pub fn new(source: Arc<dyn HostVersionSource>) -> Self {
        Self {
            source,
            cached: RwLock::new(None),
        }
    }

    /// Cached version, if detection already succeeded
    pub fn cached_version(&self) -> Option<u32> {
        *self.cached.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl VersionDetector for HostVersionDetector {
    fn detect_version(&self) -> Result<u32, HostVersionError> {
        if let Some(version) = self.cached_version() {
            return Ok(version);
        }

        let raw = self.source.read_version().ok_or(HostVersionError::Absent)?;
        match parse_major_version(&raw) {
            Ok(version) => {
                *self.cached.write().unwrap_or_else(PoisonError::into_inner) = Some(version);
                debug!(version, raw = %raw, "Detected host version");
                Ok(version)
            }
            Err(e) => {
                warn!(raw = %raw, error = %e, "Host version could not be parsed");
                Err(e)
            }
        }
    }

    fn reset_cache(&self) {
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl fmt::Debug for HostVersionDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostVersionDetector")
            .field("cached", &self.cached_version())
            .finish_non_exhaustive()
    }
}
