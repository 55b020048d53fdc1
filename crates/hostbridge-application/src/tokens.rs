//! Well-known service tokens
//!
//! Registered by [`crate::HostBridgeBuilder::build`] so port factories can
//! declare them as dependencies.

use hostbridge_domain::ServiceToken;
use hostbridge_domain::ports::VersionDetector;
use hostbridge_infrastructure::config::HostBridgeConfig;
use hostbridge_infrastructure::resilience::RetryService;
use once_cell::sync::Lazy;

/// Effective configuration
pub static HOST_CONFIG: Lazy<ServiceToken<HostBridgeConfig>> =
    Lazy::new(|| ServiceToken::new("HostBridgeConfig"));

/// Shared host version detector
pub static VERSION_DETECTOR: Lazy<ServiceToken<dyn VersionDetector>> =
    Lazy::new(|| ServiceToken::new("VersionDetector"));

/// Retry service seeded from configuration
pub static RETRY_SERVICE: Lazy<ServiceToken<RetryService>> =
    Lazy::new(|| ServiceToken::new("RetryService"));

