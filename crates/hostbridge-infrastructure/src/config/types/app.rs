//! Root configuration

use serde::{Deserialize, Serialize};

use super::{HostConfig, LoggingConfig, RetryConfig};

/// Complete HostBridge configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostBridgeConfig {
    /// Logging setup
    pub logging: LoggingConfig,

    /// Default retry policy for host calls
    pub retry: RetryConfig,

    /// Where the host version comes from
    pub host: HostConfig,
}
