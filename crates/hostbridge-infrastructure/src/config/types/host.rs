//! Host configuration types

use std::sync::Arc;

use hostbridge_domain::ports::HostVersionSource;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_HOST_VERSION_ENV;
use crate::version::{EnvVersionSource, StaticVersionSource};

/// Host version source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Fixed host version string; takes precedence over `version_env`
    pub version: Option<String>,

    /// Environment variable holding the host version string
    pub version_env: String,
}

impl HostConfig {
    /// Version source described by this configuration
    pub fn version_source(&self) -> Arc<dyn HostVersionSource> {
        match &self.version {
            Some(version) => Arc::new(StaticVersionSource::new(version.clone())),
            None => Arc::new(EnvVersionSource::new(self.version_env.clone())),
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            version: None,
            version_env: DEFAULT_HOST_VERSION_ENV.to_string(),
        }
    }
}
