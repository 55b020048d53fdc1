//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables
//! and default values using Figment.

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use hostbridge_domain::{Error, Result};

use crate::config::{HostBridgeConfig, HostConfig, LoggingConfig, RetryConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    #[must_use]
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `HostBridgeConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first one found)
    /// 3. Environment variables with prefix (e.g., `HOSTBRIDGE_RETRY__DELAY_MS`)
    pub fn load(&self) -> Result<HostBridgeConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(HostBridgeConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let config: HostBridgeConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &HostBridgeConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a loaded configuration
pub fn validate_config(config: &HostBridgeConfig) -> Result<()> {
    validate_logging_config(&config.logging)?;
    validate_retry_config(&config.retry)?;
    validate_host_config(&config.host)?;
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    if config.level.trim().is_empty() {
        return Err(Error::configuration("Log level cannot be empty"));
    }
    parse_log_level(&config.level)?;
    Ok(())
}

fn validate_retry_config(config: &RetryConfig) -> Result<()> {
    if config.max_attempts == 0 {
        return Err(Error::configuration("Retry max_attempts must be at least 1"));
    }
    if !config.backoff_factor.is_finite() || config.backoff_factor < 0.0 {
        return Err(Error::configuration(format!(
            "Retry backoff_factor must be a non-negative number, got {}",
            config.backoff_factor
        )));
    }
    Ok(())
}

fn validate_host_config(config: &HostConfig) -> Result<()> {
    if config.version.is_none() && config.version_env.trim().is_empty() {
        return Err(Error::configuration(
            "Host version_env cannot be empty when no fixed version is configured",
        ));
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: HostBridgeConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set logging configuration
    #[must_use]
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set retry configuration
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Pin the host version instead of reading it from the environment
    #[must_use]
    pub fn with_host_version<S: Into<String>>(mut self, version: S) -> Self {
        self.config.host.version = Some(version.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<HostBridgeConfig> {
        validate_config(&self.config)?;
        Ok(self.config)
    }
}
