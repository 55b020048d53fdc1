//! Configuration
//!
//! Layered configuration: built-in defaults, then `hostbridge.toml`, then
//! `HOSTBRIDGE_*` environment variables (nested keys separated by `__`,
//! e.g. `HOSTBRIDGE_RETRY__MAX_ATTEMPTS=5`).

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{HostBridgeConfig, HostConfig, LoggingConfig, RetryConfig};
