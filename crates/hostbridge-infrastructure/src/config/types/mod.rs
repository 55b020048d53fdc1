//! Configuration types module

pub mod app;
pub mod host;
pub mod logging;
pub mod retry;

// Re-export main types
pub use app::HostBridgeConfig;
pub use host::HostConfig;
pub use logging::LoggingConfig;
pub use retry::RetryConfig;
