//! Domain Port Interfaces
//!
//! Boundary contracts between the core and everything around it.
//!
//! ## Organization
//!
//! - **infrastructure/** - Services the core consumes (version detection, metrics, disposal)
//! - **host/** - Capability contracts that versioned host adapters implement

/// Infrastructure service ports
pub mod infrastructure;
/// Host capability ports
pub mod host;

pub use host::{GamePort, HooksPort, SettingsPort};
pub use infrastructure::{
    AsyncDisposable, Disposable, HostVersionSource, MetricsCollector, VersionDetector,
};
