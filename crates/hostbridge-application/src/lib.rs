//! # HostBridge Application Layer
//!
//! Version-independent capability services for plugin code, built on the
//! infrastructure container and port selector.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`services`] | Capability façades over lazily selected, retried ports |
//! | [`health`] | Per-capability health probing |
//! | [`bootstrap`] | Wiring from configuration to ready-to-use services |
//! | [`tokens`] | Well-known service tokens registered at bootstrap |

pub mod bootstrap;
pub mod health;
pub mod services;
pub mod tokens;

// Re-export commonly used types
pub use bootstrap::{HostBridge, HostBridgeBuilder};
pub use health::{
    CapabilityHealth, CapabilityHealthCheck, CapabilityProbe, HealthReport, HealthStatus,
};
pub use services::{HostGameService, HostHooksService, HostService, HostSettingsService};
