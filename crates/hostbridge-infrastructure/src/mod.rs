//! # Infrastructure Layer
//!
//! Runtime machinery behind HostBridge: the service container, port
//! selection, retry and the cross-cutting concerns around them.
//!
//! ## Module Categories
//!
//! ### Dependency Resolution
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Service container, instance cache, graph validation |
//! | [`version`] | Host version detection and version sources |
//!
//! ### Routing & Selection
//! | Module | Description |
//! |--------|-------------|
//! | [`routing`] | Port registries, match strategies and the port selector |
//!
//! ### Resilience
//! | Module | Description |
//! |--------|-------------|
//! | [`resilience`] | Bounded retry with exponential backoff |
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via figment |
//! | [`logging`] | Structured logging with tracing |
//! | [`metrics`] | Metrics collectors (null, in-memory, `metrics` recorder) |
//! | [`constants`] | Centralized configuration constants |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod metrics;
pub mod resilience;
pub mod routing;
pub mod utils;
pub mod version;

// Re-export commonly used types
pub use di::{Constructed, Injectable, InstanceCache, Resolver, ServiceContainer, Teardown};
pub use error_ext::ErrorContext;
pub use resilience::{RetryError, RetryPolicy, RetryService};
pub use routing::{
    GreedyPortMatchStrategy, PortMatchStrategy, PortRegistry, PortSelector, SelectedPort,
    VersionTable,
};
pub use utils::TimedOperation;
pub use version::HostVersionDetector;
