//! Infrastructure ports

pub mod lifecycle;
pub mod metrics;
pub mod version;

pub use lifecycle::{AsyncDisposable, Disposable};
pub use metrics::MetricsCollector;
pub use version::{HostVersionSource, VersionDetector};
