//! Metrics collectors
//!
//! Implementations of the [`MetricsCollector`] port:
//!
//! - [`NullMetricsCollector`] discards everything
//! - [`InMemoryMetricsCollector`] keeps counters and selection events for inspection
//! - [`RecorderMetricsCollector`] forwards to the global `metrics` recorder
//!
//! [`MetricsCollector`]: hostbridge_domain::ports::MetricsCollector

mod memory;
mod recorder;

pub use memory::InMemoryMetricsCollector;
pub use recorder::RecorderMetricsCollector;

use hostbridge_domain::ports::MetricsCollector;

/// Collector that records nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMetricsCollector;

impl MetricsCollector for NullMetricsCollector {}
