//! Metrics collection port

use crate::events::PortSelectionEvent;

/// Observability sink for cache and port selection activity
///
/// Every method is infallible and has a no-op default, so collectors only
/// implement what they care about and can never fail the operation they observe.
pub trait MetricsCollector: Send + Sync {
    /// A singleton lookup found a cached instance
    fn record_cache_hit(&self, _token: &str) {}

    /// A singleton lookup found nothing
    fn record_cache_miss(&self, _token: &str) {}

    /// A port selection attempt finished
    fn record_port_selection(&self, _event: &PortSelectionEvent) {}
}
