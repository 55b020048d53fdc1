//! `metrics` facade collector

use hostbridge_domain::events::PortSelectionEvent;
use hostbridge_domain::ports::MetricsCollector;
use metrics::{counter, histogram};

use crate::constants::{
    METRIC_CACHE_HITS, METRIC_CACHE_MISSES, METRIC_PORT_SELECTION_DURATION,
    METRIC_PORT_SELECTIONS,
};

/// Emits counters and histograms through whatever `metrics` recorder is installed
///
/// Without an installed recorder every call is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecorderMetricsCollector;

impl RecorderMetricsCollector {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsCollector for RecorderMetricsCollector {
    fn record_cache_hit(&self, token: &str) {
        counter!(METRIC_CACHE_HITS, "token" => token.to_string()).increment(1);
    }

    fn record_cache_miss(&self, token: &str) {
        counter!(METRIC_CACHE_MISSES, "token" => token.to_string()).increment(1);
    }

    fn record_port_selection(&self, event: &PortSelectionEvent) {
        let version = event
            .selected_version
            .map_or_else(|| "none".to_string(), |v| v.to_string());

        counter!(
            METRIC_PORT_SELECTIONS,
            "capability" => event.capability.clone(),
            "outcome" => event.outcome.as_str(),
            "version" => version
        )
        .increment(1);
        histogram!(
            METRIC_PORT_SELECTION_DURATION,
            "capability" => event.capability.clone()
        )
        .record(event.duration.as_secs_f64());
    }
}
