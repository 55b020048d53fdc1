//! In-memory metrics collector

use std::sync::{Mutex, PoisonError};

use dashmap::DashMap;
use hostbridge_domain::events::PortSelectionEvent;
use hostbridge_domain::ports::MetricsCollector;

/// Keeps per-token cache counters and every selection event
#[derive(Debug, Default)]
pub struct InMemoryMetricsCollector {
    hits: DashMap<String, u64>,
    misses: DashMap<String, u64>,
    selections: Mutex<Vec<PortSelectionEvent>>,
}

impl InMemoryMetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache hits recorded for `token`
    pub fn cache_hits(&self, token: &str) -> u64 {
        self.hits.get(token).map_or(0, |count| *count)
    }

    /// Cache misses recorded for `token`
    pub fn cache_misses(&self, token: &str) -> u64 {
        self.misses.get(token).map_or(0, |count| *count)
    }

    /// Cache hits across all tokens
    pub fn total_cache_hits(&self) -> u64 {
        self.hits.iter().map(|entry| *entry.value()).sum()
    }

    /// Cache misses across all tokens
    pub fn total_cache_misses(&self) -> u64 {
        self.misses.iter().map(|entry| *entry.value()).sum()
    }

    /// Every selection event, in arrival order
    pub fn selections(&self) -> Vec<PortSelectionEvent> {
        self.selections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop everything recorded so far
    pub fn reset(&self) {
        self.hits.clear();
        self.misses.clear();
        self.selections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl MetricsCollector for InMemoryMetricsCollector {
    fn record_cache_hit(&self, token: &str) {
        *self.hits.entry(token.to_string()).or_insert(0) += 1;
    }

    fn record_cache_miss(&self, token: &str) {
        *self.misses.entry(token.to_string()).or_insert(0) += 1;
    }

    fn record_port_selection(&self, event: &PortSelectionEvent) {
        self.selections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
