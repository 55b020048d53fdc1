//! Metrics Collector Tests

use std::time::Duration;

use hostbridge_domain::events::{PortSelectionEvent, SelectionOutcome};
use hostbridge_domain::ports::MetricsCollector;
use hostbridge_infrastructure::metrics::{
    InMemoryMetricsCollector, NullMetricsCollector, RecorderMetricsCollector,
};

fn event(outcome: SelectionOutcome) -> PortSelectionEvent {
    PortSelectionEvent {
        capability: "Settings".to_string(),
        host_version: Some(13),
        selected_version: None,
        outcome,
        duration: Duration::from_micros(250),
    }
}

#[test]
fn test_collectors_accept_every_event() {
    let collectors: Vec<Box<dyn MetricsCollector>> = vec![
        Box::new(NullMetricsCollector),
        Box::new(RecorderMetricsCollector::new()),
        Box::new(InMemoryMetricsCollector::new()),
    ];

    for collector in &collectors {
        collector.record_cache_hit("Settings");
        collector.record_cache_miss("Settings");
        collector.record_port_selection(&event(SelectionOutcome::SelectionFailed));
    }
}

#[test]
fn test_in_memory_totals() {
    let collector = InMemoryMetricsCollector::new();
    collector.record_cache_hit("A");
    collector.record_cache_hit("B");
    collector.record_cache_miss("A");

    assert_eq!(collector.total_cache_hits(), 2);
    assert_eq!(collector.total_cache_misses(), 1);

    collector.record_port_selection(&event(SelectionOutcome::ResolutionFailed));
    assert!(!collector.selections()[0].is_success());
}
