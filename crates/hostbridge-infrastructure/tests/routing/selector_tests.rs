//! Port Selector Tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use hostbridge_domain::events::{PortSelectionEvent, SelectionOutcome};
use hostbridge_domain::ports::{MetricsCollector, VersionDetector};
use hostbridge_domain::{Error, ErrorCode, Lifecycle, ServiceToken};
use hostbridge_infrastructure::di::{Constructed, ServiceContainer};
use hostbridge_infrastructure::metrics::InMemoryMetricsCollector;
use hostbridge_infrastructure::routing::{PortRegistry, PortSelector};
use hostbridge_infrastructure::version::{HostVersionDetector, StaticVersionSource};

trait Api: Send + Sync {
    fn built_for(&self) -> u32;
}

struct VersionedApi(u32);

impl Api for VersionedApi {
    fn built_for(&self) -> u32 {
        self.0
    }
}

struct Fixture {
    container: ServiceContainer,
    registry: PortRegistry<dyn Api>,
    poisoned_calls: Arc<AtomicUsize>,
}

/// Ports 13 and 14; when `poison` is set the 14 port panics on construction
fn fixture(poison: bool) -> Fixture {
    let v13: ServiceToken<dyn Api> = ServiceToken::new("ApiV13");
    let v14: ServiceToken<dyn Api> = ServiceToken::new("ApiV14");
    let poisoned_calls = Arc::new(AtomicUsize::new(0));
    let calls = Arc::clone(&poisoned_calls);

    let container = ServiceContainer::new();
    container
        .register_factory(
            &v13,
            |_| {
                let api: Arc<dyn Api> = Arc::new(VersionedApi(13));
                Ok(api.into())
            },
            Lifecycle::Singleton,
            &[],
        )
        .unwrap();
    container
        .register_factory(
            &v14,
            move |_| {
                if poison {
                    calls.fetch_add(1, Ordering::SeqCst);
                    panic!("v14 host API does not exist");
                }
                let api: Arc<dyn Api> = Arc::new(VersionedApi(14));
                Ok(api.into())
            },
            Lifecycle::Singleton,
            &[],
        )
        .unwrap();
    container.validate().unwrap().into_result().unwrap();

    let registry = PortRegistry::new("Api")
        .with_port(13, v13)
        .unwrap()
        .with_port(14, v14)
        .unwrap();

    Fixture {
        container,
        registry,
        poisoned_calls,
    }
}

fn selector_for(container: &ServiceContainer, host_version: &str) -> PortSelector {
    let detector: Arc<dyn VersionDetector> = Arc::new(HostVersionDetector::new(Arc::new(
        StaticVersionSource::new(host_version),
    )));
    PortSelector::new(container.clone(), detector)
}

#[test]
fn test_newer_host_falls_back_to_latest_port() {
    let fixture = fixture(false);
    let selector = selector_for(&fixture.container, "15.0");

    let selected = selector.select_port(&fixture.registry, None).unwrap();

    assert_eq!(selected.version, 14);
    assert_eq!(selected.instance.built_for(), 14);
    assert_eq!(selected.token, fixture.registry.tokens()[&14]);
}

#[test]
fn test_exact_host_version_selects_matching_port() {
    let fixture = fixture(false);
    let selector = selector_for(&fixture.container, "13.345");

    let api = selector
        .select_port_from_tokens("Api", fixture.registry.tokens(), None)
        .unwrap();

    assert_eq!(api.built_for(), 13);
}

#[test]
fn test_older_host_fails_with_diagnostics() {
    let fixture = fixture(false);
    let selector = selector_for(&fixture.container, "12");

    let err = selector.select_port(&fixture.registry, None).unwrap_err();

    assert_eq!(err.code(), ErrorCode::PortSelectionFailed);
    let details = err.details().unwrap();
    assert_eq!(details["version"], 12);
    assert_eq!(details["availableVersions"], "13, 14");
    assert_eq!(fixture.container.singleton_count(), 0);
}

#[test]
fn test_too_new_port_is_never_constructed() {
    let fixture = fixture(true);
    let selector = selector_for(&fixture.container, "13");

    for _ in 0..5 {
        let selected = selector.select_port(&fixture.registry, None).unwrap();
        assert_eq!(selected.version, 13);
    }

    assert_eq!(fixture.poisoned_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_failing_selected_port_is_a_resolution_failure() {
    let fixture = fixture(true);
    let selector = selector_for(&fixture.container, "14");

    let err = selector.select_port(&fixture.registry, None).unwrap_err();

    assert_eq!(err.code(), ErrorCode::PortResolutionFailed);
    assert_eq!(err.details().unwrap()["version"], 14);
    assert_eq!(fixture.poisoned_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_explicit_version_skips_detection() {
    let fixture = fixture(false);
    let detector: Arc<dyn VersionDetector> = Arc::new(HostVersionDetector::new(Arc::new(
        StaticVersionSource::absent(),
    )));
    let selector = PortSelector::new(fixture.container.clone(), detector);

    let selected = selector.select_port(&fixture.registry, Some(13)).unwrap();
    assert_eq!(selected.version, 13);
}

#[test]
fn test_detection_failure_is_a_selection_failure() {
    let fixture = fixture(false);
    let selector = selector_for(&fixture.container, "not-a-version");

    let err = selector.select_port(&fixture.registry, None).unwrap_err();

    assert_eq!(err.code(), ErrorCode::PortSelectionFailed);
    assert!(err.details().unwrap()["version"].is_null());
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_selection_events_are_published() {
    let fixture = fixture(true);
    let collector = Arc::new(InMemoryMetricsCollector::new());
    let detector: Arc<dyn VersionDetector> =
        Arc::new(HostVersionDetector::new(Arc::new(StaticVersionSource::new("13"))));
    let selector =
        PortSelector::new(fixture.container.clone(), detector).with_metrics(collector.clone());

    selector.select_port(&fixture.registry, None).unwrap();
    selector.select_port(&fixture.registry, Some(12)).unwrap_err();
    selector.select_port(&fixture.registry, Some(14)).unwrap_err();

    let outcomes: Vec<_> = collector.selections().iter().map(|e| e.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            SelectionOutcome::Selected,
            SelectionOutcome::SelectionFailed,
            SelectionOutcome::ResolutionFailed,
        ]
    );
    let first = &collector.selections()[0];
    assert_eq!(first.capability, "Api");
    assert_eq!(first.host_version, Some(13));
    assert_eq!(first.selected_version, Some(13));
}

struct PanickingCollector;

impl MetricsCollector for PanickingCollector {
    fn record_port_selection(&self, _event: &PortSelectionEvent) {
        panic!("collector exploded");
    }
}

#[test]
fn test_panicking_collector_does_not_affect_selection() {
    let fixture = fixture(false);
    let detector: Arc<dyn VersionDetector> =
        Arc::new(HostVersionDetector::new(Arc::new(StaticVersionSource::new("14"))));
    let selector = PortSelector::new(fixture.container.clone(), detector)
        .with_metrics(Arc::new(PanickingCollector));

    let selected = selector.select_port(&fixture.registry, None).unwrap();
    assert_eq!(selected.version, 14);
}

#[tokio::test]
async fn test_async_selection_with_async_factories() {
    let v13: ServiceToken<dyn Api> = ServiceToken::new("AsyncApiV13");
    let v15: ServiceToken<dyn Api> = ServiceToken::new("AsyncApiV15");
    let container = ServiceContainer::new();
    container
        .register_async_factory(
            &v13,
            |_| async {
                let api: Arc<dyn Api> = Arc::new(VersionedApi(13));
                Ok::<Constructed<dyn Api>, Error>(api.into())
            },
            Lifecycle::Singleton,
            &[],
        )
        .unwrap();
    container
        .register_async_factory(
            &v15,
            |_| async {
                Err::<Constructed<dyn Api>, Error>(Error::operation_failed("too new"))
            },
            Lifecycle::Singleton,
            &[],
        )
        .unwrap();
    container.validate().unwrap();

    let registry = PortRegistry::new("AsyncApi")
        .with_port(13, v13)
        .unwrap()
        .with_port(15, v15)
        .unwrap();
    let selector = selector_for(&container, "14");

    let selected = selector.select_port_async(&registry, None).await.unwrap();
    assert_eq!(selected.instance.built_for(), 13);

    let api = selector
        .select_port_from_tokens_async("AsyncApi", registry.tokens(), Some(13))
        .await
        .unwrap();
    assert!(Arc::ptr_eq(&api, &selected.instance));
}

#[test]
fn test_registry_isolated_from_container_state() {
    let fixture = fixture(false);
    fixture.container.dispose().unwrap();
    let selector = selector_for(&fixture.container, "14");

    let err = selector.select_port(&fixture.registry, None).unwrap_err();

    assert_eq!(err.code(), ErrorCode::PortResolutionFailed);
    assert_eq!(fixture.registry.versions(), vec![13, 14]);
}
