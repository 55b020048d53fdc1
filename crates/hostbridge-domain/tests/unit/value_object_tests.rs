//! Value Object Tests

use std::time::Duration;

use hostbridge_domain::events::{PortSelectionEvent, SelectionOutcome};
use hostbridge_domain::{Lifecycle, PortMatch, ServiceToken};

trait Clock: Send + Sync {}

#[test]
fn test_tokens_with_same_name_are_distinct() {
    let a: ServiceToken<dyn Clock> = ServiceToken::new("Clock");
    let b: ServiceToken<dyn Clock> = ServiceToken::new("Clock");

    assert_ne!(a, b);
    assert_eq!(a.to_string(), "Clock");
    assert!(a.key() < b.key());
}

#[test]
fn test_lifecycle_defaults_to_singleton() {
    assert_eq!(Lifecycle::default(), Lifecycle::Singleton);
    assert!(Lifecycle::Singleton.is_cached());
    assert!(!Lifecycle::Transient.is_cached());
    assert_eq!(Lifecycle::Transient.to_string(), "transient");
}

#[test]
fn test_port_match_equality() {
    let token: ServiceToken<str> = ServiceToken::new("Port");
    assert_eq!(PortMatch::new(token, 13), PortMatch::new(token, 13));
    assert_ne!(PortMatch::new(token, 13), PortMatch::new(token, 14));
}

#[test]
fn test_selection_event_success() {
    let event = PortSelectionEvent {
        capability: "Hooks".to_string(),
        host_version: Some(12),
        selected_version: None,
        outcome: SelectionOutcome::SelectionFailed,
        duration: Duration::ZERO,
    };
    assert!(!event.is_success());
    assert_eq!(event.outcome.as_str(), "selection_failed");
}
