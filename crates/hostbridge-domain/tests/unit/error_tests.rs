//! Error Taxonomy Tests

use std::error::Error as _;

use hostbridge_domain::error::join_versions;
use hostbridge_domain::{Error, ErrorCode, HostVersionError};

#[test]
fn test_selection_failure_without_versions() {
    let err = Error::port_selection_failed(13, Vec::new());

    assert_eq!(err.code(), ErrorCode::PortSelectionFailed);
    assert!(err.to_string().contains("no port versions registered"));
    assert_eq!(err.details().unwrap()["availableVersions"], "");
}

#[test]
fn test_detection_failure_keeps_cause() {
    let cause: Error = HostVersionError::Absent.into();
    let err = Error::port_selection_detection_failed(cause, vec![13, 14]);

    assert_eq!(err.code(), ErrorCode::PortSelectionFailed);
    assert!(err.details().unwrap()["version"].is_null());
    let source = err.source().expect("detection cause is kept");
    assert!(source.to_string().contains("Host version unavailable"));
}

#[test]
fn test_resolution_failure_is_distinct_from_selection_failure() {
    let err = Error::port_resolution_failed("Game", 14, Error::not_found("token GameV14"));

    assert_eq!(err.code(), ErrorCode::PortResolutionFailed);
    assert_ne!(err.code(), ErrorCode::PortSelectionFailed);

    let details = err.details().unwrap();
    assert_eq!(details["capability"], "Game");
    assert_eq!(details["version"], 14);
    assert_eq!(details["cause"], "NOT_FOUND");
}

#[test]
fn test_circular_dependency_message() {
    let err = Error::CircularDependency {
        path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
    };
    assert_eq!(err.to_string(), "Circular dependency detected: A -> B -> A");
    assert_eq!(err.code().as_str(), "CIRCULAR_DEPENDENCY");
}

#[test]
fn test_operation_failure_with_source() {
    let io = std::io::Error::other("host socket closed");
    let err = Error::operation_failed_with_source("hooks.call failed", io);

    assert_eq!(err.code(), ErrorCode::OperationFailed);
    assert!(err.source().is_some());
    assert!(err.details().is_none());
}

#[test]
fn test_join_versions() {
    assert_eq!(join_versions(&[13, 14, 15]), "13, 14, 15");
    assert_eq!(join_versions(&[]), "");
}
