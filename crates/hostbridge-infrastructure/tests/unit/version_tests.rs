//! Host Version Detection Tests

use std::sync::Arc;

use hostbridge_domain::ports::{HostVersionSource, VersionDetector};
use hostbridge_domain::{Error, ErrorCode, HostVersionError};
use hostbridge_infrastructure::version::{
    EnvVersionSource, HostVersionDetector, StaticVersionSource, parse_major_version,
};

#[test]
fn test_detects_major_version() {
    let detector = HostVersionDetector::new(Arc::new(StaticVersionSource::new("v13.345")));
    assert_eq!(detector.detect_version().unwrap(), 13);
    assert_eq!(detector.cached_version(), Some(13));
}

#[test]
fn test_absent_version() {
    let detector = HostVersionDetector::new(Arc::new(StaticVersionSource::absent()));
    assert_eq!(detector.detect_version(), Err(HostVersionError::Absent));
}

#[test]
fn test_empty_and_unparseable() {
    assert_eq!(parse_major_version(""), Err(HostVersionError::Empty));
    assert_eq!(
        parse_major_version("thirteen"),
        Err(HostVersionError::Unparseable {
            raw: "thirteen".to_string()
        })
    );
    assert!(parse_major_version("-1").is_err());
}

#[test]
fn test_host_version_error_converts() {
    let err: Error = HostVersionError::Empty.into();
    assert_eq!(err.code(), ErrorCode::HostVersionUnavailable);
}

#[test]
fn test_env_source_reads_named_variable() {
    let source = EnvVersionSource::new("HOSTBRIDGE_VERSION_TEST_NEVER_SET");
    assert_eq!(source.variable(), "HOSTBRIDGE_VERSION_TEST_NEVER_SET");
    assert!(source.read_version().is_none());
}
