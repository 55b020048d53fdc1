//! Configuration Type Tests

use std::time::Duration;

use hostbridge_domain::ErrorCode;
use hostbridge_infrastructure::config::{ConfigBuilder, HostConfig, RetryConfig};

#[test]
fn test_retry_defaults() {
    let retry = RetryConfig::default();
    assert_eq!(retry.max_attempts, 3);
    assert_eq!(retry.delay(), Duration::from_millis(100));
    assert!((retry.backoff_factor - 2.0).abs() < f64::EPSILON);
}

#[test]
fn test_builder_validates() {
    let err = ConfigBuilder::new()
        .with_retry(RetryConfig {
            max_attempts: 0,
            ..RetryConfig::default()
        })
        .build()
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidConfiguration);

    let err = ConfigBuilder::new()
        .with_retry(RetryConfig {
            backoff_factor: -0.5,
            ..RetryConfig::default()
        })
        .build()
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidConfiguration);
}

#[test]
fn test_fixed_host_version_wins_over_env() {
    let host = HostConfig {
        version: Some("13.2".to_string()),
        version_env: "HOSTBRIDGE_UNUSED".to_string(),
    };
    assert_eq!(host.version_source().read_version().as_deref(), Some("13.2"));
}

#[test]
fn test_host_config_needs_some_source() {
    let mut config = ConfigBuilder::new().build().unwrap();
    config.host.version_env = "  ".to_string();

    assert!(hostbridge_infrastructure::config::loader::validate_config(&config).is_err());
}
