//! Capability Health
//!
//! Probes every capability façade by selecting its port and reports which
//! capabilities are usable on the running host. A capability with no
//! compatible port is reported `Down` instead of failing the whole check,
//! so plugin code can degrade feature by feature.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hostbridge_domain::Result;
use hostbridge_infrastructure::logging::log_health_check;
use hostbridge_infrastructure::utils::TimedOperation;
use serde::{Deserialize, Serialize};

use crate::services::HostService;

/// Health of one capability, or of the whole bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    /// Some capabilities are down
    Degraded,
    Down,
}

/// Anything that can report whether its capability has a usable port
pub trait CapabilityProbe: Send + Sync {
    /// Capability name, e.g. "Game"
    fn capability(&self) -> &str;

    /// Select the port and return the version it was built for
    fn probe(&self) -> Result<u32>;
}

impl<T: ?Sized + Send + Sync + 'static> CapabilityProbe for HostService<T> {
    fn capability(&self) -> &str {
        HostService::capability(self)
    }

    fn probe(&self) -> Result<u32> {
        self.selected().map(|selected| selected.version)
    }
}

/// Probe result for one capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityHealth {
    pub capability: String,
    pub status: HealthStatus,
    /// Version of the selected port
    pub version: Option<u32>,
    /// Stable error code of the failure, e.g. `PORT_SELECTION_FAILED`
    pub error_code: Option<String>,
    pub error: Option<String>,
    pub response_time_ms: u64,
}

/// Result of probing every registered capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub checks: Vec<CapabilityHealth>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Up
    }

    /// Check for one capability
    pub fn capability(&self, name: &str) -> Option<&CapabilityHealth> {
        self.checks.iter().find(|check| check.capability == name)
    }

    /// Names of the capabilities that are down
    pub fn unavailable(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|check| check.status == HealthStatus::Down)
            .map(|check| check.capability.as_str())
            .collect()
    }
}

/// Health check over a set of capability probes
#[derive(Clone, Default)]
pub struct CapabilityHealthCheck {
    probes: Vec<Arc<dyn CapabilityProbe>>,
}

impl CapabilityHealthCheck {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn CapabilityProbe>) -> Self {
        self.probes.push(probe);
        self
    }

    pub fn add_probe(&mut self, probe: Arc<dyn CapabilityProbe>) {
        self.probes.push(probe);
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// Probe every capability
    ///
    /// `Up` when all capabilities are up, `Down` when none is, otherwise
    /// `Degraded`. An empty check is `Up`.
    pub fn check(&self) -> HealthReport {
        let checks: Vec<CapabilityHealth> = self
            .probes
            .iter()
            .map(|probe| check_one(probe.as_ref()))
            .collect();
        let up = checks
            .iter()
            .filter(|check| check.status == HealthStatus::Up)
            .count();

        let status = if up == checks.len() {
            HealthStatus::Up
        } else if up == 0 {
            HealthStatus::Down
        } else {
            HealthStatus::Degraded
        };

        HealthReport {
            status,
            timestamp: Utc::now(),
            checks,
        }
    }
}

impl std::fmt::Debug for CapabilityHealthCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let capabilities: Vec<&str> = self.probes.iter().map(|p| p.capability()).collect();
        f.debug_struct("CapabilityHealthCheck")
            .field("capabilities", &capabilities)
            .finish()
    }
}

fn check_one(probe: &dyn CapabilityProbe) -> CapabilityHealth {
    let timer = TimedOperation::start();
    let outcome = probe.probe();
    let response_time_ms = timer.elapsed_ms();

    match outcome {
        Ok(version) => {
            log_health_check(probe.capability(), true, None);
            CapabilityHealth {
                capability: probe.capability().to_string(),
                status: HealthStatus::Up,
                version: Some(version),
                error_code: None,
                error: None,
                response_time_ms,
            }
        }
        Err(e) => {
            let message = e.to_string();
            log_health_check(probe.capability(), false, Some(&message));
            CapabilityHealth {
                capability: probe.capability().to_string(),
                status: HealthStatus::Down,
                version: None,
                error_code: Some(e.code().as_str().to_string()),
                error: Some(message),
                response_time_ms,
            }
        }
    }
}
