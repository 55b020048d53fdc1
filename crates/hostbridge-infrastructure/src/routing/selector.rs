//! Port Selector
//!
//! Orchestrates version detection, matching and lazy resolution.
//!
//! Only the winning token ever reaches the container. Ports built for newer
//! hosts may probe host APIs in their constructors, so merely resolving one
//! on an older host can fail hard even if none of its methods are called.

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use hostbridge_domain::events::{PortSelectionEvent, SelectionOutcome};
use hostbridge_domain::ports::{MetricsCollector, VersionDetector};
use hostbridge_domain::{Error, PortMatch, Result, ServiceToken};
use tracing::{debug, info, warn};

use super::{GreedyPortMatchStrategy, PortMatchStrategy, PortRegistry, VersionTable};
use crate::di::ServiceContainer;
use crate::utils::TimedOperation;

/// A resolved port together with the version it was built for
pub struct SelectedPort<T: ?Sized> {
    pub instance: Arc<T>,
    pub version: u32,
    pub token: ServiceToken<T>,
}

impl<T: ?Sized> Clone for SelectedPort<T> {
    fn clone(&self) -> Self {
        Self {
            instance: Arc::clone(&self.instance),
            version: self.version,
            token: self.token,
        }
    }
}

impl<T: ?Sized> fmt::Debug for SelectedPort<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedPort")
            .field("token", &self.token.key())
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// Selects and resolves the compatible port of a capability
pub struct PortSelector<S = GreedyPortMatchStrategy> {
    container: ServiceContainer,
    detector: Arc<dyn VersionDetector>,
    strategy: S,
    metrics: Option<Arc<dyn MetricsCollector>>,
}

impl PortSelector<GreedyPortMatchStrategy> {
    /// Selector using the greedy match strategy
    pub fn new(container: ServiceContainer, detector: Arc<dyn VersionDetector>) -> Self {
        Self::with_strategy(container, detector, GreedyPortMatchStrategy)
    }
}

impl<S: PortMatchStrategy> PortSelector<S> {
    pub fn with_strategy(
        container: ServiceContainer,
        detector: Arc<dyn VersionDetector>,
        strategy: S,
    ) -> Self {
        Self {
            container,
            detector,
            strategy,
            metrics: None,
        }
    }

    /// Publish a [`PortSelectionEvent`] after every attempt
    #[must_use]
    pub fn with_metrics(mut self, collector: Arc<dyn MetricsCollector>) -> Self {
        self.metrics = Some(collector);
        self
    }

    pub fn container(&self) -> &ServiceContainer {
        &self.container
    }

    pub fn detector(&self) -> &Arc<dyn VersionDetector> {
        &self.detector
    }

    /// Select from a raw version table and resolve the winner
    ///
    /// `version` overrides detection; without it the host version is detected.
    pub fn select_port_from_tokens<T: ?Sized + Send + Sync + 'static>(
        &self,
        capability: &str,
        tokens: &VersionTable<T>,
        version: Option<u32>,
    ) -> Result<Arc<T>> {
        self.select(capability, tokens, version)
            .map(|selected| selected.instance)
    }

    /// Select the compatible port of a registry and resolve it
    pub fn select_port<T: ?Sized + Send + Sync + 'static>(
        &self,
        registry: &PortRegistry<T>,
        version: Option<u32>,
    ) -> Result<SelectedPort<T>> {
        self.select(registry.capability(), registry.tokens(), version)
    }

    /// [`Self::select_port_from_tokens`] for ports with async factories
    pub async fn select_port_from_tokens_async<T: ?Sized + Send + Sync + 'static>(
        &self,
        capability: &str,
        tokens: &VersionTable<T>,
        version: Option<u32>,
    ) -> Result<Arc<T>> {
        self.select_async(capability, tokens, version)
            .await
            .map(|selected| selected.instance)
    }

    /// [`Self::select_port`] for ports with async factories
    pub async fn select_port_async<T: ?Sized + Send + Sync + 'static>(
        &self,
        registry: &PortRegistry<T>,
        version: Option<u32>,
    ) -> Result<SelectedPort<T>> {
        self.select_async(registry.capability(), registry.tokens(), version)
            .await
    }

    fn select<T: ?Sized + Send + Sync + 'static>(
        &self,
        capability: &str,
        tokens: &VersionTable<T>,
        version: Option<u32>,
    ) -> Result<SelectedPort<T>> {
        let timer = TimedOperation::start();
        let (host_version, matched) = match self.match_port(tokens, version) {
            Ok(found) => found,
            Err((host_version, e)) => {
                return Err(self.selection_failed(capability, host_version, e, timer));
            }
        };

        let resolved = self.container.resolve(&matched.token);
        self.finish(capability, host_version, matched, resolved, timer)
    }

    async fn select_async<T: ?Sized + Send + Sync + 'static>(
        &self,
        capability: &str,
        tokens: &VersionTable<T>,
        version: Option<u32>,
    ) -> Result<SelectedPort<T>> {
        let timer = TimedOperation::start();
        let (host_version, matched) = match self.match_port(tokens, version) {
            Ok(found) => found,
            Err((host_version, e)) => {
                return Err(self.selection_failed(capability, host_version, e, timer));
            }
        };

        let resolved = self.container.resolve_async(&matched.token).await;
        self.finish(capability, host_version, matched, resolved, timer)
    }

    /// Target version plus the strategy's pick, or the failure and whatever version was known
    #[allow(clippy::type_complexity)]
    fn match_port<T: ?Sized>(
        &self,
        tokens: &VersionTable<T>,
        version: Option<u32>,
    ) -> std::result::Result<(u32, PortMatch<T>), (Option<u32>, Error)> {
        let host_version = match version {
            Some(explicit) => explicit,
            None => self.detector.detect_version().map_err(|e| {
                (
                    None,
                    Error::port_selection_detection_failed(
                        e.into(),
                        tokens.keys().copied().collect(),
                    ),
                )
            })?,
        };

        self.strategy
            .select(tokens, host_version)
            .map(|matched| (host_version, matched))
            .map_err(|e| (Some(host_version), e))
    }

    fn selection_failed(
        &self,
        capability: &str,
        host_version: Option<u32>,
        error: Error,
        timer: TimedOperation,
    ) -> Error {
        warn!(
            capability,
            host_version,
            error = %error,
            "No compatible port selected"
        );
        self.emit(PortSelectionEvent {
            capability: capability.to_string(),
            host_version,
            selected_version: None,
            outcome: SelectionOutcome::SelectionFailed,
            duration: timer.elapsed(),
        });
        error
    }

    fn finish<T: ?Sized>(
        &self,
        capability: &str,
        host_version: u32,
        matched: PortMatch<T>,
        resolved: Result<Arc<T>>,
        timer: TimedOperation,
    ) -> Result<SelectedPort<T>> {
        let outcome = match resolved {
            Ok(instance) => {
                info!(
                    capability,
                    host_version,
                    version = matched.version,
                    elapsed_ms = timer.elapsed_ms(),
                    "Selected port"
                );
                Ok(SelectedPort {
                    instance,
                    version: matched.version,
                    token: matched.token,
                })
            }
            Err(e) => {
                warn!(
                    capability,
                    host_version,
                    version = matched.version,
                    error = %e,
                    "Selected port could not be resolved"
                );
                Err(Error::port_resolution_failed(capability, matched.version, e))
            }
        };

        self.emit(PortSelectionEvent {
            capability: capability.to_string(),
            host_version: Some(host_version),
            selected_version: Some(matched.version),
            outcome: if outcome.is_ok() {
                SelectionOutcome::Selected
            } else {
                SelectionOutcome::ResolutionFailed
            },
            duration: timer.elapsed(),
        });
        outcome
    }

    fn emit(&self, event: PortSelectionEvent) {
        let Some(collector) = &self.metrics else {
            return;
        };
        let delivered = std::panic::catch_unwind(AssertUnwindSafe(|| {
            collector.record_port_selection(&event);
        }));
        if delivered.is_err() {
            debug!(capability = %event.capability, "Metrics collector panicked, event dropped");
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for PortSelector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortSelector")
            .field("container", &self.container)
            .field("strategy", &self.strategy)
            .field("metrics_attached", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
