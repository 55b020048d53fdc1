//! HostBridge Bootstrap
//!
//! Builder that wires configuration, version detection, the service
//! container, port selection and retry into ready-to-use capability services.
//!
//! Port adapters are registered on [`HostBridgeBuilder::container`] and
//! mapped to host versions with [`HostBridgeBuilder::game_port`] and friends.
//! [`HostBridgeBuilder::build`] validates the whole graph once; nothing is
//! constructed until a capability is first used.

use std::sync::Arc;

use hostbridge_domain::ports::{
    GamePort, HooksPort, HostVersionSource, MetricsCollector, SettingsPort, VersionDetector,
};
use hostbridge_domain::{Result, ServiceToken};
use hostbridge_infrastructure::config::HostBridgeConfig;
use hostbridge_infrastructure::config::loader::validate_config;
use hostbridge_infrastructure::logging::init_logging;
use hostbridge_infrastructure::resilience::RetryService;
use hostbridge_infrastructure::routing::{PortRegistry, PortSelector};
use hostbridge_infrastructure::{HostVersionDetector, ServiceContainer};
use tracing::{debug, info};

use crate::health::{CapabilityHealthCheck, CapabilityProbe, HealthReport};
use crate::services::{HostGameService, HostHooksService, HostService, HostSettingsService};
use crate::tokens;

/// Builder for [`HostBridge`]
pub struct HostBridgeBuilder {
    config: HostBridgeConfig,
    container: ServiceContainer,
    version_source: Option<Arc<dyn HostVersionSource>>,
    metrics: Option<Arc<dyn MetricsCollector>>,
    install_logging: bool,
    game: PortRegistry<dyn GamePort>,
    settings: PortRegistry<dyn SettingsPort>,
    hooks: PortRegistry<dyn HooksPort>,
}

impl HostBridgeBuilder {
    pub fn new(config: HostBridgeConfig) -> Self {
        Self {
            config,
            container: ServiceContainer::new(),
            version_source: None,
            metrics: None,
            install_logging: false,
            game: PortRegistry::new("Game"),
            settings: PortRegistry::new("Settings"),
            hooks: PortRegistry::new("Hooks"),
        }
    }

    /// Read the host version from `source` instead of the configured one
    #[must_use]
    pub fn with_version_source(mut self, source: Arc<dyn HostVersionSource>) -> Self {
        self.version_source = Some(source);
        self
    }

    /// Report cache and selection activity to `collector`
    #[must_use]
    pub fn with_metrics(mut self, collector: Arc<dyn MetricsCollector>) -> Self {
        self.metrics = Some(collector);
        self
    }

    /// Install the global tracing subscriber from the logging configuration
    #[must_use]
    pub fn with_logging(mut self) -> Self {
        self.install_logging = true;
        self
    }

    /// Container that port adapters are registered on
    pub fn container(&self) -> &ServiceContainer {
        &self.container
    }

    /// Map a game port token to the host version it was built for
    pub fn game_port(mut self, version: u32, token: ServiceToken<dyn GamePort>) -> Result<Self> {
        self.game.register(version, token)?;
        Ok(self)
    }

    /// Map a settings port token to the host version it was built for
    pub fn settings_port(
        mut self,
        version: u32,
        token: ServiceToken<dyn SettingsPort>,
    ) -> Result<Self> {
        self.settings.register(version, token)?;
        Ok(self)
    }

    /// Map a hooks port token to the host version it was built for
    pub fn hooks_port(mut self, version: u32, token: ServiceToken<dyn HooksPort>) -> Result<Self> {
        self.hooks.register(version, token)?;
        Ok(self)
    }

    /// Validate and wire everything
    ///
    /// Fails on invalid configuration or on any dependency graph fault; the
    /// error lists every fault found.
    pub fn build(self) -> Result<HostBridge> {
        validate_config(&self.config)?;
        if self.install_logging {
            init_logging(&self.config.logging)?;
        }

        let config = Arc::new(self.config);
        let source = self
            .version_source
            .unwrap_or_else(|| config.host.version_source());
        let detector: Arc<dyn VersionDetector> = Arc::new(HostVersionDetector::new(source));
        let retry = RetryService::new(config.retry.clone());

        let container = self.container;
        container.register_value(&*tokens::HOST_CONFIG, Arc::clone(&config))?;
        container.register_value(&*tokens::VERSION_DETECTOR, Arc::clone(&detector))?;
        container.register_value(&*tokens::RETRY_SERVICE, Arc::new(retry.clone()))?;
        container.validate()?.into_result()?;

        let mut selector = PortSelector::new(container.clone(), Arc::clone(&detector));
        if let Some(collector) = self.metrics {
            container.cache().attach_metrics(Arc::clone(&collector));
            selector = selector.with_metrics(collector);
        }
        let selector = Arc::new(selector);

        let game = Arc::new(HostService::new(
            Arc::new(self.game),
            Arc::clone(&selector),
            retry.clone(),
        ));
        let settings = Arc::new(HostService::new(
            Arc::new(self.settings),
            Arc::clone(&selector),
            retry.clone(),
        ));
        let hooks = Arc::new(HostService::new(
            Arc::new(self.hooks),
            Arc::clone(&selector),
            retry,
        ));

        let game_probe: Arc<dyn CapabilityProbe> = game.clone();
        let settings_probe: Arc<dyn CapabilityProbe> = settings.clone();
        let hooks_probe: Arc<dyn CapabilityProbe> = hooks.clone();
        let health = CapabilityHealthCheck::new()
            .with_probe(game_probe)
            .with_probe(settings_probe)
            .with_probe(hooks_probe);

        info!(
            registrations = container.registration_count(),
            game_versions = ?game.registry().versions(),
            settings_versions = ?settings.registry().versions(),
            hooks_versions = ?hooks.registry().versions(),
            "HostBridge ready"
        );

        Ok(HostBridge {
            config,
            container,
            detector,
            selector,
            game: HostGameService::new(game),
            settings: HostSettingsService::new(settings),
            hooks: HostHooksService::new(hooks),
            health,
        })
    }
}

impl std::fmt::Debug for HostBridgeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBridgeBuilder")
            .field("config", &self.config)
            .field("game", &self.game)
            .field("settings", &self.settings)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

/// Wired capability services over one validated container
pub struct HostBridge {
    config: Arc<HostBridgeConfig>,
    container: ServiceContainer,
    detector: Arc<dyn VersionDetector>,
    selector: Arc<PortSelector>,
    game: HostGameService,
    settings: HostSettingsService,
    hooks: HostHooksService,
    health: CapabilityHealthCheck,
}

impl std::fmt::Debug for HostBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBridge")
            .field("container", &self.container)
            .field("game", &self.game)
            .field("settings", &self.settings)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

impl HostBridge {
    pub fn builder(config: HostBridgeConfig) -> HostBridgeBuilder {
        HostBridgeBuilder::new(config)
    }

    pub fn config(&self) -> &HostBridgeConfig {
        &self.config
    }

    pub fn container(&self) -> &ServiceContainer {
        &self.container
    }

    pub fn detector(&self) -> &Arc<dyn VersionDetector> {
        &self.detector
    }

    pub fn selector(&self) -> &Arc<PortSelector> {
        &self.selector
    }

    pub fn game(&self) -> &HostGameService {
        &self.game
    }

    pub fn settings(&self) -> &HostSettingsService {
        &self.settings
    }

    pub fn hooks(&self) -> &HostHooksService {
        &self.hooks
    }

    /// Detected major version of the running host
    pub fn host_version(&self) -> Result<u32> {
        Ok(self.detector.detect_version()?)
    }

    /// Probe every capability
    pub fn health(&self) -> HealthReport {
        self.health.check()
    }

    /// Drop every cached port so the next call selects again
    ///
    /// The detected host version stays cached: it cannot change within one
    /// process.
    pub fn invalidate(&self) {
        self.game.service().invalidate();
        self.settings.service().invalidate();
        self.hooks.service().invalidate();
        debug!("Cleared selected ports");
    }

    /// Dispose the container, awaiting async teardown hooks
    ///
    /// Cached ports are dropped too, so every later call fails with the
    /// container's `DISPOSED` error as its cause.
    pub async fn shutdown(&self) -> Result<()> {
        info!("Shutting down HostBridge");
        self.game.service().invalidate();
        self.settings.service().invalidate();
        self.hooks.service().invalidate();
        self.container.dispose_async().await
    }
}
