//! Shared façade machinery

use std::fmt;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use hostbridge_domain::Result;
use hostbridge_infrastructure::resilience::RetryService;
use hostbridge_infrastructure::routing::{PortRegistry, PortSelector, SelectedPort};
use tracing::debug;

/// Lazily selected, cached port of one capability
///
/// The port is selected on first use. A failed selection is not cached, so
/// the next call selects again.
pub struct HostService<T: ?Sized + Send + Sync + 'static> {
    registry: Arc<PortRegistry<T>>,
    selector: Arc<PortSelector>,
    retry: RetryService,
    selected: RwLock<Option<SelectedPort<T>>>,
}

impl<T: ?Sized + Send + Sync + 'static> HostService<T> {
    pub fn new(
        registry: Arc<PortRegistry<T>>,
        selector: Arc<PortSelector>,
        retry: RetryService,
    ) -> Self {
        Self {
            registry,
            selector,
            retry,
            selected: RwLock::new(None),
        }
    }

    pub fn capability(&self) -> &str {
        self.registry.capability()
    }

    pub fn registry(&self) -> &PortRegistry<T> {
        &self.registry
    }

    /// Version of the cached port, if one was selected
    pub fn selected_version(&self) -> Option<u32> {
        self.cached().map(|selected| selected.version)
    }

    /// Selected port, selecting it on first use
    pub fn selected(&self) -> Result<SelectedPort<T>> {
        if let Some(selected) = self.cached() {
            return Ok(selected);
        }
        let selected = self.selector.select_port(&self.registry, None)?;
        Ok(self.store(selected))
    }

    /// [`Self::selected`] for capabilities with async port factories
    pub async fn selected_async(&self) -> Result<SelectedPort<T>> {
        if let Some(selected) = self.cached() {
            return Ok(selected);
        }
        let selected = self.selector.select_port_async(&self.registry, None).await?;
        Ok(self.store(selected))
    }

    pub fn port(&self) -> Result<Arc<T>> {
        self.selected().map(|selected| selected.instance)
    }

    pub async fn port_async(&self) -> Result<Arc<T>> {
        self.selected_async().await.map(|selected| selected.instance)
    }

    /// Forget the cached port so the next call selects again
    pub fn invalidate(&self) {
        let previous = self
            .selected
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(previous) = previous {
            debug!(
                capability = self.capability(),
                version = previous.version,
                "Invalidated selected port"
            );
        }
    }

    /// Run a host call against the port with the configured retry policy
    ///
    /// Selection failures are returned as-is; only the call itself is retried.
    pub fn call<R, F>(&self, operation: &str, call: F) -> Result<R>
    where
        F: Fn(&T) -> Result<R>,
    {
        let port = self.port()?;
        self.retry
            .retry_sync(&self.operation_name(operation), || call(&port))
    }

    /// Async counterpart of [`Self::call`]
    pub async fn call_async<R, F, Fut>(&self, operation: &str, call: F) -> Result<R>
    where
        F: Fn(Arc<T>) -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        let port = self.port_async().await?;
        self.retry
            .retry(&self.operation_name(operation), || call(Arc::clone(&port)))
            .await
    }

    fn operation_name(&self, operation: &str) -> String {
        format!("{}.{operation}", self.capability())
    }

    fn cached(&self) -> Option<SelectedPort<T>> {
        self.selected
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, selected: SelectedPort<T>) -> SelectedPort<T> {
        let mut slot = self.selected.write().unwrap_or_else(PoisonError::into_inner);
        // A concurrent caller may have stored first; both hold the same singleton
        slot.get_or_insert(selected).clone()
    }
}

impl<T: ?Sized + Send + Sync + 'static> fmt::Debug for HostService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostService")
            .field("capability", &self.capability())
            .field("selected_version", &self.selected_version())
            .finish_non_exhaustive()
    }
}
