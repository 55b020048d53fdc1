//! Service Container
//!
//! Owns the dependency graph and the singleton cache.
//!
//! ## Concurrency
//!
//! The container is `Send + Sync` and cheap to clone (clones share state).
//! Graph state lives behind a `RwLock` that is never held while user code
//! runs. Singleton construction is serialized per registration with a
//! double-checked cache lookup, so any number of parallel callers, sync or
//! async, observe exactly one construction per singleton token.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use hostbridge_domain::{Lifecycle, ServiceToken};
//! use hostbridge_infrastructure::di::ServiceContainer;
//!
//! let greeting: ServiceToken<str> = ServiceToken::new("Greeting");
//! let shout: ServiceToken<String> = ServiceToken::new("Shout");
//!
//! let container = ServiceContainer::new();
//! container.register_value(&greeting, Arc::from("hello")).unwrap();
//! container
//!     .register_factory(
//!         &shout,
//!         move |resolver| Ok(Arc::new(resolver.resolve(&greeting)?.to_uppercase()).into()),
//!         Lifecycle::Singleton,
//!         &[greeting.key()],
//!     )
//!     .unwrap();
//!
//! assert!(container.validate().unwrap().is_valid());
//! assert_eq!(container.resolve(&shout).unwrap().as_str(), "HELLO");
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use hostbridge_domain::ports::{AsyncDisposable, MetricsCollector};
use hostbridge_domain::{Error, Lifecycle, Result, ServiceToken, TokenKey, ValidationReport};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::registration::{Construction, Registration, RegistrationKind};
use super::validation::validate_graph;
use super::{CachedInstance, Constructed, Injectable, InstanceCache, Resolver, Teardown};
use crate::utils::panic_message;

/// Container state machine
///
/// `Registering` and `Validated` are both active states; `Disposed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerState {
    /// Accepting registrations, resolution not yet permitted
    Registering,
    /// Graph validated and frozen, resolution permitted
    Validated,
    /// Torn down
    Disposed,
}

struct Graph {
    state: ContainerState,
    registrations: HashMap<TokenKey, Arc<Registration>>,
}

struct ContainerInner {
    graph: RwLock<Graph>,
    cache: InstanceCache,
}

/// Token-keyed dependency injection container
#[derive(Clone)]
pub struct ServiceContainer {
    inner: Arc<ContainerInner>,
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceContainer {
    /// Create an empty container
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                graph: RwLock::new(Graph {
                    state: ContainerState::Registering,
                    registrations: HashMap::new(),
                }),
                cache: InstanceCache::new(),
            }),
        }
    }

    /// Create an empty container reporting cache activity to `collector`
    pub fn with_metrics(collector: Arc<dyn MetricsCollector>) -> Self {
        let container = Self::new();
        container.inner.cache.attach_metrics(collector);
        container
    }

    /// The singleton cache, e.g. to attach a metrics collector later
    pub fn cache(&self) -> &InstanceCache {
        &self.inner.cache
    }

    pub fn state(&self) -> ContainerState {
        self.read_graph().state
    }

    pub fn is_disposed(&self) -> bool {
        self.state() == ContainerState::Disposed
    }

    pub fn is_validated(&self) -> bool {
        self.state() == ContainerState::Validated
    }

    pub fn is_registered<T: ?Sized>(&self, token: &ServiceToken<T>) -> bool {
        self.read_graph()
            .registrations
            .contains_key(&token.key())
    }

    /// How `key` is registered, if at all
    pub fn registration_kind(&self, key: TokenKey) -> Option<RegistrationKind> {
        self.read_graph()
            .registrations
            .get(&key)
            .map(|registration| registration.kind)
    }

    pub fn registration_count(&self) -> usize {
        self.read_graph().registrations.len()
    }

    /// Number of singletons constructed so far
    pub fn singleton_count(&self) -> usize {
        self.inner.cache.len()
    }

    fn read_graph(&self) -> RwLockReadGuard<'_, Graph> {
        self.inner
            .graph
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_graph(&self) -> RwLockWriteGuard<'_, Graph> {
        self.inner
            .graph
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Registration
// ============================================================================

impl ServiceContainer {
    /// Register a synchronous factory
    ///
    /// `dependencies` lists every token the factory resolves; the factory's
    /// [`Resolver`] refuses anything else. A singleton factory that reaches
    /// back into the container for its own token on the same thread fails
    /// with `CIRCULAR_DEPENDENCY`.
    pub fn register_factory<T, F>(
        &self,
        token: &ServiceToken<T>,
        factory: F,
        lifecycle: Lifecycle,
        dependencies: &[TokenKey],
    ) -> Result<()>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver) -> Result<Constructed<T>> + Send + Sync + 'static,
    {
        let construction = Construction::Factory(Arc::new(move |resolver: &Resolver| {
            factory(resolver).map(erase)
        }));
        self.insert(Registration::new(
            token.key(),
            RegistrationKind::Factory,
            construction,
            lifecycle,
            dependencies.to_vec(),
        ))
    }

    /// Register an asynchronous factory, resolvable only through [`Self::resolve_async`]
    pub fn register_async_factory<T, F, Fut>(
        &self,
        token: &ServiceToken<T>,
        factory: F,
        lifecycle: Lifecycle,
        dependencies: &[TokenKey],
    ) -> Result<()>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(Resolver) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Constructed<T>>> + Send + 'static,
    {
        let factory = Arc::new(factory);
        let construction = Construction::AsyncFactory(Arc::new(move |resolver: Resolver| {
            let factory = Arc::clone(&factory);
            async move { factory(resolver).await.map(erase) }.boxed()
        }));
        self.insert(Registration::new(
            token.key(),
            RegistrationKind::AsyncFactory,
            construction,
            lifecycle,
            dependencies.to_vec(),
        ))
    }

    /// Register a type that knows how to construct itself
    pub fn register_class<C: Injectable>(
        &self,
        token: &ServiceToken<C>,
        lifecycle: Lifecycle,
    ) -> Result<()> {
        let construction = Construction::Factory(Arc::new(|resolver: &Resolver| {
            let instance = Arc::new(C::construct(resolver)?);
            let teardown = C::teardown(&instance);
            Ok(CachedInstance::new(instance, teardown))
        }));
        self.insert(Registration::new(
            token.key(),
            RegistrationKind::Class,
            construction,
            lifecycle,
            C::dependencies(),
        ))
    }

    /// Register a fixed value
    ///
    /// The value is owned by the caller: it is shared as-is and never torn
    /// down by the container.
    pub fn register_value<T>(&self, token: &ServiceToken<T>, value: Arc<T>) -> Result<()>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.insert(Registration::new(
            token.key(),
            RegistrationKind::Value,
            Construction::Value(CachedInstance::new(value, Teardown::None)),
            Lifecycle::Singleton,
            Vec::new(),
        ))
    }

    /// Make `alias` resolve whatever `target` resolves
    pub fn register_alias<T: ?Sized>(
        &self,
        alias: &ServiceToken<T>,
        target: &ServiceToken<T>,
    ) -> Result<()> {
        self.insert(Registration::new(
            alias.key(),
            RegistrationKind::Alias,
            Construction::Alias(target.key()),
            Lifecycle::Singleton,
            vec![target.key()],
        ))
    }

    fn insert(&self, registration: Registration) -> Result<()> {
        let key = registration.key;
        let mut graph = self.write_graph();
        match graph.state {
            ContainerState::Disposed => {
                return Err(Error::disposed(format!("register {key}")));
            }
            ContainerState::Validated => {
                return Err(Error::RegistrationFrozen {
                    token: key.name().to_string(),
                });
            }
            ContainerState::Registering => {}
        }
        if graph.registrations.contains_key(&key) {
            return Err(Error::AlreadyRegistered {
                token: key.name().to_string(),
            });
        }

        debug!(
            token = %key,
            kind = ?registration.kind,
            lifecycle = %registration.lifecycle,
            dependencies = registration.dependencies.len(),
            "Registered service"
        );
        graph.registrations.insert(key, Arc::new(registration));
        Ok(())
    }
}

fn erase<T: ?Sized + Send + Sync + 'static>(constructed: Constructed<T>) -> CachedInstance {
    let (value, teardown) = constructed.into_parts();
    CachedInstance::new(value, teardown)
}

// ============================================================================
// Validation
// ============================================================================

impl ServiceContainer {
    /// Walk the whole dependency graph and report every fault
    ///
    /// Always recomputes. A clean report freezes the registrations and
    /// unlocks resolution; a faulty one leaves the container open so the
    /// faults can be fixed. Concurrent calls are serialized.
    pub fn validate(&self) -> Result<ValidationReport> {
        let mut graph = self.write_graph();
        if graph.state == ContainerState::Disposed {
            return Err(Error::disposed("validate"));
        }

        let report = ValidationReport::new(validate_graph(&graph.registrations));
        if report.is_valid() {
            if graph.state == ContainerState::Registering {
                info!(
                    registrations = graph.registrations.len(),
                    "Service container validated"
                );
            }
            graph.state = ContainerState::Validated;
        } else {
            warn!(
                faults = report.faults().len(),
                "Service container validation found faults"
            );
            for fault in report.faults() {
                warn!(token = %fault.token, kind = ?fault.kind, "{}", fault.detail);
            }
        }
        Ok(report)
    }

    /// [`Self::validate`] on the blocking thread pool
    pub async fn validate_async(&self) -> Result<ValidationReport> {
        let container = self.clone();
        tokio::task::spawn_blocking(move || container.validate())
            .await
            .map_err(|e| Error::internal(format!("validation task failed: {e}")))?
    }
}

// ============================================================================
// Resolution
// ============================================================================

impl ServiceContainer {
    /// Resolve `token`, constructing its dependency subgraph as needed
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(
        &self,
        token: &ServiceToken<T>,
    ) -> Result<Arc<T>> {
        let instance = self.resolve_key(token.key(), &[])?;
        downcast(token.key(), &instance)
    }

    /// [`Self::resolve`], discarding the failure
    pub fn try_resolve<T: ?Sized + Send + Sync + 'static>(
        &self,
        token: &ServiceToken<T>,
    ) -> Option<Arc<T>> {
        self.resolve(token).ok()
    }

    /// Resolve `token`, awaiting async factories anywhere in its subgraph
    pub async fn resolve_async<T: ?Sized + Send + Sync + 'static>(
        &self,
        token: &ServiceToken<T>,
    ) -> Result<Arc<T>> {
        let instance = self.resolve_key_async(token.key(), Vec::new()).await?;
        downcast(token.key(), &instance)
    }

    fn registration_for(&self, key: TokenKey) -> Result<Arc<Registration>> {
        let graph = self.read_graph();
        match graph.state {
            ContainerState::Disposed => return Err(Error::disposed(format!("resolve {key}"))),
            ContainerState::Registering => {
                return Err(Error::NotValidated {
                    token: key.name().to_string(),
                });
            }
            ContainerState::Validated => {}
        }
        graph
            .registrations
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("token {key}")))
    }

    pub(crate) fn resolve_key(&self, key: TokenKey, path: &[TokenKey]) -> Result<CachedInstance> {
        check_cycle(key, path)?;
        let registration = self.registration_for(key)?;

        match &registration.construction {
            Construction::Value(instance) => Ok(instance.clone()),
            Construction::Alias(target) => self.resolve_key(*target, &extend(path, key)),
            Construction::AsyncFactory(_) => Err(Error::AsyncFactory {
                token: key.name().to_string(),
            }),
            Construction::Factory(_) if !registration.lifecycle.is_cached() => {
                self.construct(&registration, path)
            }
            Construction::Factory(_) => {
                if let Some(hit) = self.inner.cache.get(key) {
                    return Ok(hit);
                }
                let _building = BuildingGuard::enter(key)?;
                let _guard = registration
                    .sync_guard
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                if let Some(hit) = self.inner.cache.peek(key) {
                    return Ok(hit);
                }
                let instance = self.construct(&registration, path)?;
                self.store_singleton(key, instance)
            }
        }
    }

    pub(crate) fn resolve_key_async(
        &self,
        key: TokenKey,
        path: Vec<TokenKey>,
    ) -> BoxFuture<'static, Result<CachedInstance>> {
        let container = self.clone();
        async move {
            check_cycle(key, &path)?;
            let registration = container.registration_for(key)?;

            match &registration.construction {
                Construction::Alias(target) => {
                    container
                        .resolve_key_async(*target, extend(&path, key))
                        .await
                }
                Construction::AsyncFactory(_) if !registration.lifecycle.is_cached() => {
                    container.construct_async(&registration, &path).await
                }
                Construction::AsyncFactory(_) => {
                    if let Some(hit) = container.inner.cache.get(key) {
                        return Ok(hit);
                    }
                    let _guard = registration.async_guard.lock().await;
                    if let Some(hit) = container.inner.cache.peek(key) {
                        return Ok(hit);
                    }
                    let instance = container.construct_async(&registration, &path).await?;
                    container.store_singleton_async(key, instance).await
                }
                Construction::Value(_) | Construction::Factory(_) => {
                    container.resolve_key(key, &path)
                }
            }
        }
        .boxed()
    }

    fn construct(&self, registration: &Registration, path: &[TokenKey]) -> Result<CachedInstance> {
        let Construction::Factory(factory) = &registration.construction else {
            return Err(Error::internal(format!(
                "{} has no synchronous factory",
                registration.key
            )));
        };
        let resolver = self.resolver_for(registration, path);

        debug!(token = %registration.key, "Constructing service");
        match std::panic::catch_unwind(AssertUnwindSafe(|| factory(&resolver))) {
            Ok(Ok(instance)) => Ok(instance),
            Ok(Err(e)) => Err(wrap_factory_error(registration.key, e)),
            Err(payload) => Err(Error::factory_failed(
                registration.key.name(),
                format!("factory panicked: {}", panic_message(payload.as_ref())),
            )),
        }
    }

    async fn construct_async(
        &self,
        registration: &Registration,
        path: &[TokenKey],
    ) -> Result<CachedInstance> {
        let Construction::AsyncFactory(factory) = &registration.construction else {
            return Err(Error::internal(format!(
                "{} has no asynchronous factory",
                registration.key
            )));
        };
        let resolver = self.resolver_for(registration, path);
        let factory = Arc::clone(factory);

        debug!(token = %registration.key, "Constructing service asynchronously");
        match AssertUnwindSafe(async move { factory(resolver).await })
            .catch_unwind()
            .await
        {
            Ok(Ok(instance)) => Ok(instance),
            Ok(Err(e)) => Err(wrap_factory_error(registration.key, e)),
            Err(payload) => Err(Error::factory_failed(
                registration.key.name(),
                format!("factory panicked: {}", panic_message(payload.as_ref())),
            )),
        }
    }

    fn resolver_for(&self, registration: &Registration, path: &[TokenKey]) -> Resolver {
        Resolver::new(
            self.clone(),
            registration.key,
            Arc::clone(&registration.dependencies),
            extend(path, registration.key),
        )
    }

    /// Publish a freshly built singleton unless the container was disposed meanwhile
    ///
    /// An orphaned instance with an async hook has it spawned on the current
    /// runtime, as [`Self::dispose`] does.
    fn store_singleton(&self, key: TokenKey, instance: CachedInstance) -> Result<CachedInstance> {
        if self.publish(key, &instance) {
            return Ok(instance);
        }
        let outcome = match instance.teardown() {
            Teardown::Async(hook) => spawn_async_teardown(key, hook),
            teardown => run_sync_teardown(key, teardown),
        };
        if let Err(failure) = outcome {
            warn!(token = %key, error = %failure, "Teardown failed");
        }
        Err(Error::disposed(format!("resolve {key}")))
    }

    /// [`Self::store_singleton`], awaiting an orphaned instance's async hook inline
    async fn store_singleton_async(
        &self,
        key: TokenKey,
        instance: CachedInstance,
    ) -> Result<CachedInstance> {
        if self.publish(key, &instance) {
            return Ok(instance);
        }
        let outcome = match instance.teardown().clone() {
            Teardown::Async(hook) => run_async_teardown(key, hook).await,
            teardown => run_sync_teardown(key, &teardown),
        };
        if let Err(failure) = outcome {
            warn!(token = %key, error = %failure, "Teardown failed");
        }
        Err(Error::disposed(format!("resolve {key}")))
    }

    /// Cache `instance`; `false` when the container is already disposed
    fn publish(&self, key: TokenKey, instance: &CachedInstance) -> bool {
        let graph = self.read_graph();
        if graph.state == ContainerState::Disposed {
            warn!(token = %key, "Container disposed during construction, tearing instance down");
            return false;
        }
        self.inner.cache.set(key, instance.clone());
        true
    }
}

thread_local! {
    /// Singletons whose factory is running on this thread
    static BUILDING: RefCell<Vec<TokenKey>> = const { RefCell::new(Vec::new()) };
}

/// Marks a singleton as under construction on the current thread
///
/// The per-registration construction lock is not reentrant, so a factory
/// resolving its own token through a captured container would deadlock on
/// it. The guard turns that into a `CircularDependency` error.
struct BuildingGuard {
    key: TokenKey,
}

impl BuildingGuard {
    fn enter(key: TokenKey) -> Result<Self> {
        BUILDING.with(|building| {
            let mut building = building.borrow_mut();
            check_cycle(key, &building)?;
            building.push(key);
            Ok(Self { key })
        })
    }
}

impl Drop for BuildingGuard {
    fn drop(&mut self) {
        BUILDING.with(|building| {
            let mut building = building.borrow_mut();
            if let Some(position) = building.iter().rposition(|entry| *entry == self.key) {
                building.remove(position);
            }
        });
    }
}

/// Attribute a factory error to the token being built, passing container errors through
fn wrap_factory_error(key: TokenKey, error: Error) -> Error {
    match error {
        Error::Disposed { .. }
        | Error::CircularDependency { .. }
        | Error::UndeclaredDependency { .. }
        | Error::FactoryFailed { .. } => error,
        other => Error::factory_failed_with_source(key.name(), other),
    }
}

fn check_cycle(key: TokenKey, path: &[TokenKey]) -> Result<()> {
    match path.iter().position(|entry| *entry == key) {
        Some(start) => {
            let mut cycle: Vec<String> = path[start..]
                .iter()
                .map(|entry| entry.name().to_string())
                .collect();
            cycle.push(key.name().to_string());
            Err(Error::CircularDependency { path: cycle })
        }
        None => Ok(()),
    }
}

fn extend(path: &[TokenKey], key: TokenKey) -> Vec<TokenKey> {
    let mut extended = Vec::with_capacity(path.len() + 1);
    extended.extend_from_slice(path);
    extended.push(key);
    extended
}

pub(crate) fn downcast<T: ?Sized + Send + Sync + 'static>(
    key: TokenKey,
    instance: &CachedInstance,
) -> Result<Arc<T>> {
    instance.downcast::<T>().ok_or_else(|| Error::TypeMismatch {
        token: key.name().to_string(),
        expected: std::any::type_name::<T>(),
    })
}

// ============================================================================
// Disposal
// ============================================================================

impl ServiceContainer {
    /// Tear the container down, running synchronous teardown hooks inline
    ///
    /// Async hooks are spawned on the current Tokio runtime when there is one;
    /// without a runtime they cannot run and are reported as failures. Use
    /// [`Self::dispose_async`] to await them. Idempotent: only the first call
    /// tears anything down.
    pub fn dispose(&self) -> Result<()> {
        let Some(instances) = self.begin_disposal() else {
            return Ok(());
        };

        let mut failures = Vec::new();
        for (key, instance) in instances {
            match instance.teardown() {
                Teardown::None => {}
                Teardown::Sync(_) => {
                    if let Err(failure) = run_sync_teardown(key, instance.teardown()) {
                        failures.push(failure);
                    }
                }
                Teardown::Async(hook) => {
                    if let Err(failure) = spawn_async_teardown(key, hook) {
                        failures.push(failure);
                    }
                }
            }
        }
        finish_disposal(failures)
    }

    /// Tear the container down, awaiting every async teardown hook concurrently
    pub async fn dispose_async(&self) -> Result<()> {
        let Some(instances) = self.begin_disposal() else {
            return Ok(());
        };

        let mut failures = Vec::new();
        let mut pending = Vec::new();
        for (key, instance) in instances {
            match instance.teardown() {
                Teardown::None => {}
                Teardown::Sync(_) => {
                    if let Err(failure) = run_sync_teardown(key, instance.teardown()) {
                        failures.push(failure);
                    }
                }
                Teardown::Async(hook) => {
                    pending.push(run_async_teardown(key, Arc::clone(hook)));
                }
            }
        }

        failures.extend(
            join_all(pending)
                .await
                .into_iter()
                .filter_map(|outcome| outcome.err()),
        );
        finish_disposal(failures)
    }

    /// Flip to `Disposed` and take the cached instances, newest registration first
    ///
    /// Returns `None` when the container was already disposed.
    fn begin_disposal(&self) -> Option<Vec<(TokenKey, CachedInstance)>> {
        let mut graph = self.write_graph();
        if graph.state == ContainerState::Disposed {
            return None;
        }
        graph.state = ContainerState::Disposed;
        graph.registrations.clear();

        let mut instances: Vec<_> = self.inner.cache.get_all_instances().into_iter().collect();
        self.inner.cache.clear();
        instances.sort_by(|(a, _), (b, _)| b.cmp(a));

        info!(instances = instances.len(), "Disposing service container");
        Some(instances)
    }
}

fn run_sync_teardown(key: TokenKey, teardown: &Teardown) -> std::result::Result<(), String> {
    let Teardown::Sync(hook) = teardown else {
        return Ok(());
    };
    match std::panic::catch_unwind(AssertUnwindSafe(|| hook.dispose())) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(format!("{key}: {e}")),
        Err(payload) => Err(format!(
            "{key}: teardown panicked: {}",
            panic_message(payload.as_ref())
        )),
    }
}

async fn run_async_teardown(
    key: TokenKey,
    hook: Arc<dyn AsyncDisposable>,
) -> std::result::Result<(), String> {
    match AssertUnwindSafe(async move { hook.dispose_async().await })
        .catch_unwind()
        .await
    {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(format!("{key}: {e}")),
        Err(payload) => Err(format!(
            "{key}: teardown panicked: {}",
            panic_message(payload.as_ref())
        )),
    }
}

/// Run an async hook on the current Tokio runtime without waiting for it
fn spawn_async_teardown(
    key: TokenKey,
    hook: &Arc<dyn AsyncDisposable>,
) -> std::result::Result<(), String> {
    let handle = tokio::runtime::Handle::try_current()
        .map_err(|_| format!("{key}: async teardown needs a runtime, use dispose_async"))?;
    let hook = Arc::clone(hook);
    handle.spawn(async move {
        if let Err(failure) = run_async_teardown(key, hook).await {
            warn!(error = %failure, "Async teardown failed");
        }
    });
    Ok(())
}

fn finish_disposal(failures: Vec<String>) -> Result<()> {
    if failures.is_empty() {
        debug!("Service container disposed");
        Ok(())
    } else {
        warn!(failures = failures.len(), "Service container disposed with teardown failures");
        Err(Error::DisposalFailed { failures })
    }
}

impl fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.read_graph();
        f.debug_struct("ServiceContainer")
            .field("state", &graph.state)
            .field("registrations", &graph.registrations.len())
            .field("singletons", &self.inner.cache.len())
            .finish()
    }
}
