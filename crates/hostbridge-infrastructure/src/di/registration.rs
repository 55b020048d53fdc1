//! Registrations stored by the container

use std::sync::Arc;

use futures::future::BoxFuture;
use hostbridge_domain::{Lifecycle, Result, TokenKey};
use serde::Serialize;

use super::{CachedInstance, Resolver, Teardown};

pub(crate) type SyncFactory = Arc<dyn Fn(&Resolver) -> Result<CachedInstance> + Send + Sync>;
pub(crate) type AsyncFactory =
    Arc<dyn Fn(Resolver) -> BoxFuture<'static, Result<CachedInstance>> + Send + Sync>;

/// How a registration produces its instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationKind {
    /// Synchronous factory closure
    Factory,
    /// Asynchronous factory closure
    AsyncFactory,
    /// [`Injectable`] type
    Class,
    /// Fixed, caller-owned value
    Value,
    /// Forward to another token
    Alias,
}

pub(crate) enum Construction {
    Factory(SyncFactory),
    AsyncFactory(AsyncFactory),
    Value(CachedInstance),
    Alias(TokenKey),
}

pub(crate) struct Registration {
    pub(crate) key: TokenKey,
    pub(crate) kind: RegistrationKind,
    pub(crate) construction: Construction,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) dependencies: Arc<[TokenKey]>,
    /// Serializes singleton construction for synchronous factories
    pub(crate) sync_guard: std::sync::Mutex<()>,
    /// Serializes singleton construction for asynchronous factories
    pub(crate) async_guard: tokio::sync::Mutex<()>,
}

impl Registration {
    pub(crate) fn new(
        key: TokenKey,
        kind: RegistrationKind,
        construction: Construction,
        lifecycle: Lifecycle,
        dependencies: Vec<TokenKey>,
    ) -> Self {
        Self {
            key,
            kind,
            construction,
            lifecycle,
            dependencies: dependencies.into(),
            sync_guard: std::sync::Mutex::new(()),
            async_guard: tokio::sync::Mutex::new(()),
        }
    }
}

/// A type the container can construct on its own
///
/// The class-style counterpart of a factory registration: dependencies are
/// declared by the type and construction pulls them from the [`Resolver`].
///
/// ```
/// use std::sync::Arc;
/// use hostbridge_domain::{Lifecycle, Result, ServiceToken};
/// use hostbridge_infrastructure::di::{Injectable, Resolver, ServiceContainer};
///
/// struct Clock;
///
/// impl Injectable for Clock {
///     fn construct(_resolver: &Resolver) -> Result<Self> {
///         Ok(Clock)
///     }
/// }
///
/// let token: ServiceToken<Clock> = ServiceToken::new("Clock");
/// let container = ServiceContainer::new();
/// container.register_class(&token, Lifecycle::Singleton).unwrap();
/// container.validate().unwrap().into_result().unwrap();
/// let clock: Arc<Clock> = container.resolve(&token).unwrap();
/// ```
pub trait Injectable: Send + Sync + Sized + 'static {
    /// Tokens this type resolves while constructing itself
    fn dependencies() -> Vec<TokenKey> {
        Vec::new()
    }

    /// Build the instance
    fn construct(resolver: &Resolver) -> Result<Self>;

    /// Teardown capability of a constructed instance
    fn teardown(_instance: &Arc<Self>) -> Teardown {
        Teardown::None
    }
}
