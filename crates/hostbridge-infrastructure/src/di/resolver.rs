//! Dependency resolver handed to factories

use std::fmt;
use std::sync::Arc;

use hostbridge_domain::{Error, Result, ServiceToken, TokenKey};

use super::ServiceContainer;
use super::container::downcast;

/// Resolves the declared dependencies of the registration being constructed
///
/// Requests for tokens that were not declared are refused, which keeps the
/// validated dependency graph an accurate picture of what factories do. The
/// resolver also carries the chain of tokens under construction and refuses
/// to re-enter any of them.
#[derive(Clone)]
pub struct Resolver {
    container: ServiceContainer,
    current: TokenKey,
    declared: Arc<[TokenKey]>,
    path: Vec<TokenKey>,
}

impl Resolver {
    pub(crate) fn new(
        container: ServiceContainer,
        current: TokenKey,
        declared: Arc<[TokenKey]>,
        path: Vec<TokenKey>,
    ) -> Self {
        Self {
            container,
            current,
            declared,
            path,
        }
    }

    /// Token currently being constructed
    pub fn current(&self) -> TokenKey {
        self.current
    }

    /// Resolve a declared dependency
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(
        &self,
        token: &ServiceToken<T>,
    ) -> Result<Arc<T>> {
        self.check_declared(token.key())?;
        let instance = self.container.resolve_key(token.key(), &self.path)?;
        downcast(token.key(), &instance)
    }

    /// Resolve a declared dependency that may have an async factory
    pub async fn resolve_async<T: ?Sized + Send + Sync + 'static>(
        &self,
        token: &ServiceToken<T>,
    ) -> Result<Arc<T>> {
        self.check_declared(token.key())?;
        let instance = self
            .container
            .resolve_key_async(token.key(), self.path.clone())
            .await?;
        downcast(token.key(), &instance)
    }

    fn check_declared(&self, key: TokenKey) -> Result<()> {
        if self.declared.contains(&key) {
            Ok(())
        } else {
            Err(Error::UndeclaredDependency {
                token: self.current.name().to_string(),
                dependency: key.name().to_string(),
            })
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("current", &self.current)
            .field("declared", &self.declared)
            .field("path", &self.path)
            .finish()
    }
}
