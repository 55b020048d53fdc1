//! Capability tokens
//!
//! A [`ServiceToken<T>`] names one resolvable contract. The type parameter is
//! a compile-time aid only: at runtime a token is nothing but a
//! process-unique id and a human readable name, and two tokens are equal only
//! when their ids are equal.
//!
//! ```
//! use hostbridge_domain::ServiceToken;
//!
//! trait Clock: Send + Sync {}
//!
//! let a: ServiceToken<dyn Clock> = ServiceToken::new("Clock");
//! let b: ServiceToken<dyn Clock> = ServiceToken::new("Clock");
//! assert_ne!(a, b);
//! assert_eq!(a, a.clone());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(1);

/// Untyped identity of a token, used as the key of every container map
#[derive(Clone, Copy)]
pub struct TokenKey {
    id: u64,
    name: &'static str,
}

impl TokenKey {
    /// Process-unique id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Human readable name given at creation
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TokenKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TokenKey {}

impl Hash for TokenKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TokenKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TokenKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Typed capability token resolving to `Arc<T>`
pub struct ServiceToken<T: ?Sized> {
    key: TokenKey,
    _contract: PhantomData<fn() -> Box<T>>,
}

impl<T: ?Sized> ServiceToken<T> {
    /// Create a new token with a fresh identity
    pub fn new(name: &'static str) -> Self {
        Self {
            key: TokenKey {
                id: NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed),
                name,
            },
            _contract: PhantomData,
        }
    }

    /// Untyped identity of this token
    pub fn key(&self) -> TokenKey {
        self.key
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        self.key.name
    }
}

impl<T: ?Sized> Clone for ServiceToken<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for ServiceToken<T> {}

impl<T: ?Sized> PartialEq for ServiceToken<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T: ?Sized> Eq for ServiceToken<T> {}

impl<T: ?Sized> Hash for ServiceToken<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<T: ?Sized> fmt::Debug for ServiceToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceToken")
            .field("key", &self.key)
            .field("contract", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: ?Sized> fmt::Display for ServiceToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.key, f)
    }
}

impl<T: ?Sized> From<ServiceToken<T>> for TokenKey {
    fn from(token: ServiceToken<T>) -> Self {
        token.key
    }
}

impl<T: ?Sized> From<&ServiceToken<T>> for TokenKey {
    fn from(token: &ServiceToken<T>) -> Self {
        token.key
    }
}
