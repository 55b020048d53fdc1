//! Constructed instances and their teardown capability

use std::fmt;
use std::sync::Arc;

use hostbridge_domain::ports::{AsyncDisposable, Disposable};

/// Teardown capability recorded for an instance when it is constructed
///
/// The container inspects this tag at disposal time to decide whether to call
/// a synchronous hook, await an asynchronous one, or do nothing.
#[derive(Clone, Default)]
pub enum Teardown {
    /// Nothing to tear down
    #[default]
    None,
    /// Synchronous teardown hook
    Sync(Arc<dyn Disposable>),
    /// Asynchronous teardown hook
    Async(Arc<dyn AsyncDisposable>),
}

impl Teardown {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Sync(_) => f.write_str("Sync"),
            Self::Async(_) => f.write_str("Async"),
        }
    }
}

/// A factory's output: the instance plus its teardown capability
///
/// Plain instances convert with `.into()`:
///
/// ```
/// use std::sync::Arc;
/// use hostbridge_infrastructure::di::Constructed;
///
/// let built: Constructed<str> = Arc::<str>::from("value").into();
/// assert!(built.teardown().is_none());
/// ```
pub struct Constructed<T: ?Sized> {
    value: Arc<T>,
    teardown: Teardown,
}

impl<T: ?Sized> Constructed<T> {
    pub fn new(value: Arc<T>) -> Self {
        Self {
            value,
            teardown: Teardown::None,
        }
    }

    /// Attach a synchronous teardown hook
    #[must_use]
    pub fn with_teardown(mut self, hook: Arc<dyn Disposable>) -> Self {
        self.teardown = Teardown::Sync(hook);
        self
    }

    /// Attach an asynchronous teardown hook
    #[must_use]
    pub fn with_async_teardown(mut self, hook: Arc<dyn AsyncDisposable>) -> Self {
        self.teardown = Teardown::Async(hook);
        self
    }

    pub fn value(&self) -> &Arc<T> {
        &self.value
    }

    pub fn teardown(&self) -> &Teardown {
        &self.teardown
    }

    pub fn into_parts(self) -> (Arc<T>, Teardown) {
        (self.value, self.teardown)
    }
}

impl<T: ?Sized> From<Arc<T>> for Constructed<T> {
    fn from(value: Arc<T>) -> Self {
        Self::new(value)
    }
}
