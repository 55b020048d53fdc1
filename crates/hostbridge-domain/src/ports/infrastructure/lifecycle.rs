//! Teardown capabilities
//!
//! Instances opt into container teardown by exposing one of these traits when
//! they are constructed. The container probes for the capability at disposal
//! time; there is no shared base type.

use async_trait::async_trait;

use crate::error::Result;

/// Synchronous teardown hook
pub trait Disposable: Send + Sync {
    fn dispose(&self) -> Result<()>;
}

/// Asynchronous teardown hook
#[async_trait]
pub trait AsyncDisposable: Send + Sync {
    async fn dispose_async(&self) -> Result<()>;
}
