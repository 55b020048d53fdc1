use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Host settings storage
///
/// Reads are synchronous; writes go through the host's persistence layer and
/// are asynchronous.
#[async_trait]
pub trait SettingsPort: Send + Sync {
    /// Register a setting with its default value
    fn register(&self, namespace: &str, key: &str, default: Value) -> Result<()>;

    /// Current value of a setting
    fn get(&self, namespace: &str, key: &str) -> Result<Value>;

    /// Persist a new value
    async fn set(&self, namespace: &str, key: &str, value: Value) -> Result<Value>;
}
