use crate::error::Result;

/// Host event hook registration
pub trait HooksPort: Send + Sync {
    /// Register a listener; returns the host's listener id
    fn on(&self, hook: &str, listener: &str) -> Result<u64>;

    /// Remove a listener by id
    fn off(&self, hook: &str, listener_id: u64) -> Result<()>;

    /// Fire a hook; `false` when a listener vetoed it
    fn call_all(&self, hook: &str, payload: &serde_json::Value) -> Result<bool>;
}
