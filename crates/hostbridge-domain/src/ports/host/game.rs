use crate::error::Result;

/// Access to the host's game/world object
pub trait GamePort: Send + Sync {
    /// Identifier of the loaded world
    fn world_id(&self) -> Result<String>;

    /// Identifier of the active game system
    fn system_id(&self) -> Result<String>;

    /// Whether the host finished its own initialization
    fn is_ready(&self) -> bool;
}
