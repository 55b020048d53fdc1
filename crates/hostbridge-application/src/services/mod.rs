//! Capability Services
//!
//! Façades that select a capability's port lazily, cache it, and retry host
//! calls through it. Each façade implements the capability's own port trait,
//! so callers never see version differences.

mod game;
mod hooks;
mod host_service;
mod settings;

pub use game::HostGameService;
pub use hooks::HostHooksService;
pub use host_service::HostService;
pub use settings::HostSettingsService;
