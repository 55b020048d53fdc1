//! Host capability ports
//!
//! Each trait is the contract one capability's versioned adapters implement.
//! Adapters for different host versions are registered under different tokens
//! and selected at runtime by the port selector.

mod game;
mod hooks;
mod settings;

pub use game::GamePort;
pub use hooks::HooksPort;
pub use settings::SettingsPort;
