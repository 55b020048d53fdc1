//! Port Routing
//!
//! Versioned port selection: a [`PortRegistry`] holds the `{version -> token}`
//! table of one capability, a [`PortMatchStrategy`] picks the winning version
//! and the [`PortSelector`] resolves only that winner through the container.

pub mod registry;
pub mod selector;
pub mod strategy;

pub use registry::{PortRegistry, VersionTable};
pub use selector::{PortSelector, SelectedPort};
pub use strategy::{GreedyPortMatchStrategy, PortMatchStrategy};
