//! # HostBridge Domain Layer
//!
//! Core types shared by every other HostBridge crate: the error taxonomy,
//! capability tokens, validation faults, domain events and the port traits
//! that infrastructure and adapters implement.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy with stable error codes |
//! | [`value_objects`] | Tokens, lifecycles, port matches, validation reports |
//! | [`events`] | Observability events emitted by the port selector |
//! | [`ports`] | Boundary contracts (version detection, metrics, disposal, host capabilities) |
//! | [`constants`] | Domain-level constants |

pub mod constants;
pub mod error;
pub mod events;
pub mod ports;
pub mod value_objects;

// Re-export commonly used types
pub use error::{Error, ErrorCode, HostVersionError, Result};
pub use value_objects::{
    Lifecycle, PortMatch, ServiceToken, TokenKey, ValidationFault, ValidationFaultKind,
    ValidationReport,
};
