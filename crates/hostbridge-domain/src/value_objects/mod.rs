//! Value objects
//!
//! Immutable values passed between the container, the port layer and callers.

pub mod lifecycle;
pub mod port_match;
pub mod token;
pub mod validation;

pub use lifecycle::Lifecycle;
pub use port_match::PortMatch;
pub use token::{ServiceToken, TokenKey};
pub use validation::{ValidationFault, ValidationFaultKind, ValidationReport};
