//! Dependency Injection
//!
//! A token-keyed service container with lifecycle management, dependency
//! graph validation and ordered teardown.
//!
//! ## Lifecycle
//!
//! ```text
//! register_* ──► validate() ──► resolve / resolve_async ──► dispose / dispose_async
//!  (append-only)   (freezes)        (singletons cached)          (terminal)
//! ```
//!
//! Registrations are rejected once a validation pass succeeds, resolution is
//! rejected until one does, and every operation is rejected after disposal.

mod cache;
mod constructed;
mod container;
mod registration;
mod resolver;
mod validation;

pub use cache::{CachedInstance, InstanceCache};
pub use constructed::{Constructed, Teardown};
pub use container::{ContainerState, ServiceContainer};
pub use registration::{Injectable, RegistrationKind};
pub use resolver::Resolver;
