//! Host version detection
//!
//! The detector reads a raw version string once from a [`HostVersionSource`],
//! parses the major version and caches it for the rest of the process.
//!
//! [`HostVersionSource`]: hostbridge_domain::ports::HostVersionSource

mod detector;
mod sources;

pub use detector::{HostVersionDetector, parse_major_version};
pub use sources::{EnvVersionSource, FnVersionSource, StaticVersionSource};
