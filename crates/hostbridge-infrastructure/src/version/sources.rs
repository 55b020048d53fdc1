//! Host version sources

use std::fmt;

use hostbridge_domain::ports::HostVersionSource;

/// A fixed version string, typically from configuration or tests
#[derive(Debug, Clone, Default)]
pub struct StaticVersionSource {
    version: Option<String>,
}

impl StaticVersionSource {
    pub fn new<S: Into<String>>(version: S) -> Self {
        Self {
            version: Some(version.into()),
        }
    }

    /// A source for a host that exposes no version
    pub fn absent() -> Self {
        Self { version: None }
    }
}

impl HostVersionSource for StaticVersionSource {
    fn read_version(&self) -> Option<String> {
        self.version.clone()
    }
}

/// Reads the version string from an environment variable on every call
#[derive(Debug, Clone)]
pub struct EnvVersionSource {
    variable: String,
}

impl EnvVersionSource {
    pub fn new<S: Into<String>>(variable: S) -> Self {
        Self {
            variable: variable.into(),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }
}

impl HostVersionSource for EnvVersionSource {
    fn read_version(&self) -> Option<String> {
        std::env::var(&self.variable).ok()
    }
}

/// Adapts a closure that reads the version from a live host object
pub struct FnVersionSource<F> {
    read: F,
}

impl<F> FnVersionSource<F>
where
    F: Fn() -> Option<String> + Send + Sync,
{
    pub fn new(read: F) -> Self {
        Self { read }
    }
}

impl<F> HostVersionSource for FnVersionSource<F>
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn read_version(&self) -> Option<String> {
        (self.read)()
    }
}

impl<F> fmt::Debug for FnVersionSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnVersionSource").finish_non_exhaustive()
    }
}
