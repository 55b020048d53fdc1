//! Per-capability version tables

use std::collections::BTreeMap;
use std::fmt;

use hostbridge_domain::{Error, Result, ServiceToken};

/// `{host version -> port token}` for one capability, ordered by version
pub type VersionTable<T> = BTreeMap<u32, ServiceToken<T>>;

/// Owns the version table of one capability
///
/// A plain data holder: selection lives in the match strategy and
/// construction in the container.
pub struct PortRegistry<T: ?Sized> {
    capability: String,
    ports: VersionTable<T>,
}

impl<T: ?Sized> PortRegistry<T> {
    pub fn new<S: Into<String>>(capability: S) -> Self {
        Self {
            capability: capability.into(),
            ports: BTreeMap::new(),
        }
    }

    /// Add the port built for `version`; each version may be registered once
    pub fn register(&mut self, version: u32, token: ServiceToken<T>) -> Result<()> {
        if self.ports.contains_key(&version) {
            return Err(Error::AlreadyRegistered {
                token: format!("{} port for version {version}", self.capability),
            });
        }
        self.ports.insert(version, token);
        Ok(())
    }

    /// Builder form of [`Self::register`]
    pub fn with_port(mut self, version: u32, token: ServiceToken<T>) -> Result<Self> {
        self.register(version, token)?;
        Ok(self)
    }

    /// Read-only view of the version table
    pub fn tokens(&self) -> &VersionTable<T> {
        &self.ports
    }

    /// Registered versions, ascending
    pub fn versions(&self) -> Vec<u32> {
        self.ports.keys().copied().collect()
    }

    pub fn capability(&self) -> &str {
        &self.capability
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

impl<T: ?Sized> fmt::Debug for PortRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortRegistry")
            .field("capability", &self.capability)
            .field("versions", &self.versions())
            .finish()
    }
}
