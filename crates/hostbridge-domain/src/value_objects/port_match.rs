//! Port match result

use std::fmt;

use super::ServiceToken;

/// Outcome of a port match: the winning token and its version
///
/// Derived from a version table on demand, never stored.
pub struct PortMatch<T: ?Sized> {
    /// Token of the selected port
    pub token: ServiceToken<T>,
    /// Host version the selected port was built for
    pub version: u32,
}

impl<T: ?Sized> PortMatch<T> {
    pub fn new(token: ServiceToken<T>, version: u32) -> Self {
        Self { token, version }
    }
}

impl<T: ?Sized> Clone for PortMatch<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for PortMatch<T> {}

impl<T: ?Sized> PartialEq for PortMatch<T> {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token && self.version == other.version
    }
}

impl<T: ?Sized> Eq for PortMatch<T> {}

impl<T: ?Sized> fmt::Debug for PortMatch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortMatch")
            .field("token", &self.token.key())
            .field("version", &self.version)
            .finish()
    }
}
