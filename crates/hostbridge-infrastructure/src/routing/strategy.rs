//! Port match strategies

use hostbridge_domain::{Error, PortMatch, Result};

use super::VersionTable;

/// Chooses which registered port serves a target host version
///
/// Implementations are pure: they never resolve or construct anything.
pub trait PortMatchStrategy: Send + Sync {
    fn select<T: ?Sized>(&self, table: &VersionTable<T>, version: u32) -> Result<PortMatch<T>>;
}

/// Highest registered version that is not newer than the host
///
/// A port built for a newer host may call APIs the running host lacks, so it
/// is never a candidate. Older ports are forward compatible.
///
/// ```
/// use std::collections::BTreeMap;
/// use hostbridge_domain::ServiceToken;
/// use hostbridge_infrastructure::routing::{GreedyPortMatchStrategy, PortMatchStrategy};
///
/// let mut table = BTreeMap::new();
/// table.insert(13, ServiceToken::<str>::new("V13"));
/// table.insert(14, ServiceToken::<str>::new("V14"));
///
/// let strategy = GreedyPortMatchStrategy;
/// assert_eq!(strategy.select(&table, 15).unwrap().version, 14);
/// assert!(strategy.select(&table, 12).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPortMatchStrategy;

impl PortMatchStrategy for GreedyPortMatchStrategy {
    fn select<T: ?Sized>(&self, table: &VersionTable<T>, version: u32) -> Result<PortMatch<T>> {
        table
            .iter()
            .filter(|(candidate, _)| **candidate <= version)
            .max_by_key(|(candidate, _)| **candidate)
            .map(|(candidate, token)| PortMatch::new(*token, *candidate))
            .ok_or_else(|| Error::port_selection_failed(version, table.keys().copied().collect()))
    }
}
