//! Singleton instance cache
//!
//! Keyed store of constructed singletons. Lookups report hits and misses to
//! an optional metrics collector; the cache works the same with or without one.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use hostbridge_domain::TokenKey;
use hostbridge_domain::ports::MetricsCollector;

use super::Teardown;

/// A type-erased constructed instance and its teardown capability
///
/// The erased value is always an `Arc<T>` for the token's contract `T`.
#[derive(Clone)]
pub struct CachedInstance {
    value: Arc<dyn Any + Send + Sync>,
    teardown: Teardown,
}

impl CachedInstance {
    /// Erase a typed instance
    pub fn new<T: ?Sized + Send + Sync + 'static>(value: Arc<T>, teardown: Teardown) -> Self {
        Self {
            value: Arc::new(value),
            teardown,
        }
    }

    /// Recover the typed instance
    pub fn downcast<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.value.downcast_ref::<Arc<T>>().cloned()
    }

    pub fn teardown(&self) -> &Teardown {
        &self.teardown
    }

    /// Whether two entries hold the same allocation
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for CachedInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedInstance")
            .field("teardown", &self.teardown)
            .finish_non_exhaustive()
    }
}

/// Singleton storage with hit/miss reporting
#[derive(Default)]
pub struct InstanceCache {
    entries: DashMap<TokenKey, CachedInstance>,
    metrics: ArcSwapOption<Arc<dyn MetricsCollector>>,
}

impl InstanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach (or replace) the metrics collector
    pub fn attach_metrics(&self, collector: Arc<dyn MetricsCollector>) {
        self.metrics.store(Some(Arc::new(collector)));
    }

    /// Stop reporting metrics
    pub fn detach_metrics(&self) {
        self.metrics.store(None);
    }

    /// Look up an instance, reporting a hit or a miss
    pub fn get(&self, key: TokenKey) -> Option<CachedInstance> {
        let entry = self.peek(key);
        self.report(key, entry.is_some());
        entry
    }

    /// Whether an instance is cached, reporting a hit or a miss
    pub fn has(&self, key: TokenKey) -> bool {
        let present = self.entries.contains_key(&key);
        self.report(key, present);
        present
    }

    /// Store an instance, replacing any previous one
    pub fn set(&self, key: TokenKey, instance: CachedInstance) {
        self.entries.insert(key, instance);
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Copy of every cached entry; mutating it does not touch the cache
    pub fn get_all_instances(&self) -> HashMap<TokenKey, CachedInstance> {
        self.entries
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookup without metrics, used for double-checked construction
    pub(crate) fn peek(&self, key: TokenKey) -> Option<CachedInstance> {
        self.entries.get(&key).map(|entry| entry.value().clone())
    }

    fn report(&self, key: TokenKey, hit: bool) {
        if let Some(collector) = self.metrics.load().as_deref() {
            if hit {
                collector.record_cache_hit(key.name());
            } else {
                collector.record_cache_miss(key.name());
            }
        }
    }
}

impl fmt::Debug for InstanceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceCache")
            .field("entries", &self.entries.len())
            .field("metrics_attached", &self.metrics.load().is_some())
            .finish()
    }
}
