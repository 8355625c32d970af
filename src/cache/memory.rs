//! The base in-memory cache.

use std::sync::Arc;

use crate::cache::EvictionLog;
use crate::error::Result;
use crate::stats::Statistics;
use crate::store::MapStore;
use crate::traits::{Cache, Evicted, Store};

/// Cache owning one map-backed store, one statistics registry and one
/// eviction log.
///
/// # Example
///
/// ```
/// use tagcache::cache::MemoryCache;
/// use tagcache::entry::Entry;
/// use tagcache::key::Key;
/// use tagcache::traits::Cache;
///
/// let cache: MemoryCache<&str, String> = MemoryCache::new();
/// let key = Key::new("user:1");
/// cache.store().save(key.clone(), Entry::new(key.clone(), "Ada".into())).unwrap();
/// assert_eq!(cache.size().unwrap(), 2);
/// ```
pub struct MemoryCache<K, V> {
    store: Arc<dyn Store<K, V>>,
    statistics: Arc<Statistics>,
    evicted: Arc<dyn Evicted<K, V>>,
}

impl<K, V> MemoryCache<K, V>
where
    K: Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Cache over a fresh [`MapStore`] with the standard counters.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MapStore::new()))
    }

    /// Cache over a caller-supplied store, e.g. a `MapStore::with_policy`.
    pub fn with_store(store: Arc<dyn Store<K, V>>) -> Self {
        Self {
            store,
            statistics: Arc::new(Statistics::standard()),
            evicted: Arc::new(EvictionLog::new()),
        }
    }
}

impl<K, V> Default for MemoryCache<K, V>
where
    K: Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Cache<K, V> for MemoryCache<K, V>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn store(&self) -> Arc<dyn Store<K, V>> {
        Arc::clone(&self.store)
    }

    fn statistics(&self) -> Arc<Statistics> {
        Arc::clone(&self.statistics)
    }

    fn evicted(&self) -> Arc<dyn Evicted<K, V>> {
        Arc::clone(&self.evicted)
    }

    fn clear(&self) -> Result<()> {
        self.store.entries()?.clear();
        self.evicted.clear();
        Ok(())
    }

    fn size(&self) -> Result<usize> {
        Ok(self.store.keys()?.count() + self.store.entries()?.count())
    }
}
