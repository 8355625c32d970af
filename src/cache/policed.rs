//! Policy-enforcing cache facade.

use std::sync::Arc;

use crate::error::Result;
use crate::stats::Statistics;
use crate::store::PolicedStore;
use crate::traits::{Cache, Enforcer, Evicted, Store};

/// Wraps a cache with an enforcer; every operation on its `store()` first
/// triggers `enforcer.apply` against the wrapped cache.
///
/// With an [`ImmediateEnforcer`](crate::enforcer::ImmediateEnforcer) the
/// policies run synchronously inside each store call; with a
/// [`DelayedEnforcer`](crate::enforcer::DelayedEnforcer) the first store
/// call starts the background schedule. [`close`](Self::close) shuts the
/// enforcer down.
pub struct PolicedCache<K, V> {
    origin: Arc<dyn Cache<K, V>>,
    enforcer: Arc<dyn Enforcer<K, V>>,
}

impl<K, V> PolicedCache<K, V> {
    pub fn new(origin: Arc<dyn Cache<K, V>>, enforcer: Arc<dyn Enforcer<K, V>>) -> Self {
        Self { origin, enforcer }
    }

    /// Stop the enforcer's background work, if any.
    pub fn close(&self) -> Result<()> {
        self.enforcer.close()
    }
}

impl<K, V> Cache<K, V> for PolicedCache<K, V>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn store(&self) -> Arc<dyn Store<K, V>> {
        Arc::new(PolicedStore::new(
            Arc::clone(&self.origin),
            Arc::clone(&self.enforcer),
        ))
    }

    fn statistics(&self) -> Arc<Statistics> {
        self.origin.statistics()
    }

    fn evicted(&self) -> Arc<dyn Evicted<K, V>> {
        self.origin.evicted()
    }

    fn clear(&self) -> Result<()> {
        self.origin.clear()
    }

    fn size(&self) -> Result<usize> {
        self.origin.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::enforcer::ImmediateEnforcer;
    use crate::entry::Entry;
    use crate::key::Key;
    use crate::policy::MaxCountPolicy;

    fn policed(max: usize) -> PolicedCache<&'static str, i32> {
        let origin: Arc<dyn Cache<&str, i32>> = Arc::new(MemoryCache::new());
        let enforcer = ImmediateEnforcer::new(vec![Arc::new(MaxCountPolicy::new(max)) as _]);
        PolicedCache::new(origin, Arc::new(enforcer))
    }

    #[test]
    fn store_operations_trigger_enforcement() {
        let cache = policed(1);
        let store = cache.store();
        store.save(Key::new("a"), Entry::new(Key::new("a"), 1)).unwrap();
        store.save(Key::new("b"), Entry::new(Key::new("b"), 2)).unwrap();
        // Enforcement runs before each operation, so the save of "b" left
        // two entries behind; the next call trims back to the bound.
        assert!(store.retrieve(&Key::new("b")).unwrap().valid());
        assert!(!store.contains(&Key::new("a")).unwrap());
        assert_eq!(cache.evicted().count(), 1);
        assert_eq!(
            cache.evicted().entry(0).unwrap().key().unwrap().value(),
            &"a"
        );
    }

    #[test]
    fn close_is_forwarded() {
        let cache = policed(10);
        cache.close().unwrap();
    }
}
