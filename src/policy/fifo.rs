//! First-in-first-out eviction keyed off the cache size figure.

use std::sync::Arc;

use crate::entry::Entry;
use crate::error::Result;
use crate::traits::{Cache, Policy};

/// Evicts the oldest entries while `cache.size()` exceeds `max`.
///
/// `size()` is the keys-plus-entries figure, i.e. twice the live entry
/// count; thresholds passed here must be calibrated against that scale
/// (`max = 2` bounds the cache to one entry).
#[derive(Debug, Clone, Copy)]
pub struct FifoPolicy {
    max: usize,
}

impl FifoPolicy {
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Default for FifoPolicy {
    /// Effectively unbounded.
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

impl<K, V> Policy<K, V> for FifoPolicy {
    fn apply(&self, cache: &dyn Cache<K, V>) -> Result<Vec<Arc<Entry<K, V>>>> {
        let store = cache.store();
        let mut evicted = Vec::new();
        while cache.size()? > self.max {
            let keys = store.keys()?.snapshot();
            let Some(oldest) = keys.first() else {
                break;
            };
            let removed = store.delete(oldest)?;
            if removed.valid() {
                evicted.push(removed);
            }
        }
        Ok(evicted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::key::Key;

    #[test]
    fn bounds_against_the_doubled_size_figure() {
        let cache: MemoryCache<&str, i32> = MemoryCache::new();
        let store = cache.store();
        for (name, value) in [("a", 1), ("b", 2), ("c", 3)] {
            store.save(Key::new(name), Entry::new(Key::new(name), value)).unwrap();
        }
        assert_eq!(cache.size().unwrap(), 6);
        // max = 2 keeps exactly one live entry.
        let policy = FifoPolicy::new(2);
        let evicted = Policy::apply(&policy, &cache).unwrap();
        assert_eq!(evicted.len(), 2);
        assert_eq!(evicted[0].key().unwrap().value(), &"a");
        assert_eq!(evicted[1].key().unwrap().value(), &"b");
        assert!(store.contains(&Key::new("c")).unwrap());
        assert_eq!(cache.size().unwrap(), 2);
    }

    #[test]
    fn within_bound_is_a_no_op() {
        let cache: MemoryCache<&str, i32> = MemoryCache::new();
        let store = cache.store();
        store.save(Key::new("a"), Entry::new(Key::new("a"), 1)).unwrap();
        let policy = FifoPolicy::new(4);
        assert!(Policy::apply(&policy, &cache).unwrap().is_empty());
    }
}
