//! Bound on the number of cached entries, enforced after the fact.

use std::sync::Arc;

use crate::entry::Entry;
use crate::error::Result;
use crate::traits::{Cache, Policy};

/// Evicts the oldest entries while the cache holds more than `max`.
///
/// Unlike [`MaxSizePolicy`](crate::policy::MaxSizePolicy) this runs against
/// an already-populated cache, so the trigger is strictly greater-than: a
/// cache sitting exactly at its bound is left alone.
#[derive(Debug, Clone, Copy)]
pub struct MaxCountPolicy {
    max: usize,
}

impl MaxCountPolicy {
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Default for MaxCountPolicy {
    /// Effectively unbounded.
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

impl<K, V> Policy<K, V> for MaxCountPolicy {
    fn apply(&self, cache: &dyn Cache<K, V>) -> Result<Vec<Arc<Entry<K, V>>>> {
        let store = cache.store();
        let mut evicted = Vec::new();
        while store.entries()?.count() > self.max {
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
