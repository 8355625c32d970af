//! Bound on the number of stored entries, enforced before each insertion.

use std::sync::Arc;

use crate::entry::Entry;
use crate::error::Result;
use crate::traits::{Store, StorePolicy};

/// Evicts the oldest entries while the store holds `max` or more.
///
/// The trigger is `>=` rather than `>` because the policy runs *before* the
/// insertion it makes room for: with `max = 1`, saving a second key first
/// evicts the one already present.
#[derive(Debug, Clone, Copy)]
pub struct MaxSizePolicy {
    max: usize,
}

impl MaxSizePolicy {
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Default for MaxSizePolicy {
    /// Effectively unbounded.
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

impl<K, V> StorePolicy<K, V> for MaxSizePolicy {
    fn apply(&self, store: &dyn Store<K, V>) -> Result<Vec<Arc<Entry<K, V>>>> {
        let mut evicted = Vec::new();
        while store.entries()?.count() >= self.max {
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
