//! Metadata-driven expiration.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::entry::Entry;
use crate::error::Result;
use crate::traits::{Cache, Policy};

/// Metadata name holding an entry's expiration timestamp.
pub const EXPIRATION: &str = "expiration";

/// Evicts every entry whose [`EXPIRATION`] metadata timestamp is strictly
/// before a reference instant.
///
/// Entries without the metadata never expire. Under a delayed enforcer the
/// reference instant should be `Utc::now()` taken per tick; a fixed instant
/// (`new`) makes the policy deterministic for testing.
#[derive(Debug, Clone, Copy)]
pub struct ExpiredPolicy {
    timestamp: DateTime<Utc>,
}

impl ExpiredPolicy {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp }
    }
}

impl Default for ExpiredPolicy {
    /// Expire everything already past at construction time.
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl<K, V> Policy<K, V> for ExpiredPolicy {
    fn apply(&self, cache: &dyn Cache<K, V>) -> Result<Vec<Arc<Entry<K, V>>>> {
        let store = cache.store();
        let mut evicted = Vec::new();
        for key in store.keys()?.snapshot() {
            let entry = store.retrieve(&key)?;
            if !entry.valid() {
                // Raced with a concurrent delete; nothing left to expire.
                continue;
            }
            let stamps: Vec<DateTime<Utc>> = entry.metadata()?.values(EXPIRATION)?;
            if stamps.first().is_some_and(|stamp| *stamp < self.timestamp) {
                let removed = store.delete(&key)?;
                if removed.valid() {
                    evicted.push(removed);
                }
            }
        }
        Ok(evicted)
    }
}
