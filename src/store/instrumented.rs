//! Statistics decorators for stores and their views.
//!
//! Counting rules:
//! - `retrieve`/`contains`: `+1 lookups`, then `+1 hits` on a valid/present
//!   result, else `+1 misses`.
//! - `save`: `+1 insertions` when the key was absent, else `+1 replacements`.
//! - `delete`: `+1 invalidations` when a live entry was removed.
//! - view `clear`: `+prior-count invalidations`, captured before clearing.
//! - view `invalidate`: `+1 invalidations` per removed entry.
//!
//! Constructors validate that the registry carries the counters they bump,
//! so the increments themselves cannot miss.

use std::sync::Arc;

use crate::entry::Entry;
use crate::error::Result;
use crate::key::Key;
use crate::stats::{self, Statistics};
use crate::traits::{Entries, Invalidate, Keys, Store};

/// Increment a counter validated to exist at construction time.
pub(crate) fn bump(statistics: &Statistics, name: &str, amount: u64) {
    debug_assert!(statistics.statistic(name).is_ok(), "unvalidated counter {name}");
    if let Ok(statistic) = statistics.statistic(name) {
        statistic.increment(amount);
    }
}

pub(crate) fn validate(statistics: &Statistics) -> Result<()> {
    for name in [
        stats::HITS,
        stats::MISSES,
        stats::LOOKUPS,
        stats::INSERTIONS,
        stats::REPLACEMENTS,
        stats::INVALIDATIONS,
        stats::EVICTIONS,
    ] {
        statistics.statistic(name)?;
    }
    Ok(())
}

/// Store decorator recording lookup, save and delete statistics.
pub struct InstrumentedStore<K, V> {
    origin: Arc<dyn Store<K, V>>,
    statistics: Arc<Statistics>,
}

impl<K, V> InstrumentedStore<K, V> {
    /// Wrap `origin`, verifying `statistics` holds the standard counters.
    pub fn new(origin: Arc<dyn Store<K, V>>, statistics: Arc<Statistics>) -> Result<Self> {
        validate(&statistics)?;
        Ok(Self::unchecked(origin, statistics))
    }

    pub(crate) fn unchecked(origin: Arc<dyn Store<K, V>>, statistics: Arc<Statistics>) -> Self {
        Self { origin, statistics }
    }
}

impl<K, V> Store<K, V> for InstrumentedStore<K, V>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn retrieve(&self, key: &Key<K>) -> Result<Arc<Entry<K, V>>> {
        bump(&self.statistics, stats::LOOKUPS, 1);
        let entry = self.origin.retrieve(key)?;
        if entry.valid() {
            bump(&self.statistics, stats::HITS, 1);
        } else {
            bump(&self.statistics, stats::MISSES, 1);
        }
        Ok(entry)
    }

    fn save(&self, key: Key<K>, entry: Entry<K, V>) -> Result<Vec<Arc<Entry<K, V>>>> {
        let prior = self.origin.contains(&key)?;
        let evicted = self.origin.save(key, entry)?;
        if prior {
            bump(&self.statistics, stats::REPLACEMENTS, 1);
        } else {
            bump(&self.statistics, stats::INSERTIONS, 1);
        }
        Ok(evicted)
    }

    fn delete(&self, key: &Key<K>) -> Result<Arc<Entry<K, V>>> {
        let removed = self.origin.delete(key)?;
        if removed.valid() {
            bump(&self.statistics, stats::INVALIDATIONS, 1);
        }
        Ok(removed)
    }

    fn contains(&self, key: &Key<K>) -> Result<bool> {
        let exists = self.origin.contains(key)?;
        bump(&self.statistics, stats::LOOKUPS, 1);
        if exists {
            bump(&self.statistics, stats::HITS, 1);
        } else {
            bump(&self.statistics, stats::MISSES, 1);
        }
        Ok(exists)
    }

    fn keys(&self) -> Result<Box<dyn Keys<K>>> {
        Ok(Box::new(InstrumentedKeys {
            origin: self.origin.keys()?,
            statistics: Arc::clone(&self.statistics),
        }))
    }

    fn entries(&self) -> Result<Box<dyn Entries<K, V>>> {
        Ok(Box::new(InstrumentedEntries {
            origin: self.origin.entries()?,
            statistics: Arc::clone(&self.statistics),
        }))
    }
}

/// Keys view decorator counting bulk clears as invalidations.
pub struct InstrumentedKeys<K> {
    origin: Box<dyn Keys<K>>,
    statistics: Arc<Statistics>,
}

impl<K> Keys<K> for InstrumentedKeys<K>
where
    K: Send + Sync + 'static,
{
    fn count(&self) -> usize {
        self.origin.count()
    }

    fn clear(&self) {
        let prior = self.origin.count();
        self.origin.clear();
        bump(&self.statistics, stats::INVALIDATIONS, prior as u64);
    }

    fn snapshot(&self) -> Vec<Key<K>> {
        self.origin.snapshot()
    }
}

/// Entries view decorator counting invalidations.
pub struct InstrumentedEntries<K, V> {
    origin: Box<dyn Entries<K, V>>,
    statistics: Arc<Statistics>,
}

impl<K, V> Entries<K, V> for InstrumentedEntries<K, V>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn count(&self) -> usize {
        self.origin.count()
    }

    fn invalidate(&self, filter: &dyn Invalidate<K, V>) -> Result<Vec<Arc<Entry<K, V>>>> {
        let removed = self.origin.invalidate(filter)?;
        bump(&self.statistics, stats::INVALIDATIONS, removed.len() as u64);
        Ok(removed)
    }

    fn clear(&self) {
        let prior = self.origin.count();
        self.origin.clear();
        bump(&self.statistics, stats::INVALIDATIONS, prior as u64);
    }

    fn snapshot(&self) -> Vec<Arc<Entry<K, V>>> {
        self.origin.snapshot()
    }
}
