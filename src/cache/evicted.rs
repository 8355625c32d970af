//! The evicted-entries log.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::entry::Entry;
use crate::error::Result;
use crate::stats::{self, Statistics};
use crate::store::bump;
use crate::traits::Evicted;

/// Append-only, in-order record of policy evictions.
///
/// Grows until [`clear`](Evicted::clear); explicit `delete` calls never
/// land here, only entries removed by a policy.
pub struct EvictionLog<K, V> {
    items: Mutex<Vec<Arc<Entry<K, V>>>>,
}

impl<K, V> EvictionLog<K, V> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }
}

impl<K, V> Default for EvictionLog<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Evicted<K, V> for EvictionLog<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
    fn add(&self, entry: Arc<Entry<K, V>>) {
        self.items.lock().push(entry);
    }

    fn entry(&self, index: usize) -> Option<Arc<Entry<K, V>>> {
        self.items.lock().get(index).cloned()
    }

    fn count(&self) -> usize {
        self.items.lock().len()
    }

    fn clear(&self) {
        self.items.lock().clear();
    }

    fn snapshot(&self) -> Vec<Arc<Entry<K, V>>> {
        self.items.lock().clone()
    }
}

/// Evicted-log decorator counting one `evictions` per appended entry.
pub struct InstrumentedEvicted<K, V> {
    origin: Arc<dyn Evicted<K, V>>,
    statistics: Arc<Statistics>,
}

impl<K, V> InstrumentedEvicted<K, V> {
    /// Wrap `origin`, verifying `statistics` carries the standard counters.
    pub fn new(origin: Arc<dyn Evicted<K, V>>, statistics: Arc<Statistics>) -> Result<Self> {
        statistics.statistic(stats::EVICTIONS)?;
        Ok(Self::unchecked(origin, statistics))
    }

    pub(crate) fn unchecked(origin: Arc<dyn Evicted<K, V>>, statistics: Arc<Statistics>) -> Self {
        Self { origin, statistics }
    }
}

impl<K, V> Evicted<K, V> for InstrumentedEvicted<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
    fn add(&self, entry: Arc<Entry<K, V>>) {
        bump(&self.statistics, stats::EVICTIONS, 1);
        self.origin.add(entry);
    }

    fn entry(&self, index: usize) -> Option<Arc<Entry<K, V>>> {
        self.origin.entry(index)
    }

    fn count(&self) -> usize {
        self.origin.count()
    }

    fn clear(&self) {
        self.origin.clear();
    }

    fn snapshot(&self) -> Vec<Arc<Entry<K, V>>> {
        self.origin.snapshot()
    }
}
