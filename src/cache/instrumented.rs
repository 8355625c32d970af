//! Statistics-recording cache facade.

use std::sync::Arc;

use crate::cache::InstrumentedEvicted;
use crate::error::Result;
use crate::stats::Statistics;
use crate::store::{instrumented::validate, InstrumentedStore};
use crate::traits::{Cache, Evicted, Store};

/// Wraps a cache so every store operation and eviction is counted in the
/// wrapped cache's statistics registry.
///
/// Construction validates the registry once, so the decorated store and
/// evicted log can bump counters without a fallible lookup per operation.
/// `clear` additionally resets all counters.
pub struct InstrumentedCache<K, V> {
    origin: Arc<dyn Cache<K, V>>,
    statistics: Arc<Statistics>,
}

impl<K, V> InstrumentedCache<K, V> {
    /// Wrap `origin`, verifying its registry carries the standard counters.
    pub fn new(origin: Arc<dyn Cache<K, V>>) -> Result<Self> {
        let statistics = origin.statistics();
        validate(&statistics)?;
        Ok(Self { origin, statistics })
    }
}

impl<K, V> Cache<K, V> for InstrumentedCache<K, V>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn store(&self) -> Arc<dyn Store<K, V>> {
        Arc::new(InstrumentedStore::unchecked(
            self.origin.store(),
            Arc::clone(&self.statistics),
        ))
    }

    fn statistics(&self) -> Arc<Statistics> {
        Arc::clone(&self.statistics)
    }

    fn evicted(&self) -> Arc<dyn Evicted<K, V>> {
        Arc::new(InstrumentedEvicted::unchecked(
            self.origin.evicted(),
            Arc::clone(&self.statistics),
        ))
    }

    fn clear(&self) -> Result<()> {
        self.origin.clear()?;
        self.statistics.reset();
        Ok(())
    }

    fn size(&self) -> Result<usize> {
        self.origin.size()
    }
}
