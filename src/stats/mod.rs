//! Named atomic counters observing cache activity.
//!
//! The core store never touches these; all increments come from the
//! instrumenting decorators layered over stores, views and the evicted log.
//! Counters are relaxed atomics: they are observational and never carry
//! correctness.

use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;

use crate::error::{CacheError, Result};

/// Successful `retrieve`/`contains` observations.
pub const HITS: &str = "hits";
/// Failed `retrieve`/`contains` observations.
pub const MISSES: &str = "misses";
/// Total `retrieve`/`contains` observations.
pub const LOOKUPS: &str = "lookups";
/// Saves of keys not previously present.
pub const INSERTIONS: &str = "insertions";
/// Saves over an existing key.
pub const REPLACEMENTS: &str = "replacements";
/// Entries removed by explicit delete, bulk clear or metadata invalidation.
pub const INVALIDATIONS: &str = "invalidations";
/// Entries removed by policies (appended to the evicted log).
pub const EVICTIONS: &str = "evictions";

const STANDARD: [&str; 7] = [
    HITS,
    MISSES,
    LOOKUPS,
    INSERTIONS,
    REPLACEMENTS,
    INVALIDATIONS,
    EVICTIONS,
];

/// One named counter.
#[derive(Debug)]
pub struct Statistic {
    name: &'static str,
    count: AtomicU64,
}

impl Statistic {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            count: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn increment(&self, amount: u64) {
        self.count.fetch_add(amount, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }

    pub fn value(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

/// Fixed registry of counters, shared by every instrumenting decorator of
/// one cache.
///
/// The counter set is fixed at construction; looking up a name that was
/// never configured fails with [`CacheError::UnknownStatistic`] rather than
/// silently reporting zero.
#[derive(Debug)]
pub struct Statistics {
    items: FxHashMap<&'static str, Statistic>,
}

impl Default for Statistics {
    fn default() -> Self {
        Self::standard()
    }
}

impl Statistics {
    /// Registry holding the seven standard counters.
    pub fn standard() -> Self {
        Self::with_names(&STANDARD)
    }

    /// Registry holding an explicit counter set.
    pub fn with_names(names: &[&'static str]) -> Self {
        Self {
            items: names.iter().map(|&name| (name, Statistic::new(name))).collect(),
        }
    }

    /// The counter registered under `name`.
    pub fn statistic(&self, name: &str) -> Result<&Statistic> {
        self.items
            .get(name)
            .ok_or_else(|| CacheError::UnknownStatistic(name.to_owned()))
    }

    /// Current value of the counter registered under `name`.
    pub fn value(&self, name: &str) -> Result<u64> {
        self.statistic(name).map(Statistic::value)
    }

    /// Zero every counter. The registered set is untouched.
    pub fn reset(&self) {
        for statistic in self.items.values() {
            statistic.reset();
        }
    }

    /// All counters, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Statistic> {
        self.items.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let stats = Statistics::standard();
        for statistic in stats.iter() {
            assert_eq!(statistic.value(), 0, "{}", statistic.name());
        }
    }

    #[test]
    fn increment_accumulates() {
        let stats = Statistics::standard();
        stats.statistic(HITS).unwrap().increment(1);
        stats.statistic(HITS).unwrap().increment(2);
        assert_eq!(stats.value(HITS).unwrap(), 3);
        assert_eq!(stats.value(MISSES).unwrap(), 0);
    }

    #[test]
    fn reset_zeroes_but_keeps_the_set() {
        let stats = Statistics::standard();
        stats.statistic(EVICTIONS).unwrap().increment(5);
        stats.reset();
        assert_eq!(stats.value(EVICTIONS).unwrap(), 0);
        assert!(stats.statistic(EVICTIONS).is_ok());
    }

    #[test]
    fn unknown_name_fails() {
        let stats = Statistics::standard();
        assert_eq!(
            stats.statistic("latency").unwrap_err(),
            CacheError::UnknownStatistic("latency".into())
        );
    }

    #[test]
    fn counters_are_independent() {
        let stats = Statistics::with_names(&[HITS, MISSES]);
        stats.statistic(HITS).unwrap().increment(7);
        assert_eq!(stats.value(MISSES).unwrap(), 0);
        assert!(stats.statistic(LOOKUPS).is_err());
    }
}
