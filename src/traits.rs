//! # Cache Trait Hierarchy
//!
//! This module defines the seams the cache subsystem is composed over. Every
//! decorator (instrumenting, logging, policing) holds an inner
//! implementation of one of these traits and forwards calls with an added
//! side effect; no behavior lives in inheritance.
//!
//! ```text
//!                    ┌──────────────────────────────────────┐
//!                    │             Cache<K, V>              │
//!                    │                                      │
//!                    │  store() → Arc<dyn Store<K, V>>      │
//!                    │  statistics() → Arc<Statistics>      │
//!                    │  evicted() → Arc<dyn Evicted<K, V>>  │
//!                    │  clear() / size()                    │
//!                    └──────────────────┬───────────────────┘
//!                                       │
//!            ┌──────────────────────────┼──────────────────────────┐
//!            ▼                          ▼                          ▼
//! ┌─────────────────────┐   ┌──────────────────────┐   ┌─────────────────────┐
//! │    Store<K, V>      │   │    Evicted<K, V>     │   │    Enforcer<K, V>   │
//! │                     │   │                      │   │                     │
//! │  retrieve / save    │   │  add / entry / count │   │  apply(cache)       │
//! │  delete / contains  │   │  clear / snapshot    │   │  close()            │
//! │  keys / entries     │   └──────────────────────┘   └──────────┬──────────┘
//! └──────────┬──────────┘                                         │
//!            │                                          ┌─────────┴─────────┐
//!      ┌─────┴──────┐                                   ▼                   ▼
//!      ▼            ▼                          ┌────────────────┐  ┌────────────────┐
//! ┌─────────┐ ┌────────────┐                   │  Policy<K, V>  │  │ StorePolicy    │
//! │ Keys<K> │ │Entries<K,V>│                   │  apply(cache)  │  │ apply(store)   │
//! └─────────┘ └────────────┘                   └────────────────┘  └────────────────┘
//! ```
//!
//! ## Absence semantics
//!
//! `retrieve` and `delete` return the invalid-entry sentinel on a missing
//! key; `contains` returns `false`. None of them treat absence as an error.
//! Their `Result` wrapper exists for decorators: a policed store runs its
//! enforcer before every operation, and under immediate enforcement a policy
//! failure must surface to the caller that triggered it.
//!
//! ## View semantics
//!
//! `Keys` and `Entries` are live views over the store's backing map. Their
//! `snapshot` methods copy under the map's lock, so a returned snapshot is
//! never invalidated by later mutation. Iteration order is insertion order;
//! updates never move a key.

use std::sync::Arc;

use crate::entry::Entry;
use crate::error::Result;
use crate::key::Key;
use crate::stats::Statistics;

/// Live, order-preserving view over the store's keys.
pub trait Keys<K>: Send + Sync {
    /// Number of keys currently present.
    fn count(&self) -> usize;

    /// Remove every entry from the backing map.
    fn clear(&self);

    /// Copy of the keys in insertion order, taken under the map's lock.
    fn snapshot(&self) -> Vec<Key<K>>;
}

/// Live, order-preserving view over the store's entries.
pub trait Entries<K, V>: Send + Sync {
    /// Number of entries currently present.
    fn count(&self) -> usize;

    /// Atomically remove and return every entry the predicate matches.
    fn invalidate(&self, filter: &dyn Invalidate<K, V>) -> Result<Vec<Arc<Entry<K, V>>>>;

    /// Remove every entry from the backing map.
    fn clear(&self);

    /// Copy of the entries in insertion order, taken under the map's lock.
    fn snapshot(&self) -> Vec<Arc<Entry<K, V>>>;
}

/// Predicate deciding which entries an invalidation removes.
///
/// Implemented by [`MetadataInvalidate`](crate::invalidate::MetadataInvalidate)
/// and by any `Fn(&Entry<K, V>) -> bool` closure.
pub trait Invalidate<K, V>: Send + Sync {
    /// True when `entry` should be removed.
    fn matches(&self, entry: &Entry<K, V>) -> bool;
}

impl<K, V, F> Invalidate<K, V> for F
where
    F: Fn(&Entry<K, V>) -> bool + Send + Sync,
{
    fn matches(&self, entry: &Entry<K, V>) -> bool {
        self(entry)
    }
}

/// Key→entry storage with order-preserving views.
///
/// `save` runs the store's inline policy (if any) *before* inserting, and
/// returns whatever that policy evicted plus the replaced entry if the key
/// already existed.
pub trait Store<K, V>: Send + Sync {
    /// Entry for `key`, or the invalid sentinel when absent.
    fn retrieve(&self, key: &Key<K>) -> Result<Arc<Entry<K, V>>>;

    /// Insert or replace. Returns entries removed as a side effect.
    fn save(&self, key: Key<K>, entry: Entry<K, V>) -> Result<Vec<Arc<Entry<K, V>>>>;

    /// Remove and return the prior entry, or the invalid sentinel.
    fn delete(&self, key: &Key<K>) -> Result<Arc<Entry<K, V>>>;

    /// Whether an entry exists for `key`. Never mutates.
    fn contains(&self, key: &Key<K>) -> Result<bool>;

    /// View over the keys.
    fn keys(&self) -> Result<Box<dyn Keys<K>>>;

    /// View over the entries.
    fn entries(&self) -> Result<Box<dyn Entries<K, V>>>;
}

/// Append-only log of entries removed by policies.
///
/// Distinct from entries removed by an explicit caller `delete`; drained
/// only by `clear`.
pub trait Evicted<K, V>: Send + Sync {
    /// Append an evicted entry.
    fn add(&self, entry: Arc<Entry<K, V>>);

    /// Entry at `index` in eviction order, if present.
    fn entry(&self, index: usize) -> Option<Arc<Entry<K, V>>>;

    /// Number of logged evictions.
    fn count(&self) -> usize;

    /// Drop the whole log.
    fn clear(&self);

    /// Copy of the log in eviction order.
    fn snapshot(&self) -> Vec<Arc<Entry<K, V>>>;
}

/// The facade consumers interact with: one store, one statistics registry,
/// one evicted-entries log.
pub trait Cache<K, V>: Send + Sync {
    /// The store, possibly decorated.
    fn store(&self) -> Arc<dyn Store<K, V>>;

    /// Shared statistics registry.
    fn statistics(&self) -> Arc<Statistics>;

    /// Shared evicted-entries log, possibly decorated.
    fn evicted(&self) -> Arc<dyn Evicted<K, V>>;

    /// Drop all entries and the evicted log.
    fn clear(&self) -> Result<()>;

    /// Key count plus entry count over the same backing map.
    ///
    /// This is twice the live entry count, preserved as-is from the
    /// original engine; `FifoPolicy` thresholds are calibrated against it.
    fn size(&self) -> Result<usize>;
}

/// Eviction rule evaluated against a store, run inline by `MapStore::save`.
pub trait StorePolicy<K, V>: Send + Sync {
    /// Evict and return entries; called before each insertion.
    fn apply(&self, store: &dyn Store<K, V>) -> Result<Vec<Arc<Entry<K, V>>>>;
}

/// Eviction rule evaluated against a whole cache.
///
/// A policy is a pure function of cache state: it deletes from the store and
/// returns what it removed. Appending to the evicted log is the enforcer's
/// job, so entries are logged exactly once.
pub trait Policy<K, V>: Send + Sync {
    /// Evict and return entries.
    fn apply(&self, cache: &dyn Cache<K, V>) -> Result<Vec<Arc<Entry<K, V>>>>;
}

/// Decides *when* a policy list runs against a cache.
///
/// Immediate enforcement runs every policy synchronously per `apply`;
/// delayed enforcement starts one recurring background worker on the first
/// `apply` and makes later calls no-ops.
pub trait Enforcer<K, V>: Send + Sync {
    /// Trigger (or ensure) enforcement for `cache`.
    fn apply(&self, cache: &Arc<dyn Cache<K, V>>) -> Result<()>;

    /// Stop any background work. Safe to call when nothing was started.
    fn close(&self) -> Result<()>;
}
