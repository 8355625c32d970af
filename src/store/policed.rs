//! Store decorator that triggers policy enforcement before every operation.
//!
//! Under an immediate enforcer the configured policies run synchronously
//! before the operation returns; under a delayed enforcer the call merely
//! ensures the background worker has been started, and eviction is
//! eventually consistent.

use std::sync::Arc;

use crate::entry::Entry;
use crate::error::Result;
use crate::key::Key;
use crate::traits::{Cache, Enforcer, Entries, Keys, Store};

/// Enforcement-triggering store decorator. Obtained from
/// [`PolicedCache::store`](crate::cache::PolicedCache).
pub struct PolicedStore<K, V> {
    cache: Arc<dyn Cache<K, V>>,
    enforcer: Arc<dyn Enforcer<K, V>>,
}

impl<K, V> PolicedStore<K, V> {
    pub fn new(cache: Arc<dyn Cache<K, V>>, enforcer: Arc<dyn Enforcer<K, V>>) -> Self {
        Self { cache, enforcer }
    }

    fn enforce(&self) -> Result<()> {
        self.enforcer.apply(&self.cache)
    }
}

impl<K, V> Store<K, V> for PolicedStore<K, V>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn retrieve(&self, key: &Key<K>) -> Result<Arc<Entry<K, V>>> {
        self.enforce()?;
        self.cache.store().retrieve(key)
    }

    fn save(&self, key: Key<K>, entry: Entry<K, V>) -> Result<Vec<Arc<Entry<K, V>>>> {
        self.enforce()?;
        self.cache.store().save(key, entry)
    }

    fn delete(&self, key: &Key<K>) -> Result<Arc<Entry<K, V>>> {
        self.enforce()?;
        self.cache.store().delete(key)
    }

    fn contains(&self, key: &Key<K>) -> Result<bool> {
        self.enforce()?;
        self.cache.store().contains(key)
    }

    fn keys(&self) -> Result<Box<dyn Keys<K>>> {
        self.enforce()?;
        self.cache.store().keys()
    }

    fn entries(&self) -> Result<Box<dyn Entries<K, V>>> {
        self.enforce()?;
        self.cache.store().entries()
    }
}
