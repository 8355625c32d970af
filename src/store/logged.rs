//! Diagnostic pass-through decorators.
//!
//! Pure forwarding with one `log::debug!` line per operation, tagged with a
//! caller-supplied source label. No algorithmic behavior lives here.

use std::fmt::Debug;
use std::sync::Arc;

use log::debug;

use crate::entry::Entry;
use crate::error::Result;
use crate::key::Key;
use crate::traits::{Entries, Invalidate, Keys, Store};

/// Store decorator logging every operation.
pub struct LoggedStore<K, V> {
    origin: Arc<dyn Store<K, V>>,
    from: String,
}

impl<K, V> LoggedStore<K, V> {
    pub fn new(origin: Arc<dyn Store<K, V>>, from: impl Into<String>) -> Self {
        Self {
            origin,
            from: from.into(),
        }
    }
}

impl<K, V> Store<K, V> for LoggedStore<K, V>
where
    K: Send + Sync + 'static,
    V: Debug + Send + Sync + 'static,
{
    fn retrieve(&self, key: &Key<K>) -> Result<Arc<Entry<K, V>>> {
        let entry = self.origin.retrieve(key)?;
        match entry.value() {
            Ok(value) => debug!(
                "[{}] retrieved key '{}' with value {:?}",
                self.from,
                key.hash(),
                value
            ),
            Err(_) => debug!("[{}] retrieved key '{}': not found", self.from, key.hash()),
        }
        Ok(entry)
    }

    fn save(&self, key: Key<K>, entry: Entry<K, V>) -> Result<Vec<Arc<Entry<K, V>>>> {
        debug!("[{}] saving key '{}'", self.from, key.hash());
        self.origin.save(key, entry)
    }

    fn delete(&self, key: &Key<K>) -> Result<Arc<Entry<K, V>>> {
        let removed = self.origin.delete(key)?;
        debug!(
            "[{}] deleted key '{}': removed={}",
            self.from,
            key.hash(),
            removed.valid()
        );
        Ok(removed)
    }

    fn contains(&self, key: &Key<K>) -> Result<bool> {
        let exists = self.origin.contains(key)?;
        debug!("[{}] contains key '{}': {}", self.from, key.hash(), exists);
        Ok(exists)
    }

    fn keys(&self) -> Result<Box<dyn Keys<K>>> {
        Ok(Box::new(LoggedKeys {
            origin: self.origin.keys()?,
            from: self.from.clone(),
        }))
    }

    fn entries(&self) -> Result<Box<dyn Entries<K, V>>> {
        Ok(Box::new(LoggedEntries {
            origin: self.origin.entries()?,
            from: self.from.clone(),
        }))
    }
}

/// Keys view decorator logging bulk operations.
pub struct LoggedKeys<K> {
    origin: Box<dyn Keys<K>>,
    from: String,
}

impl<K> Keys<K> for LoggedKeys<K>
where
    K: Send + Sync + 'static,
{
    fn count(&self) -> usize {
        self.origin.count()
    }

    fn clear(&self) {
        let prior = self.origin.count();
        self.origin.clear();
        debug!("[{}] cleared {} keys", self.from, prior);
    }

    fn snapshot(&self) -> Vec<Key<K>> {
        self.origin.snapshot()
    }
}

/// Entries view decorator logging bulk operations.
pub struct LoggedEntries<K, V> {
    origin: Box<dyn Entries<K, V>>,
    from: String,
}

impl<K, V> Entries<K, V> for LoggedEntries<K, V>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn count(&self) -> usize {
        self.origin.count()
    }

    fn invalidate(&self, filter: &dyn Invalidate<K, V>) -> Result<Vec<Arc<Entry<K, V>>>> {
        let removed = self.origin.invalidate(filter)?;
        debug!("[{}] invalidated {} entries", self.from, removed.len());
        Ok(removed)
    }

    fn clear(&self) {
        let prior = self.origin.count();
        self.origin.clear();
        debug!("[{}] cleared {} entries", self.from, prior);
    }

    fn snapshot(&self) -> Vec<Arc<Entry<K, V>>> {
        self.origin.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MapStore;

    #[test]
    fn logged_store_is_a_pure_pass_through() {
        let store: LoggedStore<&str, String> =
            LoggedStore::new(Arc::new(MapStore::new()), "tests");
        let key = Key::new("a");
        store
            .save(key.clone(), Entry::new(key.clone(), "alpha".into()))
            .unwrap();
        assert!(store.contains(&key).unwrap());
        assert_eq!(store.retrieve(&key).unwrap().value().unwrap(), "alpha");
        assert_eq!(store.entries().unwrap().count(), 1);
        assert!(store.delete(&key).unwrap().valid());
        assert!(!store.contains(&key).unwrap());
    }

    #[test]
    fn logged_views_forward_counts_and_clears() {
        let store: LoggedStore<&str, String> =
            LoggedStore::new(Arc::new(MapStore::new()), "tests");
        let key = Key::new("a");
        store
            .save(key.clone(), Entry::new(key.clone(), "alpha".into()))
            .unwrap();
        let keys = store.keys().unwrap();
        assert_eq!(keys.count(), 1);
        keys.clear();
        assert_eq!(store.entries().unwrap().count(), 0);
    }
}
