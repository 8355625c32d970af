//! The base key→entry store.
//!
//! Backed by a [`ConcurrentLinkedMap`], so every operation is serialized
//! through one lock and iteration order is insertion order. Entries are
//! held as `Arc<Entry>`: retrieval shares, never copies, and callers may
//! keep an entry alive after it is evicted.
//!
//! An optional inline [`StorePolicy`] runs *before* each insertion; its
//! evictions, plus the replaced entry if the key already existed, are what
//! `save` returns.

use std::sync::Arc;

use crate::ds::ConcurrentLinkedMap;
use crate::entry::Entry;
use crate::error::Result;
use crate::key::Key;
use crate::traits::{Entries, Invalidate, Keys, Store, StorePolicy};

type Records<K, V> = Arc<ConcurrentLinkedMap<Key<K>, Arc<Entry<K, V>>>>;

/// Map-backed store with an optional inline eviction policy.
///
/// # Example
///
/// ```
/// use tagcache::entry::Entry;
/// use tagcache::key::Key;
/// use tagcache::store::MapStore;
/// use tagcache::traits::Store;
///
/// let store: MapStore<&str, String> = MapStore::new();
/// let key = Key::new("user:1");
/// store.save(key.clone(), Entry::new(key.clone(), "Ada".into())).unwrap();
/// assert!(store.retrieve(&key).unwrap().valid());
/// ```
pub struct MapStore<K, V> {
    records: Records<K, V>,
    policy: Option<Arc<dyn StorePolicy<K, V>>>,
}

impl<K, V> MapStore<K, V> {
    /// Store with no inline policy.
    pub fn new() -> Self {
        Self {
            records: Arc::new(ConcurrentLinkedMap::new()),
            policy: None,
        }
    }

    /// Store whose `save` runs `policy` before every insertion.
    pub fn with_policy(policy: Arc<dyn StorePolicy<K, V>>) -> Self {
        Self {
            records: Arc::new(ConcurrentLinkedMap::new()),
            policy: Some(policy),
        }
    }
}

impl<K, V> Default for MapStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Store<K, V> for MapStore<K, V>
where
    K: Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn retrieve(&self, key: &Key<K>) -> Result<Arc<Entry<K, V>>> {
        Ok(self
            .records
            .get(key)
            .unwrap_or_else(|| Arc::new(Entry::invalid())))
    }

    fn save(&self, key: Key<K>, entry: Entry<K, V>) -> Result<Vec<Arc<Entry<K, V>>>> {
        let mut evicted = match &self.policy {
            Some(policy) => policy.apply(self)?,
            None => Vec::new(),
        };
        if let Some(replaced) = self.records.insert(key, Arc::new(entry)) {
            evicted.push(replaced);
        }
        Ok(evicted)
    }

    fn delete(&self, key: &Key<K>) -> Result<Arc<Entry<K, V>>> {
        Ok(self
            .records
            .remove(key)
            .unwrap_or_else(|| Arc::new(Entry::invalid())))
    }

    fn contains(&self, key: &Key<K>) -> Result<bool> {
        Ok(self.records.contains_key(key))
    }

    fn keys(&self) -> Result<Box<dyn Keys<K>>> {
        Ok(Box::new(MapKeys {
            records: Arc::clone(&self.records),
        }))
    }

    fn entries(&self) -> Result<Box<dyn Entries<K, V>>> {
        Ok(Box::new(MapEntries {
            records: Arc::clone(&self.records),
        }))
    }
}

/// Live keys view over a [`MapStore`]'s backing map.
struct MapKeys<K, V> {
    records: Records<K, V>,
}

impl<K, V> Keys<K> for MapKeys<K, V>
where
    K: Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn count(&self) -> usize {
        self.records.len()
    }

    fn clear(&self) {
        self.records.clear();
    }

    fn snapshot(&self) -> Vec<Key<K>> {
        self.records.keys_snapshot()
    }
}

/// Live entries view over a [`MapStore`]'s backing map.
struct MapEntries<K, V> {
    records: Records<K, V>,
}

impl<K, V> Entries<K, V> for MapEntries<K, V>
where
    K: Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn count(&self) -> usize {
        self.records.len()
    }

    fn invalidate(&self, filter: &dyn Invalidate<K, V>) -> Result<Vec<Arc<Entry<K, V>>>> {
        Ok(self
            .records
            .remove_matching(|_, entry| filter.matches(entry))
            .into_iter()
            .map(|(_, entry)| entry)
            .collect())
    }

    fn clear(&self) {
        self.records.clear();
    }

    fn snapshot(&self) -> Vec<Arc<Entry<K, V>>> {
        self.records.values_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{MetaValue, Metadata};
    use crate::policy::MaxSizePolicy;

    fn entry(key: &Key<&'static str>, value: &str) -> Entry<&'static str, String> {
        Entry::new(key.clone(), value.to_owned())
    }

    #[test]
    fn save_then_retrieve_round_trips() {
        let store: MapStore<&str, String> = MapStore::new();
        let key = Key::new("a");
        store.save(key.clone(), entry(&key, "alpha")).unwrap();
        let found = store.retrieve(&key).unwrap();
        assert!(found.valid());
        assert_eq!(found.value().unwrap(), "alpha");
    }

    #[test]
    fn missing_key_yields_sentinel_not_error() {
        let store: MapStore<&str, String> = MapStore::new();
        let key = Key::new("ghost");
        assert!(!store.retrieve(&key).unwrap().valid());
        assert!(!store.delete(&key).unwrap().valid());
        assert!(!store.contains(&key).unwrap());
    }

    #[test]
    fn save_returns_replaced_entry() {
        let store: MapStore<&str, String> = MapStore::new();
        let key = Key::new("a");
        assert!(store.save(key.clone(), entry(&key, "one")).unwrap().is_empty());
        let evicted = store.save(key.clone(), entry(&key, "two")).unwrap();
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].value().unwrap(), "one");
        assert_eq!(store.retrieve(&key).unwrap().value().unwrap(), "two");
    }

    #[test]
    fn delete_returns_prior_entry() {
        let store: MapStore<&str, String> = MapStore::new();
        let key = Key::new("a");
        store.save(key.clone(), entry(&key, "alpha")).unwrap();
        let removed = store.delete(&key).unwrap();
        assert_eq!(removed.value().unwrap(), "alpha");
        assert!(!store.contains(&key).unwrap());
    }

    #[test]
    fn views_preserve_insertion_order() {
        let store: MapStore<&str, String> = MapStore::new();
        for name in ["a", "b", "c"] {
            let key = Key::new(name);
            store.save(key.clone(), entry(&key, name)).unwrap();
        }
        let order: Vec<_> = store
            .keys()
            .unwrap()
            .snapshot()
            .iter()
            .map(|k| *k.value())
            .collect();
        assert_eq!(order, ["a", "b", "c"]);
        assert_eq!(store.entries().unwrap().count(), 3);
    }

    #[test]
    fn inline_policy_runs_before_insertion() {
        let store: MapStore<&str, String> = MapStore::with_policy(Arc::new(MaxSizePolicy::new(1)));
        let first = Key::new("a");
        let second = Key::new("b");
        store.save(first.clone(), entry(&first, "alpha")).unwrap();
        let evicted = store.save(second.clone(), entry(&second, "beta")).unwrap();
        assert_eq!(evicted.len(), 1);
        assert_eq!(*evicted[0].key().unwrap(), first);
        assert!(!store.contains(&first).unwrap());
        assert!(store.contains(&second).unwrap());
    }

    #[test]
    fn invalidate_removes_matching_entries_atomically() {
        let store: MapStore<&str, String> = MapStore::new();
        let tagged = Key::new("tagged");
        let plain = Key::new("plain");
        store
            .save(
                tagged.clone(),
                Entry::with_metadata(
                    tagged.clone(),
                    "v".into(),
                    Metadata::new().with("tables", MetaValue::list(["i", "j", "k"])),
                ),
            )
            .unwrap();
        store.save(plain.clone(), entry(&plain, "v")).unwrap();
        let filter = crate::invalidate::MetadataInvalidate::new([MetaValue::from("j")]);
        let removed = store.entries().unwrap().invalidate(&filter).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(*removed[0].key().unwrap(), tagged);
        assert!(store.contains(&plain).unwrap());
        assert!(!store.contains(&tagged).unwrap());
    }
}
