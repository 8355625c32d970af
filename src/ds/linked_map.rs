//! Insertion-ordered map and its lock-guarded concurrent wrapper.
//!
//! ## Architecture
//!
//! ```text
//!   index (FxHashMap<K, usize>)        slots (Vec<Option<Slot>>)
//!   ┌─────────┬───────┐               ┌───┬──────────────────────────────┐
//!   │   Key   │ slot  │               │ 0 │ { k, v, prev: None, next: 2 }│
//!   ├─────────┼───────┤               │ 1 │ None (free)                  │
//!   │  k_a    │  0    │               │ 2 │ { k, v, prev: 0, next: None }│
//!   │  k_b    │  2    │               └───┴──────────────────────────────┘
//!   └─────────┴───────┘
//!                        head ─► [0] ◄──► [2] ◄── tail
//! ```
//!
//! Slots are linked by index, never by pointer (the slot-arena style used
//! throughout this crate's lineage). Iteration walks head to tail, which is
//! the order keys were *first* inserted: updates replace a slot's value in
//! place and never relink, removals unlink and free the slot.
//!
//! ## Concurrency
//!
//! `LinkedMap` is single-threaded. `ConcurrentLinkedMap` serializes every
//! operation through one `parking_lot::Mutex` held for the duration of the
//! call; snapshot methods copy under that lock, so a returned snapshot is
//! never invalidated by later mutation. `remove_matching` scans and removes
//! under a single lock acquisition, which is the atomicity the entries-view
//! `invalidate` operation relies on.

use std::hash::Hash;
use std::mem;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

#[derive(Debug)]
struct Slot<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Single-threaded associative structure preserving insertion order across
/// put/remove/iterate.
#[derive(Debug)]
pub struct LinkedMap<K, V> {
    index: FxHashMap<K, usize>,
    slots: Vec<Option<Slot<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K, V> Default for LinkedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> LinkedMap<K, V> {
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }

    /// Front-to-back iteration in first-insertion order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            map: self,
            cursor: self.head,
        }
    }

    fn slot(&self, idx: usize) -> &Slot<K, V> {
        self.slots[idx].as_ref().expect("linked slot must be live")
    }

    fn link_back(&mut self, idx: usize) {
        match self.tail {
            Some(tail) => {
                self.slots[tail].as_mut().expect("tail slot must be live").next = Some(idx);
                self.slots[idx].as_mut().expect("new slot must be live").prev = Some(tail);
            },
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let slot = self.slot(idx);
            (slot.prev, slot.next)
        };
        match prev {
            Some(p) => self.slots[p].as_mut().expect("prev slot must be live").next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].as_mut().expect("next slot must be live").prev = prev,
            None => self.tail = prev,
        }
    }
}

impl<K: Eq + Hash + Clone, V> LinkedMap<K, V> {
    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&idx| &self.slot(idx).value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Insert or update. An update replaces the value in place and does not
    /// move the key to the end; the previous value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&idx) = self.index.get(&key) {
            let slot = self.slots[idx].as_mut().expect("indexed slot must be live");
            return Some(mem::replace(&mut slot.value, value));
        }
        let slot = Slot {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(slot);
                idx
            },
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            },
        };
        self.link_back(idx);
        self.index.insert(key, idx);
        None
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.index.remove(key)?;
        self.unlink(idx);
        let slot = self.slots[idx].take().expect("removed slot must be live");
        self.free.push(idx);
        Some(slot.value)
    }
}

/// Iterator over a [`LinkedMap`] in insertion order.
pub struct Iter<'a, K, V> {
    map: &'a LinkedMap<K, V>,
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let slot = self.map.slot(idx);
        self.cursor = slot.next;
        Some((&slot.key, &slot.value))
    }
}

/// Thread-safe wrapper serializing every operation through one lock.
#[derive(Debug)]
pub struct ConcurrentLinkedMap<K, V> {
    inner: Mutex<LinkedMap<K, V>>,
}

impl<K, V> Default for ConcurrentLinkedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ConcurrentLinkedMap<K, V> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(LinkedMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl<K: Eq + Hash + Clone, V> ConcurrentLinkedMap<K, V> {
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().insert(key, value)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().contains_key(key)
    }

    /// Remove and return every pair the predicate matches, in insertion
    /// order, under a single lock acquisition.
    pub fn remove_matching(&self, mut predicate: impl FnMut(&K, &V) -> bool) -> Vec<(K, V)> {
        let mut guard = self.inner.lock();
        let matched: Vec<K> = guard
            .iter()
            .filter(|(key, value)| predicate(key, value))
            .map(|(key, _)| key.clone())
            .collect();
        matched
            .into_iter()
            .map(|key| {
                let value = guard.remove(&key).expect("matched key must be present");
                (key, value)
            })
            .collect()
    }
}

impl<K: Eq + Hash + Clone, V: Clone> ConcurrentLinkedMap<K, V> {
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    /// Keys in insertion order, copied under the lock.
    pub fn keys_snapshot(&self) -> Vec<K> {
        self.inner.lock().iter().map(|(key, _)| key.clone()).collect()
    }

    /// Values in insertion order, copied under the lock.
    pub fn values_snapshot(&self) -> Vec<V> {
        self.inner.lock().iter().map(|(_, value)| value.clone()).collect()
    }
}
