//! Cache keys with digest-derived identity.
//!
//! A `Key<T>` owns its value plus the digest computed from the value's byte
//! representation. Equality, ordering and the native hash code are defined
//! *solely* by the digest, so value types without structural equality can be
//! cached safely, at the cost of theoretical collisions.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::bytes::ToBytes;
use crate::hash::{Digest, Murmur3};

/// A value plus the digest that identifies it. Immutable after construction.
///
/// The default digest is [`Murmur3`] with seed 0; any [`Digest`]
/// implementation can be supplied instead without changing calling code:
///
/// ```
/// use tagcache::hash::Xxh;
/// use tagcache::key::Key;
///
/// let value = String::from("page:42");
/// let digest = Xxh::new(&value);
/// let key = Key::with_digest(value, &digest);
/// assert_eq!(key.hash().len(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct Key<T> {
    value: T,
    hex: String,
    code: u32,
}

impl<T: ToBytes> Key<T> {
    /// Key identified by the Murmur3 digest of `value`'s bytes.
    pub fn new(value: T) -> Self {
        let digest = Murmur3::new(&value);
        Self::with_digest(value, &digest)
    }

    /// Key identified by an explicit digest instance.
    pub fn with_digest(value: T, digest: &impl Digest) -> Self {
        Self {
            hex: digest.as_hex(),
            code: digest.as_int(),
            value,
        }
    }

    /// Byte length of the value.
    pub fn size(&self) -> usize {
        self.value.to_bytes().len()
    }
}

impl<T> Key<T> {
    /// The wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Hex string form of the digest.
    pub fn hash(&self) -> &str {
        &self.hex
    }

    /// 32-bit digest form, the native hash code.
    pub fn code(&self) -> u32 {
        self.code
    }
}

impl<T> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.hex == other.hex
    }
}

impl<T> Eq for Key<T> {}

impl<T> PartialOrd for Key<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Key<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hex.cmp(&other.hex)
    }
}

impl<T> Hash for Key<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.code);
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashMap;

    use super::*;
    use crate::hash::Xxh;

    #[test]
    fn equal_bytes_mean_equal_keys() {
        // String and &str have distinct types but identical bytes.
        let owned = Key::new(String::from("alpha"));
        let borrowed = Key::new("alpha");
        assert_eq!(owned.hash(), borrowed.hash());
        assert_eq!(owned.code(), borrowed.code());
    }

    #[test]
    fn distinct_bytes_mean_distinct_keys() {
        assert_ne!(Key::new("alpha"), Key::new("beta"));
    }

    #[test]
    fn hash_is_murmur3_hex_by_default() {
        let key = Key::new("The quick brown fox jumps over the lazy dog");
        assert_eq!(key.hash(), "6c1b07bc7bbc4be347939ac4a93c437a");
    }

    #[test]
    fn custom_digest_is_honored() {
        let digest = Xxh::new(&"alpha");
        let key = Key::with_digest("alpha", &digest);
        assert_eq!(key.hash(), Xxh::new(&"alpha").as_hex());
        assert_ne!(key, Key::new("alpha"));
    }

    #[test]
    fn usable_as_map_key() {
        let mut map = FxHashMap::default();
        map.insert(Key::new("alpha"), 1);
        map.insert(Key::new("alpha"), 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Key::new("alpha")), Some(&2));
    }

    #[test]
    fn size_is_byte_length() {
        assert_eq!(Key::new("alpha").size(), 5);
        assert_eq!(Key::new(7u64).size(), 8);
    }
}
