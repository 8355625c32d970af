//! Cache entries and the invalid sentinel.
//!
//! A well-formed entry is key + value + metadata with `valid() == true`.
//! The single invalid sentinel represents "not found" at the store boundary
//! without null/option machinery: its accessors fail with
//! [`CacheError::InvalidEntry`], which indicates a caller logic error
//! (`valid()` should have been checked first).

use crate::bytes::ToBytes;
use crate::error::{CacheError, Result};
use crate::key::Key;
use crate::metadata::Metadata;

/// Key + value + metadata + validity.
///
/// Created by the caller, owned by the store once saved, destroyed by
/// `delete` or by policy eviction.
///
/// # Example
///
/// ```
/// use tagcache::entry::Entry;
/// use tagcache::key::Key;
///
/// let entry = Entry::new(Key::new("user:1"), String::from("Ada"));
/// assert!(entry.valid());
/// assert_eq!(entry.value().unwrap(), "Ada");
///
/// let missing: Entry<&str, String> = Entry::invalid();
/// assert!(!missing.valid());
/// assert!(missing.value().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    inner: Option<Inner<K, V>>,
}

#[derive(Debug, Clone)]
struct Inner<K, V> {
    key: Key<K>,
    value: V,
    metadata: Metadata,
}

impl<K, V> Entry<K, V> {
    /// Valid entry with empty metadata.
    pub fn new(key: Key<K>, value: V) -> Self {
        Self::with_metadata(key, value, Metadata::new())
    }

    /// Valid entry with the given metadata.
    pub fn with_metadata(key: Key<K>, value: V, metadata: Metadata) -> Self {
        Self {
            inner: Some(Inner { key, value, metadata }),
        }
    }

    /// The sentinel representing "not found".
    pub fn invalid() -> Self {
        Self { inner: None }
    }

    /// The key, or `InvalidEntry` on the sentinel.
    pub fn key(&self) -> Result<&Key<K>> {
        self.inner
            .as_ref()
            .map(|inner| &inner.key)
            .ok_or(CacheError::InvalidEntry("key()"))
    }

    /// The value, or `InvalidEntry` on the sentinel.
    pub fn value(&self) -> Result<&V> {
        self.inner
            .as_ref()
            .map(|inner| &inner.value)
            .ok_or(CacheError::InvalidEntry("value()"))
    }

    /// The metadata, or `InvalidEntry` on the sentinel.
    pub fn metadata(&self) -> Result<&Metadata> {
        self.inner
            .as_ref()
            .map(|inner| &inner.metadata)
            .ok_or(CacheError::InvalidEntry("metadata()"))
    }

    /// Whether this is a live entry rather than the sentinel.
    pub fn valid(&self) -> bool {
        self.inner.is_some()
    }
}

impl<K, V: ToBytes> Entry<K, V> {
    /// Byte length of the value; 0 for the sentinel.
    pub fn size(&self) -> usize {
        self.inner
            .as_ref()
            .map(|inner| inner.value.to_bytes().len())
            .unwrap_or(0)
    }
}
