//! Invalidation predicates.
//!
//! The entries view removes whatever a predicate matches; the predicate
//! shipped here matches by metadata tag membership, using the same
//! one-level-flattening semantics as [`Metadata::has_any`].

use crate::entry::Entry;
use crate::metadata::{MetaValue, Metadata};
use crate::traits::Invalidate;

/// Matches entries whose metadata contains any of the given values.
///
/// # Example
///
/// ```
/// use tagcache::invalidate::MetadataInvalidate;
/// use tagcache::metadata::MetaValue;
///
/// let filter = MetadataInvalidate::new([MetaValue::from("orders")]);
/// ```
#[derive(Debug, Clone)]
pub struct MetadataInvalidate {
    values: Vec<MetaValue>,
}

impl MetadataInvalidate {
    pub fn new(values: impl IntoIterator<Item = MetaValue>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl<K, V> Invalidate<K, V> for MetadataInvalidate {
    fn matches(&self, entry: &Entry<K, V>) -> bool {
        entry
            .metadata()
            .map(|metadata: &Metadata| metadata.has_any(&self.values))
            .unwrap_or(false)
    }
}
