//! Immutable, copy-on-write metadata attached to cache entries.
//!
//! Metadata maps a name to an ordered sequence of tagged values. It drives
//! two operations: typed lookup (`values`, e.g. the `expiration` timestamp
//! read by the expired-eviction policy) and membership tests (`has_any`,
//! the primitive behind tag-based invalidation).
//!
//! `with` never mutates the receiver; it returns a new `Metadata` sharing
//! nothing mutable with the original. Instances therefore form a persistent
//! chain and are freely shareable across threads.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;

use crate::error::{CacheError, Result};

/// A tagged metadata value. The run-time tag replaces the original engine's
/// reflection-based cast: extraction under the wrong type fails with
/// [`CacheError::TypeMismatch`] instead of an unchecked cast.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Str(String),
    Int(i64),
    Time(DateTime<Utc>),
    List(Vec<MetaValue>),
}

impl MetaValue {
    /// Tag name used in mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            MetaValue::Str(_) => "string",
            MetaValue::Int(_) => "integer",
            MetaValue::Time(_) => "timestamp",
            MetaValue::List(_) => "list",
        }
    }

    /// Collection value from anything convertible.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<MetaValue>,
    {
        MetaValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Str(value.to_owned())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Str(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Int(value)
    }
}

impl From<i32> for MetaValue {
    fn from(value: i32) -> Self {
        MetaValue::Int(i64::from(value))
    }
}

impl From<DateTime<Utc>> for MetaValue {
    fn from(value: DateTime<Utc>) -> Self {
        MetaValue::Time(value)
    }
}

impl From<Vec<MetaValue>> for MetaValue {
    fn from(value: Vec<MetaValue>) -> Self {
        MetaValue::List(value)
    }
}

/// Typed extraction from a [`MetaValue`].
pub trait FromMeta: Sized {
    /// Tag name expected by this extraction, used in mismatch errors.
    const KIND: &'static str;

    /// The value, when the tag matches.
    fn from_meta(value: &MetaValue) -> Option<Self>;
}

impl FromMeta for String {
    const KIND: &'static str = "string";

    fn from_meta(value: &MetaValue) -> Option<Self> {
        match value {
            MetaValue::Str(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl FromMeta for i64 {
    const KIND: &'static str = "integer";

    fn from_meta(value: &MetaValue) -> Option<Self> {
        match value {
            MetaValue::Int(num) => Some(*num),
            _ => None,
        }
    }
}

impl FromMeta for DateTime<Utc> {
    const KIND: &'static str = "timestamp";

    fn from_meta(value: &MetaValue) -> Option<Self> {
        match value {
            MetaValue::Time(at) => Some(*at),
            _ => None,
        }
    }
}

/// Named, possibly multi-valued tags attached to an entry.
///
/// # Example
///
/// ```
/// use tagcache::metadata::{MetaValue, Metadata};
///
/// let meta = Metadata::new()
///     .with("tables", MetaValue::list(["users", "orders"]))
///     .with("region", "eu-west");
/// assert!(meta.has_any(&[MetaValue::from("orders")]));
/// assert!(!meta.has_any(&[MetaValue::from("payments")]));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    items: FxHashMap<String, Vec<MetaValue>>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// New metadata with `name` bound to `value`, replacing any prior
    /// binding. A `List` value becomes the sequence itself; a scalar becomes
    /// a one-element sequence. The receiver is untouched.
    #[must_use]
    pub fn with(&self, name: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        let mut items = self.items.clone();
        let sequence = match value.into() {
            MetaValue::List(values) => values,
            scalar => vec![scalar],
        };
        items.insert(name.into(), sequence);
        Self { items }
    }

    /// Names of all tags.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// True when no tags are present.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The ordered sequence stored under `name`, extracted as `T`.
    ///
    /// Absence yields an empty vec; a present value of the wrong type is a
    /// caller error and fails with [`CacheError::TypeMismatch`].
    pub fn values<T: FromMeta>(&self, name: &str) -> Result<Vec<T>> {
        let Some(sequence) = self.items.get(name) else {
            return Ok(Vec::new());
        };
        sequence
            .iter()
            .map(|value| {
                T::from_meta(value).ok_or_else(|| CacheError::TypeMismatch {
                    name: name.to_owned(),
                    expected: T::KIND,
                    found: value.kind(),
                })
            })
            .collect()
    }

    /// True when any stored value, or any element of a stored collection
    /// value, appears in `candidates`. Collections are flattened one level.
    pub fn has_any(&self, candidates: &[MetaValue]) -> bool {
        self.items.values().flatten().any(|value| {
            if candidates.contains(value) {
                return true;
            }
            match value {
                MetaValue::List(inner) => inner.iter().any(|item| candidates.contains(item)),
                _ => false,
            }
        })
    }
}
