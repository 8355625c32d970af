//! One-stop import for typical embedding use.

pub use crate::bytes::ToBytes;
pub use crate::cache::{EvictionLog, InstrumentedCache, MemoryCache, PolicedCache};
pub use crate::enforcer::{DelayedEnforcer, ImmediateEnforcer};
pub use crate::entry::Entry;
pub use crate::error::{CacheError, Result};
pub use crate::hash::{Digest, Murmur3, Xxh};
pub use crate::invalidate::MetadataInvalidate;
pub use crate::key::Key;
pub use crate::metadata::{MetaValue, Metadata};
pub use crate::policy::{ExpiredPolicy, FifoPolicy, MaxCountPolicy, MaxSizePolicy, EXPIRATION};
pub use crate::stats::Statistics;
pub use crate::store::{InstrumentedStore, LoggedStore, MapStore, PolicedStore};
pub use crate::traits::{
    Cache, Enforcer, Entries, Evicted, Invalidate, Keys, Policy, Store, StorePolicy,
};
