//! tagcache: an embeddable in-memory cache with metadata-driven
//! invalidation, pluggable eviction policies and immediate or background
//! enforcement.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod bytes;
pub mod cache;
pub mod ds;
pub mod enforcer;
pub mod entry;
pub mod error;
pub mod hash;
pub mod invalidate;
pub mod key;
pub mod metadata;
pub mod policy;
pub mod prelude;
pub mod stats;
pub mod store;
pub mod traits;
