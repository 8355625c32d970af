//! Cache facades.
//!
//! [`MemoryCache`] is the base: one map-backed store, one statistics
//! registry, one eviction log. [`InstrumentedCache`] and [`PolicedCache`]
//! are facade decorators layered over any cache; composing both yields an
//! instrumented, policy-enforced cache from the same parts.

mod evicted;
mod instrumented;
mod memory;
mod policed;

pub use evicted::{EvictionLog, InstrumentedEvicted};
pub use instrumented::InstrumentedCache;
pub use memory::MemoryCache;
pub use policed::PolicedCache;
