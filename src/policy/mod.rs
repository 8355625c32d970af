//! Eviction policies.
//!
//! A policy decides *what* to remove; an [`Enforcer`](crate::traits::Enforcer)
//! decides *when* to run it and logs whatever it removed. Policies therefore
//! delete from the store and return the removed entries without touching the
//! evicted log themselves.
//!
//! [`MaxSizePolicy`] is a [`StorePolicy`](crate::traits::StorePolicy) and can
//! run inline inside `MapStore::save`; the rest are cache-level
//! [`Policy`](crate::traits::Policy) implementations meant for an enforcer.

mod expired;
mod fifo;
mod max_count;
mod max_size;

pub use expired::{ExpiredPolicy, EXPIRATION};
pub use fifo::FifoPolicy;
pub use max_count::MaxCountPolicy;
pub use max_size::MaxSizePolicy;
