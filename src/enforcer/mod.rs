//! Policy enforcement strategies.
//!
//! An enforcer runs a list of [`Policy`](crate::traits::Policy)
//! implementations against a cache and appends whatever they evict to the
//! cache's evicted log. [`ImmediateEnforcer`] does this synchronously on
//! every trigger; [`DelayedEnforcer`] does it on a fixed-delay background
//! schedule started by the first trigger.

mod delayed;
mod immediate;

pub use delayed::DelayedEnforcer;
pub use immediate::ImmediateEnforcer;
