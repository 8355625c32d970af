//! Synchronous, on-the-spot enforcement.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::{Cache, Enforcer, Policy};

/// Runs every policy in order on each trigger, before the triggering
/// operation proceeds. A policy failure surfaces to the caller; policies
/// earlier in the list keep whatever they already evicted logged.
pub struct ImmediateEnforcer<K, V> {
    policies: Vec<Arc<dyn Policy<K, V>>>,
}

impl<K, V> ImmediateEnforcer<K, V> {
    pub fn new(policies: Vec<Arc<dyn Policy<K, V>>>) -> Self {
        Self { policies }
    }
}

impl<K, V> Enforcer<K, V> for ImmediateEnforcer<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
    fn apply(&self, cache: &Arc<dyn Cache<K, V>>) -> Result<()> {
        for policy in &self.policies {
            let log = cache.evicted();
            for entry in policy.apply(cache.as_ref())? {
                log.add(entry);
            }
        }
        Ok(())
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }
}
