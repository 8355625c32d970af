//! Fixed-delay background enforcement.
//!
//! The first `apply` wins a compare-and-set on the `started` flag and spawns
//! the single worker thread; every later `apply` is a no-op. The worker runs
//! all policies immediately, then once per delay until `close` signals it to
//! stop. A tick that fails is logged and the schedule continues; delayed
//! enforcement is eventually consistent by design, so a transient failure
//! must not kill the worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::error::{CacheError, Result};
use crate::traits::{Cache, Enforcer, Policy};

const DEFAULT_GRACE: Duration = Duration::from_secs(5);

#[derive(Default)]
struct WorkerState {
    stop: bool,
    finished: bool,
}

struct Shared {
    state: Mutex<WorkerState>,
    signal: Condvar,
}

/// Runs its policies on a background schedule with a fixed delay between
/// ticks.
///
/// `close` asks the worker to stop and waits up to a grace period for it to
/// finish the tick in flight, failing with [`CacheError::ShutdownTimeout`]
/// if it does not. Closing an enforcer that never started, or closing
/// twice, is `Ok`.
pub struct DelayedEnforcer<K, V> {
    policies: Arc<Vec<Arc<dyn Policy<K, V>>>>,
    delay: Duration,
    grace: Duration,
    started: AtomicBool,
    shared: Arc<Shared>,
}

impl<K, V> DelayedEnforcer<K, V> {
    pub fn new(policies: Vec<Arc<dyn Policy<K, V>>>, delay: Duration) -> Self {
        Self::with_grace(policies, delay, DEFAULT_GRACE)
    }

    /// Like [`new`](Self::new) with an explicit shutdown grace period.
    pub fn with_grace(
        policies: Vec<Arc<dyn Policy<K, V>>>,
        delay: Duration,
        grace: Duration,
    ) -> Self {
        Self {
            policies: Arc::new(policies),
            delay,
            grace,
            started: AtomicBool::new(false),
            shared: Arc::new(Shared {
                state: Mutex::new(WorkerState::default()),
                signal: Condvar::new(),
            }),
        }
    }
}

fn tick<K, V>(policies: &[Arc<dyn Policy<K, V>>], cache: &Arc<dyn Cache<K, V>>) {
    for policy in policies {
        match policy.apply(cache.as_ref()) {
            Ok(evicted) => {
                let log = cache.evicted();
                for entry in evicted {
                    log.add(entry);
                }
            }
            Err(err) => log::error!("background enforcement tick failed: {err}"),
        }
    }
}

impl<K, V> Enforcer<K, V> for DelayedEnforcer<K, V>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn apply(&self, cache: &Arc<dyn Cache<K, V>>) -> Result<()> {
        if self
            .started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(());
        }
        let cache = Arc::clone(cache);
        let policies = Arc::clone(&self.policies);
        let shared = Arc::clone(&self.shared);
        let delay = self.delay;
        thread::spawn(move || {
            loop {
                tick(&policies, &cache);
                let mut state = shared.state.lock();
                if state.stop {
                    break;
                }
                shared.signal.wait_for(&mut state, delay);
                if state.stop {
                    break;
                }
            }
            let mut state = shared.state.lock();
            state.finished = true;
            shared.signal.notify_all();
        });
        Ok(())
    }

    fn close(&self) -> Result<()> {
        if !self.started.load(Ordering::SeqCst) {
            return Ok(());
        }
        let mut state = self.shared.state.lock();
        state.stop = true;
        self.shared.signal.notify_all();
        let deadline = Instant::now() + self.grace;
        while !state.finished {
            if self.shared.signal.wait_until(&mut state, deadline).timed_out() {
                if state.finished {
                    break;
                }
                return Err(CacheError::ShutdownTimeout(self.grace));
            }
        }
        Ok(())
    }
}
