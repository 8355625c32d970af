//! Error types for the tagcache library.
//!
//! ## Key Components
//!
//! - [`CacheError`]: the single error taxonomy for the crate. Absence of a
//!   key is never an error anywhere in the store surface; it is represented
//!   by the invalid-entry sentinel (see [`crate::entry::Entry::invalid`]).
//!
//! ## Example Usage
//!
//! ```
//! use tagcache::entry::Entry;
//! use tagcache::error::CacheError;
//!
//! let sentinel: Entry<String, String> = Entry::invalid();
//! assert!(matches!(sentinel.value(), Err(CacheError::InvalidEntry(_))));
//! ```

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by cache operations.
///
/// `InvalidEntry` and `TypeMismatch` indicate caller logic errors and are
/// always propagated, never recovered internally. `Policy` surfaces
/// synchronously under immediate enforcement and is logged under delayed
/// enforcement. `ShutdownTimeout` is fatal to the caller closing a delayed
/// enforcer: the background worker may still be running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// Accessed `key()`, `value()` or `metadata()` on the invalid sentinel.
    #[error("{0}: invalid entry")]
    InvalidEntry(&'static str),

    /// A metadata value was requested under an incompatible type.
    #[error("metadata '{name}': expected {expected}, found {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A policy failed while scanning or evicting.
    #[error("policy failed: {0}")]
    Policy(String),

    /// The delayed enforcer's worker did not stop within the grace period.
    #[error("enforcer worker did not stop within {0:?}")]
    ShutdownTimeout(Duration),

    /// Lookup of a statistic name that was never configured.
    #[error("unknown statistic '{0}'")]
    UnknownStatistic(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CacheError>;
