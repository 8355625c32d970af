//! Store implementations and decorators.
//!
//! [`MapStore`] is the only store that owns data; the others wrap an inner
//! store and add one concern each: statistics ([`InstrumentedStore`]),
//! diagnostics ([`LoggedStore`]), policy enforcement ([`PolicedStore`]).

pub mod instrumented;
pub mod logged;
pub mod map;
pub mod policed;

pub(crate) use instrumented::bump;
pub use instrumented::{InstrumentedEntries, InstrumentedKeys, InstrumentedStore};
pub use logged::{LoggedEntries, LoggedKeys, LoggedStore};
pub use map::MapStore;
pub use policed::PolicedStore;
