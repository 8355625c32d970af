//! Backing data structures.

pub mod linked_map;

pub use linked_map::{ConcurrentLinkedMap, LinkedMap};
