//! Concurrent ordered set implementations.
//!
//! This module contains the lazily synchronized list, its node type, the
//! coarse-lock baseline and the types they share.

pub mod coarse;
pub mod lazy;
mod node;
mod serialization;
pub mod types;

// Re-export the main public API
pub use coarse::CoarseList;
pub use lazy::LazyList;
pub use types::{Key, OrderedSet};
