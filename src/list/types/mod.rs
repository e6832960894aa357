//! Type definitions for the ordered sets.
//!
//! This module contains the key type and the operation contract shared by the
//! lazy list and the coarse-lock baseline.

pub mod key;
pub mod ordered_set;

pub use key::Key;
pub use ordered_set::OrderedSet;
