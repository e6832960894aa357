//! Key type stored by the ordered sets.
//!
//! This module contains the definition of Key, the single totally-ordered
//! scalar that both set implementations are written against.

/// The element type of every ordered set in this crate.
///
/// Keys are compared with the natural `i64` ordering. Every value, including
/// `i64::MIN` and `i64::MAX`, is an ordinary key: the sentinel head node never
/// takes part in comparisons, so no value is reserved for it.
pub type Key = i64;
