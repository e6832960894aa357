//! The operation contract shared by every ordered set implementation.
//!
//! `LazyList` and `CoarseList` both implement [`OrderedSet`], so the same
//! workload can be run against either one and the observable outcomes compared.

use crate::list::types::key::Key;

/// A concurrent ordered set of [`Key`]s.
///
/// All operations take `&self`; implementations are shared between threads
/// behind an `Arc`. "Already present" and "absent" are ordinary `false`
/// results, never errors.
pub trait OrderedSet: Send + Sync {
    /// Returns true if `key` is currently in the set.
    fn contains(&self, key: Key) -> bool;

    /// Adds `key` to the set.
    ///
    /// Returns true iff this call added the key; false if it was already present.
    fn insert(&self, key: Key) -> bool;

    /// Removes `key` from the set.
    ///
    /// Returns true iff this call removed the key; false if it was absent.
    fn delete(&self, key: Key) -> bool;

    /// Calls `visitor` with each key in ascending order, stopping as soon as
    /// the visitor returns false.
    ///
    /// This is not a snapshot: keys inserted or deleted while the traversal
    /// runs may or may not be observed.
    fn traverse<F>(&self, visitor: F)
    where
        F: FnMut(Key) -> bool;

    /// Returns the number of keys in the set.
    ///
    /// Under concurrent mutation this is an approximation; it is exact at
    /// quiescent points.
    fn len(&self) -> usize;

    /// Returns true if [`len`](OrderedSet::len) is zero.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collects the keys in ascending order.
    fn to_vec(&self) -> Vec<Key> {
        let mut keys = Vec::new();
        self.traverse(|key| {
            keys.push(key);
            true
        });
        keys
    }
}
