//! Coarse-grained baseline ordered set.
//!
//! This module contains [`CoarseList`], which serializes every operation behind
//! a single reader/writer lock. It carries the same [`OrderedSet`] contract as
//! [`LazyList`](crate::LazyList) and serves as the reference oracle for tests
//! and benchmarks.

use parking_lot::RwLock;

use crate::list::types::{Key, OrderedSet};

/// A sorted vector of keys guarded by one `RwLock`.
///
/// Readers share the lock; `insert` and `delete` take it exclusively.
#[derive(Default)]
pub struct CoarseList {
    keys: RwLock<Vec<Key>>,
}

impl CoarseList {
    /// Creates an empty list.
    pub fn new() -> Self {
        CoarseList::default()
    }
}

impl OrderedSet for CoarseList {
    fn contains(&self, key: Key) -> bool {
        self.keys.read().binary_search(&key).is_ok()
    }

    fn insert(&self, key: Key) -> bool {
        let mut keys = self.keys.write();
        match keys.binary_search(&key) {
            Ok(_) => false,
            Err(index) => {
                keys.insert(index, key);
                true
            }
        }
    }

    fn delete(&self, key: Key) -> bool {
        let mut keys = self.keys.write();
        match keys.binary_search(&key) {
            Ok(index) => {
                keys.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Visits a copy taken under the read lock, so the visitor runs unlocked
    /// and may call back into this set.
    fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(Key) -> bool,
    {
        let snapshot = self.keys.read().clone();
        for key in snapshot {
            if !visitor(key) {
                break;
            }
        }
    }

    fn len(&self) -> usize {
        self.keys.read().len()
    }
}

impl FromIterator<Key> for CoarseList {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut list = CoarseList::new();
        list.extend(iter);
        list
    }
}

impl Extend<Key> for CoarseList {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        let keys = self.keys.get_mut();
        keys.extend(iter);
        keys.sort_unstable();
        keys.dedup();
    }
}

impl std::fmt::Debug for CoarseList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.keys.read().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_scenario() {
        let list = CoarseList::new();

        assert!(list.insert(10));
        assert!(list.insert(12));
        assert!(list.insert(15));
        assert!(list.contains(10));
        assert_eq!(list.to_vec(), vec![10, 12, 15]);

        assert!(list.delete(15));
        assert_eq!(list.len(), 2);
        assert!(!list.contains(15));
    }

    #[test]
    fn test_duplicate_insert_and_absent_delete() {
        let list = CoarseList::new();

        assert!(list.insert(5));
        assert!(!list.insert(5));
        assert!(!list.delete(6));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_extend_keeps_set_semantics() {
        let list: CoarseList = [4, 2, 4, 9, 2].into_iter().collect();
        assert_eq!(list.to_vec(), vec![2, 4, 9]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_traverse_runs_without_lock() {
        let list: CoarseList = (1..=3).collect();
        let mut seen = Vec::new();

        list.traverse(|key| {
            list.insert(key * 10);
            seen.push(key);
            true
        });

        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(list.to_vec(), vec![1, 2, 3, 10, 20, 30]);
    }

    #[test]
    fn test_debug_format() {
        let list: CoarseList = [2, 1].into_iter().collect();
        assert_eq!(format!("{:?}", list), "{1, 2}");
    }
}
