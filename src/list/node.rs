//! Node definition for the lazy list.
//!
//! This module contains the Node struct, the unit of the lazily synchronized
//! list: a key, an atomically published successor link, a per-node lock and a
//! logical-deletion mark.

use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_epoch::{Atomic, Guard, Pointer, Shared};
use parking_lot::{Mutex, MutexGuard};

use crate::list::types::Key;

/// A single element of the lazy list.
///
/// # Synchronization
///
/// - `next` may be read by any thread at any time (acquire), but is only ever
///   written by a thread holding this node's lock (release).
/// - `marked` goes from false to true exactly once, under this node's lock,
///   when a delete of this node commits. It never reverts.
/// - `key` is immutable, so comparisons need no synchronization.
pub(crate) struct Node {
    key: Key,
    next: Atomic<Node>,
    lock: Mutex<()>,
    marked: AtomicBool,
}

impl Node {
    /// Creates an unmarked, unlinked node holding `key`.
    pub(crate) fn new(key: Key) -> Self {
        Node {
            key,
            next: Atomic::null(),
            lock: Mutex::new(()),
            marked: AtomicBool::new(false),
        }
    }

    /// Creates the sentinel head node.
    ///
    /// Its key is a placeholder: traversals start at the sentinel's successor
    /// and never compare against the sentinel itself.
    pub(crate) fn sentinel() -> Self {
        Node::new(Key::MIN)
    }

    pub(crate) fn key(&self) -> Key {
        self.key
    }

    /// Loads the successor link.
    pub(crate) fn load_next<'g>(&self, guard: &'g Guard) -> Shared<'g, Node> {
        self.next.load(Ordering::Acquire, guard)
    }

    /// Publishes a new successor link.
    ///
    /// Callers must hold this node's lock, unless the node is not yet
    /// reachable by any other thread.
    pub(crate) fn store_next<P: Pointer<Node>>(&self, next: P) {
        self.next.store(next, Ordering::Release);
    }

    pub(crate) fn less_than(&self, key: Key) -> bool {
        self.key < key
    }

    pub(crate) fn equals(&self, key: Key) -> bool {
        self.key == key
    }

    /// Returns true once this node has been logically deleted.
    pub(crate) fn is_marked(&self) -> bool {
        self.marked.load(Ordering::Acquire)
    }

    /// Logically deletes this node. Callers must hold this node's lock.
    pub(crate) fn set_marked(&self) {
        self.marked.store(true, Ordering::Release);
    }

    /// Acquires this node's lock; it is released when the guard drops.
    pub(crate) fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock()
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("marked", &self.is_marked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_epoch::{self as epoch, Owned};

    #[test]
    fn test_node_creation() {
        let node = Node::new(42);

        assert_eq!(node.key(), 42);
        assert!(!node.is_marked());

        let guard = epoch::pin();
        assert!(node.load_next(&guard).is_null());
    }

    #[test]
    fn test_node_comparisons() {
        let node = Node::new(10);

        assert!(node.less_than(11));
        assert!(!node.less_than(10));
        assert!(!node.less_than(9));

        assert!(node.equals(10));
        assert!(!node.equals(11));
    }

    #[test]
    fn test_extreme_keys() {
        let low = Node::new(Key::MIN);
        let high = Node::new(Key::MAX);

        assert!(low.less_than(Key::MAX));
        assert!(!high.less_than(Key::MAX));
        assert!(high.equals(Key::MAX));
    }

    #[test]
    fn test_set_marked_is_idempotent() {
        let node = Node::new(7);

        node.set_marked();
        assert!(node.is_marked());

        node.set_marked();
        assert!(node.is_marked());
    }

    #[test]
    fn test_store_and_load_next() {
        let head = Node::sentinel();
        let guard = epoch::pin();

        let successor = Owned::new(Node::new(5)).into_shared(&guard);
        {
            let _locked = head.lock();
            head.store_next(successor);
        }

        let loaded = head.load_next(&guard);
        assert_eq!(loaded, successor);
        assert_eq!(unsafe { loaded.deref() }.key(), 5);

        head.store_next(Shared::<Node>::null());
        drop(unsafe { successor.into_owned() });
    }

    #[test]
    fn test_lock_is_exclusive() {
        let node = Node::new(1);

        let held = node.lock();
        assert!(node.lock.try_lock().is_none());
        drop(held);

        assert!(node.lock.try_lock().is_some());
    }

    #[test]
    fn test_debug_shows_mark() {
        let node = Node::new(3);
        assert_eq!(format!("{:?}", node), "Node { key: 3, marked: false }");

        node.set_marked();
        assert_eq!(format!("{:?}", node), "Node { key: 3, marked: true }");
    }
}
