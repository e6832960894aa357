//! Lazily synchronized sorted linked list.
//!
//! This module contains [`LazyList`], a concurrent ordered set in which
//! membership tests never lock, and mutations lock only the nodes adjacent to
//! the change.
//!
//! # Protocol
//!
//! - `contains` and `traverse` walk the chain without locks and treat a marked
//!   node as absent.
//! - `insert` locks the predecessor only; the new node is unpublished until the
//!   final release store.
//! - `delete` locks the victim, then its predecessor, marks the victim
//!   (logical deletion) and then unlinks it (physical deletion).
//! - Both mutators validate their unlocked snapshot after locking, and retry
//!   from the sentinel when a concurrent mutation invalidated it.
//!
//! Locks are always taken in descending key order (successor before
//! predecessor), so no two mutators can wait on each other in a cycle.
//!
//! # Reclamation
//!
//! Every operation pins the current thread with `crossbeam-epoch`. Unlinked
//! nodes are retired with `defer_destroy`, so a reader still standing on a
//! removed node keeps it alive until it unpins.

use std::sync::atomic::{AtomicIsize, Ordering};

use crossbeam_epoch::{self as epoch, Guard, Owned, Shared};
use crossbeam_utils::{Backoff, CachePadded};
use tracing::{debug, trace};

use crate::list::node::Node;
use crate::list::types::{Key, OrderedSet};

/// Outcome of one locked attempt of a mutator.
enum Attempt {
    Committed,
    Retry(&'static str),
}

/// A concurrent ordered set of [`Key`]s built on the lazy list algorithm.
///
/// # Example
///
/// ```rust
/// use lazy_list::{LazyList, OrderedSet};
///
/// let list = LazyList::new();
/// assert!(list.insert(12));
/// assert!(list.insert(10));
/// assert!(!list.insert(10));
/// assert_eq!(list.to_vec(), vec![10, 12]);
/// ```
pub struct LazyList {
    /// Permanent sentinel; never marked, never removed.
    head: Node,
    /// Committed inserts minus committed deletes. Updated after the structural
    /// change and outside its locks, so it may briefly lag or even dip below
    /// zero under concurrency.
    len: CachePadded<AtomicIsize>,
}

impl LazyList {
    /// Creates an empty list.
    pub fn new() -> Self {
        LazyList {
            head: Node::sentinel(),
            len: CachePadded::new(AtomicIsize::new(0)),
        }
    }

    /// Walks the chain without locking and returns the last node with a key
    /// below `key` together with its successor at the time it was read.
    fn find<'g>(&'g self, key: Key, guard: &'g Guard) -> (&'g Node, Shared<'g, Node>) {
        let mut pred = &self.head;
        let mut curr = pred.load_next(guard);

        // SAFETY: every node reachable while `guard` is pinned stays allocated
        // until the guard is dropped; unlinked nodes are only retired through
        // `defer_destroy`.
        while let Some(node) = unsafe { curr.as_ref() } {
            if !node.less_than(key) {
                break;
            }
            pred = node;
            curr = node.load_next(guard);
        }

        (pred, curr)
    }

    /// Checks, under `pred`'s lock, that the unlocked snapshot still holds:
    /// `pred` has not been deleted and still points at `curr`.
    fn validate(pred: &Node, curr: Shared<'_, Node>, guard: &Guard) -> bool {
        !pred.is_marked() && pred.load_next(guard) == curr
    }

    #[cfg(test)]
    pub(crate) fn chain(&self) -> Vec<(Key, bool)> {
        let guard = &epoch::pin();
        let mut nodes = Vec::new();
        let mut curr = self.head.load_next(guard);
        while let Some(node) = unsafe { curr.as_ref() } {
            nodes.push((node.key(), node.is_marked()));
            curr = node.load_next(guard);
        }
        nodes
    }
}

impl OrderedSet for LazyList {
    fn contains(&self, key: Key) -> bool {
        let guard = &epoch::pin();
        let (_, curr) = self.find(key, guard);

        match unsafe { curr.as_ref() } {
            Some(node) => node.equals(key) && !node.is_marked(),
            None => false,
        }
    }

    fn insert(&self, key: Key) -> bool {
        let guard = &epoch::pin();
        let backoff = Backoff::new();
        let mut attempt = 0u32;

        loop {
            let (pred, curr) = self.find(key, guard);

            // A marked successor is already unlinked from the chain, so it is
            // not a duplicate; validation below fails and the retry skips it.
            if let Some(node) = unsafe { curr.as_ref() } {
                if node.equals(key) && !node.is_marked() {
                    return false;
                }
            }

            let outcome = {
                let _pred_lock = pred.lock();
                if Self::validate(pred, curr, guard) {
                    let node = Owned::new(Node::new(key));
                    node.store_next(curr);
                    pred.store_next(node);
                    Attempt::Committed
                } else {
                    Attempt::Retry("predecessor changed")
                }
            };

            match outcome {
                Attempt::Committed => {
                    self.len.fetch_add(1, Ordering::Relaxed);
                    return true;
                }
                Attempt::Retry(reason) => {
                    attempt += 1;
                    trace!(key, attempt, reason, "insert validation failed, retrying");
                    backoff.spin();
                }
            }
        }
    }

    fn delete(&self, key: Key) -> bool {
        let guard = &epoch::pin();
        let backoff = Backoff::new();
        let mut attempt = 0u32;

        loop {
            let (pred, curr) = self.find(key, guard);
            let node = match unsafe { curr.as_ref() } {
                Some(node) if node.equals(key) => node,
                _ => return false,
            };

            let outcome = {
                let _node_lock = node.lock();
                if node.is_marked() {
                    Attempt::Retry("victim already deleted")
                } else {
                    let _pred_lock = pred.lock();
                    if Self::validate(pred, curr, guard) {
                        node.set_marked();
                        pred.store_next(node.load_next(guard));
                        Attempt::Committed
                    } else {
                        Attempt::Retry("predecessor changed")
                    }
                }
            };

            match outcome {
                Attempt::Committed => {
                    // SAFETY: the node is marked and unlinked; no new traversal
                    // can reach it, and current ones are protected by their pins.
                    unsafe { guard.defer_destroy(curr) };
                    self.len.fetch_sub(1, Ordering::Relaxed);
                    if attempt > 0 {
                        debug!(key, attempt, "delete committed after retries");
                    }
                    return true;
                }
                Attempt::Retry(reason) => {
                    attempt += 1;
                    trace!(key, attempt, reason, "delete validation failed, retrying");
                    backoff.spin();
                }
            }
        }
    }

    fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(Key) -> bool,
    {
        let guard = &epoch::pin();
        let mut curr = self.head.load_next(guard);

        while let Some(node) = unsafe { curr.as_ref() } {
            if !node.is_marked() && !visitor(node.key()) {
                break;
            }
            curr = node.load_next(guard);
        }
    }

    fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed).max(0) as usize
    }
}

impl Default for LazyList {
    fn default() -> Self {
        LazyList::new()
    }
}

impl Drop for LazyList {
    fn drop(&mut self) {
        // SAFETY: `&mut self` rules out concurrent readers, and nodes removed
        // by `delete` are no longer in the chain, so each node is freed once.
        unsafe {
            let guard = epoch::unprotected();
            let mut curr = self.head.load_next(guard);
            while !curr.is_null() {
                let next = curr.deref().load_next(guard);
                drop(curr.into_owned());
                curr = next;
            }
        }
    }
}

impl FromIterator<Key> for LazyList {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut list = LazyList::new();
        list.extend(iter);
        list
    }
}

impl Extend<Key> for LazyList {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        let mut shared: &LazyList = self;
        shared.extend(iter);
    }
}

impl Extend<Key> for &LazyList {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl std::fmt::Debug for LazyList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.to_vec()).finish()
    }
}
