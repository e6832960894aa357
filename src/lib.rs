//! # Lazy List - Concurrent Ordered Set
//!
//! A concurrent ordered set of integer keys built on the lazy synchronization
//! algorithm: a singly linked, always-sorted list that many threads can read
//! and modify at once without a global lock.
//!
//! ## Features
//!
//! - **Lock-free reads**: `contains` and `traverse` never lock and never block
//! - **Fine-grained writes**: `insert` and `delete` lock only the nodes next to the change
//! - **Logical deletion**: nodes are marked before they are unlinked, so racing readers stay consistent
//! - **Epoch-based reclamation**: unlinked nodes are freed only once no reader can reach them
//! - **Baseline oracle**: a coarse-lock [`CoarseList`] with the identical contract
//!
//! ## Example
//!
//! ```rust
//! use lazy_list::{LazyList, OrderedSet};
//!
//! let list = LazyList::new();
//! for key in [10, 12, 15] {
//!     assert!(list.insert(key));
//! }
//! assert!(list.contains(10));
//!
//! list.traverse(|key| {
//!     println!("found {}", key);
//!     true
//! });
//!
//! assert!(list.delete(15));
//! assert_eq!(list.len(), 2);
//! ```

pub mod list;

// Re-export the main public API from the list module
pub use list::{CoarseList, Key, LazyList, OrderedSet};
