//! chained-ds: a separate-chaining hash table built on a sentinel-headed
//! singly linked list, plus three classic array sorts.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: small, single-threaded containers whose invariants and
//!   complexity are easy to reason about and to test directly.
//! - Layers:
//!   - LinkedList<T>: owned node chain behind a virtual head link; O(1)
//!     front operations, O(index) positional access, and a stable merge
//!     sort that relinks nodes instead of copying them.
//!   - HashTable<K, V, S>: array of `LinkedList` buckets; head insertion,
//!     doubling resize once `len > capacity * 0.75`.
//!   - sorting: selection, merge and quick sort over `&mut [T]` with a
//!     caller comparator; independent of the containers.
//!
//! Constraints
//! - Single-threaded and synchronous; no interior mutability.
//! - Each node owns its successor and each table owns its buckets; there
//!   are no shared or cyclic links.
//! - Positional failures and empty removals are `Err`, never clamped.
//!   Absent keys are `None`.
//! - Failed operations leave the structure unchanged.
//!
//! Hasher and bucket placement
//! - `S: BuildHasher` supplies the key hash (default: hashbrown's
//!   `DefaultHashBuilder`). The bucket is the low 32 hash bits with the
//!   sign bit cleared, modulo the bucket count.
//! - Capacity is a power of two and only grows.
//! - Chain order is most-recent-first within a bucket. A resize drains
//!   each old chain onto the heads of the new ones, which reverses the
//!   relative order of keys that still share a bucket. Do not rely on
//!   iteration order across a resize.
//!
//! Sorting notes
//! - `merge_sort` allocates one buffer per merge and needs `T: Clone`.
//! - `quick_sort` always pivots on the last element (Lomuto); sorted input
//!   is its worst case for time. It recurses only into the shorter side,
//!   so stack depth stays logarithmic.

pub mod error;
pub mod hash_table;
mod hash_table_proptest;
pub mod linked_list;
pub mod sorting;

// Public surface
pub use error::{Error, Result};
pub use hash_table::HashTable;
pub use linked_list::LinkedList;
pub use sorting::{merge_sort, quick_sort, selection_sort, SortAlgorithm};
