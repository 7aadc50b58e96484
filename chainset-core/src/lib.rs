//! Concurrent key-ordered set on a singly linked list.
//!
//! Two lock disciplines share one search/splice algorithm:
//!
//! - [`Coarse`]: one mutex held for the whole operation
//! - [`HandOverHand`]: per-node mutexes, acquired head-to-tail with lock
//!   coupling so disjoint regions of the list are mutated in parallel
//!
//! ```rust
//! use chainset_core::{CoarseSet, HandOverHandSet};
//!
//! let coarse: CoarseSet<i64> = CoarseSet::new();
//! assert!(coarse.add(3));
//! assert!(!coarse.add(3));
//!
//! let coupled: HandOverHandSet<i64> = [5, 1, 3].into_iter().collect();
//! assert!(coupled.remove(&1));
//! assert_eq!(coupled.to_vec(), vec![3, 5]);
//! assert_eq!(coupled.len(), 2);
//! ```

pub mod common_tests;
pub mod data_structures;
pub mod discipline;
pub mod error;

// Re-export the public surface for convenience
pub use data_structures::{CoarseSet, ConcurrentOrderedSet, HandOverHandSet, Hashed, Iter, Keyed};
pub use discipline::{Coarse, HandOverHand, LockDiscipline, NodeLock};
pub use error::{Error, Result, TryAddError};
