//! Concurrent ordered set and the chain underneath it.
//!
//! # Organization
//!
//! - [`ordered_set`] - Public set façade, generic over the lock discipline
//! - [`keyed`] - Key derivation for elements
//! - [`set_iter`] - Snapshot iterator
//! - `ordered_chain`, `node` - Sentinel-bounded chain, search and splice
//!   primitives, lock-coupled window (pub(crate))

pub mod keyed;
pub(crate) mod node;
pub(crate) mod ordered_chain;
pub mod ordered_set;
pub mod set_iter;

pub use keyed::{Hashed, Keyed};
pub use ordered_set::{CoarseSet, ConcurrentOrderedSet, HandOverHandSet};
pub use set_iter::Iter;
