//! Lock disciplines for the ordered chain.
//!
//! A discipline decides how much of the chain a single operation protects.
//! Sets are parameterized by a discipline type the same way they would be by
//! any other strategy type:
//!
//! ```text
//! ConcurrentOrderedSet<T, D: LockDiscipline>
//!     │
//!     ├── ConcurrentOrderedSet<T, Coarse>        one mutex for the whole chain
//!     └── ConcurrentOrderedSet<T, HandOverHand>  one mutex per node, coupled
//! ```
//!
//! Both disciplines drive the same lock-coupled traversal of the ordered
//! chain. Under `Coarse` the
//! per-node locks are zero-sized no-ops and the whole traversal runs inside the
//! session returned by [`LockDiscipline::enter`]. Under `HandOverHand` the
//! session is empty and every traversal step takes the next node's mutex
//! before giving up the current one.
//!
//! # Deadlock freedom
//!
//! Node locks are only ever acquired head-to-tail, and a session is always
//! taken before any node lock. No other acquisition order exists.

mod coarse;
mod hand_over_hand;

pub use coarse::{Coarse, Unlocked};
pub use hand_over_hand::{HandOverHand, NodeMutex};

/// Exclusive lock embedded in every chain node.
///
/// `unlock` may only be called by the thread that currently holds the lock,
/// exactly once per successful `lock` / `try_lock`.
///
/// # Safety
///
/// The chain frees and relinks nodes through raw pointers while it holds
/// their locks. An implementation must provide mutual exclusion: between a
/// successful `lock` / `try_lock` and the matching `unlock`, no other call to
/// `lock` or `try_lock` on the same value may succeed. [`Unlocked`] breaks
/// this on its own and is only sound behind a session that already excludes
/// every other thread, as [`Coarse`] provides.
///
pub unsafe trait NodeLock: Default + Send + Sync {
    /// Block until the lock is held by the calling thread.
    fn lock(&self);

    /// Take the lock if it is free. Never blocks.
    fn try_lock(&self) -> bool;

    /// Release the lock.
    ///
    /// # Safety
    ///
    /// The calling thread must hold the lock.
    unsafe fn unlock(&self);
}

/// Synchronization strategy for a [`ConcurrentOrderedSet`].
///
/// [`ConcurrentOrderedSet`]: crate::data_structures::ConcurrentOrderedSet
///
/// # Safety
///
/// The session and the node locks together must make every chain mutation
/// exclusive. Either the session excludes all other sessions for as long as
/// it lives, or [`LockDiscipline::NodeLock`] is a real mutex as described on
/// [`NodeLock`]. A discipline that does neither lets two threads relink or
/// free the same node.
///
/// Only `unsafe` code can supply a new discipline:
///
/// ```compile_fail,E0200
/// use chainset_core::discipline::{LockDiscipline, Unlocked};
///
/// #[derive(Default)]
/// struct NoLocks;
///
/// impl LockDiscipline for NoLocks {
///     type NodeLock = Unlocked;
///     type Session<'a> = ();
///     const NAME: &'static str = "none";
///     fn enter(&self) -> Self::Session<'_> {}
///     fn try_enter(&self) -> Option<Self::Session<'_>> {
///         Some(())
///     }
/// }
/// ```
///
pub unsafe trait LockDiscipline: Default + Send + Sync {
    /// Lock stored in each node of the chain.
    type NodeLock: NodeLock;

    /// Chain-wide protection held from operation entry to exit.
    ///
    /// Dropping the session releases it.
    type Session<'a>
    where
        Self: 'a;

    /// Short name used in diagnostics.
    const NAME: &'static str;

    /// Acquire chain-wide protection, blocking without bound.
    fn enter(&self) -> Self::Session<'_>;

    /// Acquire chain-wide protection only if it is immediately available.
    fn try_enter(&self) -> Option<Self::Session<'_>>;
}
