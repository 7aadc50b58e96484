use parking_lot::RawMutex;
use parking_lot::lock_api::RawMutex as _;

use super::{LockDiscipline, NodeLock};

/// Per-node mutexes acquired with lock coupling.
///
/// A traversal always holds exactly two adjacent nodes: it locks the
/// successor's successor before unlocking the current node, so it never stands
/// on an unlocked node. Writers at disjoint regions of the chain proceed in
/// parallel. Operations on the same key, or on keys whose predecessor windows
/// overlap, are ordered by acquisition order on the contended node.
///
#[derive(Debug, Default, Clone, Copy)]
pub struct HandOverHand;

// SAFETY: node locks are `NodeMutex`, a real mutex.
unsafe impl LockDiscipline for HandOverHand {
    type NodeLock = NodeMutex;

    type Session<'a>
        = ()
    where
        Self: 'a;

    const NAME: &'static str = "hand-over-hand";

    #[inline]
    fn enter(&self) -> Self::Session<'_> {}

    #[inline]
    fn try_enter(&self) -> Option<Self::Session<'_>> {
        Some(())
    }
}

/// Raw mutex embedded in each node.
///
/// Lock and unlock are explicit calls rather than a scoped guard because a
/// traversal releases the predecessor's lock in a later loop iteration than
/// the one that acquired it.
///
pub struct NodeMutex(RawMutex);

impl Default for NodeMutex {
    fn default() -> Self {
        NodeMutex(RawMutex::INIT)
    }
}

impl std::fmt::Debug for NodeMutex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeMutex")
            .field("locked", &self.0.is_locked())
            .finish()
    }
}

impl NodeMutex {
    /// Whether some thread currently holds the lock.
    pub fn is_locked(&self) -> bool {
        self.0.is_locked()
    }
}

// SAFETY: `RawMutex` grants the lock to at most one holder at a time.
unsafe impl NodeLock for NodeMutex {
    #[inline]
    fn lock(&self) {
        self.0.lock();
    }

    #[inline]
    fn try_lock(&self) -> bool {
        self.0.try_lock()
    }

    #[inline]
    unsafe fn unlock(&self) {
        // SAFETY: caller holds the lock
        unsafe { self.0.unlock() }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn test_node_mutex_lock_unlock() {
        let lock = NodeMutex::default();
        assert!(!lock.is_locked());

        lock.lock();
        assert!(lock.is_locked());
        assert!(!lock.try_lock());

        unsafe { lock.unlock() };
        assert!(!lock.is_locked());
        assert!(lock.try_lock());
        unsafe { lock.unlock() };
    }

    #[test]
    fn test_node_mutex_blocks_other_thread() {
        let lock = Arc::new(NodeMutex::default());
        lock.lock();

        let contender = Arc::clone(&lock);
        let handle = thread::spawn(move || contender.try_lock());
        assert!(!handle.join().unwrap());

        unsafe { lock.unlock() };
    }

    #[test]
    fn test_session_is_always_available() {
        let discipline = HandOverHand;
        let _first = discipline.enter();
        assert!(discipline.try_enter().is_some());
    }
}
