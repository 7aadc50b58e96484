use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

use crate::discipline::NodeLock;

pub(crate) type NodePtr<T, L> = *mut Node<T, L>;

/// Position of a node in the chain order.
///
/// Sentinels sit outside the integer key space: `Min < Key(_) < Max` for every
/// key, so `i64::MIN` and `i64::MAX` are ordinary member keys.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Bound {
    Min,
    Key(i64),
    Max,
}

/// One cell of the chain.
///
/// `bound` is fixed at construction. `next` is only read or written while the
/// lock(s) required by the active discipline are held; the atomic is there so
/// that the store publishing a spliced node is a release store.
///
pub(crate) struct Node<T, L> {
    bound: Bound,
    value: Option<T>,
    next: AtomicPtr<Node<T, L>>,
    lock: L,
}

impl<T, L: NodeLock> Node<T, L> {
    pub(crate) fn new(value: T, key: i64) -> Self {
        Node {
            bound: Bound::Key(key),
            value: Some(value),
            next: AtomicPtr::new(ptr::null_mut()),
            lock: L::default(),
        }
    }

    pub(crate) fn new_sentinel(bound: Bound) -> Self {
        debug_assert!(!matches!(bound, Bound::Key(_)));
        Node {
            bound,
            value: None,
            next: AtomicPtr::new(ptr::null_mut()),
            lock: L::default(),
        }
    }

    #[inline]
    pub(crate) fn bound(&self) -> Bound {
        self.bound
    }

    #[inline]
    pub(crate) fn is_tail(&self) -> bool {
        self.bound == Bound::Max
    }

    #[inline]
    pub(crate) fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub(crate) fn into_value(self: Box<Self>) -> Option<T> {
        self.value
    }

    // =========================================================================
    // Next pointer accessors
    // =========================================================================

    /// Load next pointer (Acquire ordering)
    #[inline]
    pub(crate) fn get_next(&self) -> NodePtr<T, L> {
        self.next.load(Ordering::Acquire)
    }

    /// Store next pointer (Release ordering)
    #[inline]
    pub(crate) fn set_next(&self, next: NodePtr<T, L>) {
        self.next.store(next, Ordering::Release)
    }

    // =========================================================================
    // Lock accessors
    // =========================================================================

    #[inline]
    pub(crate) fn lock(&self) {
        self.lock.lock();
    }

    #[inline]
    pub(crate) fn try_lock(&self) -> bool {
        self.lock.try_lock()
    }

    /// # Safety
    /// The calling thread must hold this node's lock.
    #[inline]
    pub(crate) unsafe fn unlock(&self) {
        unsafe { self.lock.unlock() }
    }

    #[cfg(test)]
    pub(crate) fn node_lock(&self) -> &L {
        &self.lock
    }
}
