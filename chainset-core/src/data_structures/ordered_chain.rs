use std::marker::PhantomData;
use std::ptr;

use tracing::trace;

use super::node::{Bound, Node, NodePtr};
use crate::discipline::NodeLock;

// =============================================================================
// ORDERED CHAIN
// =============================================================================
//
// ┌──────┐    ┌──────┐    ┌──────┐    ┌──────┐
// │ HEAD │───►│  10  │───►│  20  │───►│ TAIL │───► null
// │ Min  │    │      │    │      │    │ Max  │
// └──────┘    └──────┘    └──────┘    └──────┘
//
// INVARIANTS (whenever the locks covering a region are released):
// 1. Bounds strictly ascend from HEAD to TAIL, so no two members share a key
// 2. HEAD and TAIL are never unlinked and never reported as members
// 3. HEAD.next is never null; the last member's next is TAIL
//
// =============================================================================
// LOCK COUPLING
// =============================================================================
//
// A `Window` is the pair (pred, curr) a traversal holds locked, with
// curr == pred.next. Advancing slides the pair one node to the right:
//
//   holds:   [pred] ──► [curr] ──►  next
//   step 1:  [pred] ──► [curr] ──► [next]     lock next
//   step 2:   pred  ──► [curr] ──► [next]     unlock pred
//
// The traversal never stands on an unlocked node. A remover holds both the
// victim and its predecessor, so once it has unlinked the victim and released
// the predecessor, no traversal can reach the victim any more and it is freed
// right away.
//
// Under the coarse discipline node locks are no-ops and the same code runs
// inside the chain-wide session.
//
// =============================================================================

/// Singly linked chain bounded by two permanent sentinels.
///
/// The chain owns every node reachable from `head`. Nodes never leave through
/// references; values are moved in by `splice_insert` and moved out by the
/// caller of `splice_remove`.
///
pub(crate) struct OrderedChain<T, L: NodeLock> {
    head: NodePtr<T, L>,
}

// SAFETY: values are only reached while holding the node (or chain) lock,
// which hands exclusive access from thread to thread like a `Mutex<T>`.
unsafe impl<T: Send, L: NodeLock> Send for OrderedChain<T, L> {}
unsafe impl<T: Send, L: NodeLock> Sync for OrderedChain<T, L> {}

impl<T, L: NodeLock> OrderedChain<T, L> {
    pub(crate) fn new() -> Self {
        let tail = Box::into_raw(Box::new(Node::new_sentinel(Bound::Max)));
        let head = Box::new(Node::new_sentinel(Bound::Min));
        head.set_next(tail);
        OrderedChain {
            head: Box::into_raw(head),
        }
    }

    /// Lock `head`, then `head.next`.
    pub(crate) fn lock_head(&self) -> Window<'_, T, L> {
        // SAFETY: head is never freed before the chain
        let head = unsafe { &*self.head };
        head.lock();
        let mut window = Window::new(self.head);
        window.lock_successor();
        window
    }

    /// Like `lock_head`, but gives up instead of blocking.
    pub(crate) fn try_lock_head(&self) -> Option<Window<'_, T, L>> {
        // SAFETY: head is never freed before the chain
        let head = unsafe { &*self.head };
        if !head.try_lock() {
            return None;
        }
        let mut window = Window::new(self.head);
        window.try_lock_successor().then_some(window)
    }

    /// Returns the window whose predecessor is the last node with a bound below
    /// `key`, i.e. `pred < key <= curr`.
    ///
    pub(crate) fn find_predecessor(&self, key: Bound) -> Window<'_, T, L> {
        let mut window = self.lock_head();
        while window.successor_bound() < key {
            window.advance();
        }
        window
    }

    /// Non-blocking `find_predecessor`. On contention every lock taken so far
    /// is released and `None` is returned.
    ///
    pub(crate) fn try_find_predecessor(&self, key: Bound) -> Option<Window<'_, T, L>> {
        let mut window = self.try_lock_head()?;
        while window.successor_bound() < key {
            if !window.try_advance() {
                return None;
            }
        }
        Some(window)
    }

    /// Clones every member in ascending key order using the coupled walk.
    ///
    pub(crate) fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut values = Vec::new();
        let mut window = self.lock_head();
        while let Some(value) = window.successor_value() {
            values.push(value.clone());
            window.advance();
        }
        window.release();
        values
    }

    /// Unlinks every member, front to back, while holding `head`.
    ///
    pub(crate) fn unlink_all(&self) -> Vec<Box<Node<T, L>>> {
        let mut unlinked = Vec::new();
        let mut window = self.lock_head();
        while let key @ Bound::Key(_) = window.successor_bound() {
            unlinked.extend(window.splice_remove(key));
            window.lock_successor();
        }
        window.release();
        unlinked
    }

    #[cfg(test)]
    pub(crate) fn head(&self) -> &Node<T, L> {
        unsafe { &*self.head }
    }
}

impl<T, L: NodeLock> Drop for OrderedChain<T, L> {
    fn drop(&mut self) {
        // `&mut self`: no window can be alive, so no lock is held.
        let mut curr = self.head;
        let mut freed = 0usize;
        while !curr.is_null() {
            // SAFETY: every node from head to tail was allocated with Box::new
            let node = unsafe { Box::from_raw(curr) };
            curr = node.get_next();
            freed += 1;
        }
        trace!(nodes = freed, "released ordered chain");
    }
}

/// Two adjacent nodes held locked by one traversal.
///
/// `pred` is always locked. `curr` is locked unless it is null, which only
/// happens between `splice_remove` and the next `lock_successor`.
///
/// Locks are released by `release` on the normal exit paths. Dropping the
/// window releases them as well, which covers early returns and unwinding out
/// of a panicking `Clone`.
///
pub(crate) struct Window<'c, T, L: NodeLock> {
    pred: NodePtr<T, L>,
    curr: NodePtr<T, L>,
    _chain: PhantomData<&'c OrderedChain<T, L>>,
}

impl<'c, T, L: NodeLock> Window<'c, T, L> {
    /// `pred` must already be locked by the calling thread.
    fn new(pred: NodePtr<T, L>) -> Self {
        Window {
            pred,
            curr: ptr::null_mut(),
            _chain: PhantomData,
        }
    }

    /// Lock `pred.next` and make it `curr`.
    pub(crate) fn lock_successor(&mut self) {
        debug_assert!(self.curr.is_null());
        // SAFETY: pred is locked, so pred.next is live and cannot be unlinked
        unsafe {
            let next = (*self.pred).get_next();
            (*next).lock();
            self.curr = next;
        }
    }

    fn try_lock_successor(&mut self) -> bool {
        debug_assert!(self.curr.is_null());
        // SAFETY: pred is locked, so pred.next is live and cannot be unlinked
        unsafe {
            let next = (*self.pred).get_next();
            if !(*next).try_lock() {
                return false;
            }
            self.curr = next;
        }
        true
    }

    /// Slide one node towards the tail: lock `curr.next`, then unlock `pred`.
    ///
    /// `curr` must not be the tail.
    ///
    pub(crate) fn advance(&mut self) {
        debug_assert!(!self.curr.is_null());
        // SAFETY: curr is locked, so curr.next is live and cannot be unlinked
        unsafe {
            debug_assert!(!(*self.curr).is_tail());
            let next = (*self.curr).get_next();
            (*next).lock();
            (*self.pred).unlock();
            self.pred = self.curr;
            self.curr = next;
        }
    }

    /// Non-blocking `advance`. Leaves the window unchanged on contention.
    fn try_advance(&mut self) -> bool {
        debug_assert!(!self.curr.is_null());
        // SAFETY: curr is locked, so curr.next is live and cannot be unlinked
        unsafe {
            debug_assert!(!(*self.curr).is_tail());
            let next = (*self.curr).get_next();
            if !(*next).try_lock() {
                return false;
            }
            (*self.pred).unlock();
            self.pred = self.curr;
            self.curr = next;
        }
        true
    }

    #[inline]
    pub(crate) fn successor_bound(&self) -> Bound {
        debug_assert!(!self.curr.is_null());
        // SAFETY: curr is locked by this window
        unsafe { (*self.curr).bound() }
    }

    /// Value of `curr`, `None` at the tail.
    #[inline]
    pub(crate) fn successor_value(&self) -> Option<&T> {
        debug_assert!(!self.curr.is_null());
        // SAFETY: curr is locked by this window and outlives the borrow
        unsafe { (*self.curr).value() }
    }

    /// Splice `node` between `pred` and `curr`.
    ///
    /// Fails without touching the chain if `curr` already has the node's key,
    /// handing the node back. `node.next` is wired before `pred.next` is
    /// published, so whoever reaches the node sees it fully formed.
    ///
    /// After a successful splice `curr` is no longer `pred.next`; the window
    /// must only be released.
    ///
    pub(crate) fn splice_insert(
        &mut self,
        node: Box<Node<T, L>>,
    ) -> Result<(), Box<Node<T, L>>> {
        if self.successor_bound() == node.bound() {
            return Err(node);
        }
        node.set_next(self.curr);
        let node = Box::into_raw(node);
        // SAFETY: pred is locked by this window
        unsafe { (*self.pred).set_next(node) };
        Ok(())
    }

    /// Unlink `curr` if its bound is `key`.
    ///
    /// The unlinked node is unlocked and returned to the caller, who owns it
    /// exclusively from here on: nobody can be waiting on its lock, since
    /// reaching it requires `pred`, which this window still holds.
    ///
    pub(crate) fn splice_remove(&mut self, key: Bound) -> Option<Box<Node<T, L>>> {
        if self.successor_bound() != key {
            return None;
        }
        debug_assert!(matches!(key, Bound::Key(_)));
        let victim = self.curr;
        // SAFETY: pred and victim are locked by this window; victim is a
        // member node allocated with Box::new
        unsafe {
            (*self.pred).set_next((*victim).get_next());
            (*victim).unlock();
            self.curr = ptr::null_mut();
            Some(Box::from_raw(victim))
        }
    }

    /// Unlock both nodes, predecessor first.
    pub(crate) fn release(self) {
        drop(self);
    }
}

impl<T, L: NodeLock> Drop for Window<'_, T, L> {
    fn drop(&mut self) {
        // SAFETY: this window holds pred and, when non-null, curr
        unsafe {
            (*self.pred).unlock();
            if !self.curr.is_null() {
                (*self.curr).unlock();
            }
        }
    }
}
