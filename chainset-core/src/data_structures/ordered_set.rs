use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, trace};

use super::keyed::Keyed;
use super::node::{Bound, Node};
use super::ordered_chain::OrderedChain;
use super::set_iter::Iter;
use crate::discipline::{Coarse, HandOverHand, LockDiscipline};
use crate::error::{Error, Result, TryAddError};

/// Set guarded by a single chain-wide mutex.
pub type CoarseSet<T> = ConcurrentOrderedSet<T, Coarse>;

/// Set guarded by per-node mutexes with lock coupling.
pub type HandOverHandSet<T> = ConcurrentOrderedSet<T, HandOverHand>;

/// Concurrent set of values kept in ascending key order.
///
/// Membership is decided by [`Keyed::key`]: two values with the same key are
/// the same member. The lock discipline `D` decides how much of the chain an
/// operation holds:
///
/// ```text
/// CoarseSet<i32>         one mutex, every operation serialized
/// HandOverHandSet<i32>   two adjacent node mutexes per traversal
/// ```
///
/// Every operation builds what it needs (the new node, the key) before taking
/// any lock, runs one traversal under the discipline, and releases everything
/// before returning. Removed values are dropped after the locks are released.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
///
/// use chainset_core::data_structures::HandOverHandSet;
///
/// let set: Arc<HandOverHandSet<i32>> = Arc::new(HandOverHandSet::new());
/// let handles: Vec<_> = [[1, 3, 5], [2, 4, 6]]
///     .into_iter()
///     .map(|keys| {
///         let set = Arc::clone(&set);
///         thread::spawn(move || {
///             for key in keys {
///                 set.add(key);
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(set.len(), 6);
/// assert_eq!(set.to_vec(), vec![1, 2, 3, 4, 5, 6]);
/// ```
pub struct ConcurrentOrderedSet<T, D: LockDiscipline = HandOverHand> {
    chain: OrderedChain<T, D::NodeLock>,
    discipline: D,
    /// Member count, maintained next to each splice rather than by walking.
    len: AtomicUsize,
}

impl<T, D> ConcurrentOrderedSet<T, D>
where
    T: Keyed,
    D: LockDiscipline,
{
    /// Create an empty set: just the two sentinels, `len() == 0`.
    pub fn new() -> Self {
        trace!(discipline = D::NAME, "created ordered set");
        ConcurrentOrderedSet {
            chain: OrderedChain::new(),
            discipline: D::default(),
            len: AtomicUsize::new(0),
        }
    }

    /// Insert `value` unless a member with the same key exists.
    ///
    /// Returns `true` if the value was inserted. A duplicate key leaves the
    /// set untouched and returns `false`.
    ///
    pub fn add(&self, value: T) -> bool {
        let key = value.key();
        let node = Box::new(Node::new(value, key));

        let session = self.discipline.enter();
        let mut window = self.chain.find_predecessor(Bound::Key(key));
        let outcome = window.splice_insert(node);
        if outcome.is_ok() {
            self.len.fetch_add(1, Ordering::AcqRel);
        }
        window.release();
        drop(session);

        outcome.is_ok()
    }

    /// Remove the member whose key equals `value`'s key.
    ///
    /// Returns `true` if a member was removed, `false` if none matched.
    ///
    pub fn remove(&self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Remove the member whose key equals `value`'s key and return it.
    ///
    /// The returned value may differ from `value` when their keys collide.
    ///
    pub fn take(&self, value: &T) -> Option<T> {
        let key = Bound::Key(value.key());

        let session = self.discipline.enter();
        let mut window = self.chain.find_predecessor(key);
        let removed = window.splice_remove(key);
        if removed.is_some() {
            self.len.fetch_sub(1, Ordering::AcqRel);
        }
        window.release();
        drop(session);

        removed.and_then(|node| node.into_value())
    }

    /// Check whether a member with `value`'s key exists.
    pub fn contains(&self, value: &T) -> bool {
        let key = Bound::Key(value.key());

        let session = self.discipline.enter();
        let window = self.chain.find_predecessor(key);
        let found = window.successor_bound() == key;
        window.release();
        drop(session);

        found
    }

    /// Number of members.
    ///
    /// Read from an independent counter without taking any lock, so under
    /// concurrent writers it is a best-effort snapshot.
    ///
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the members in ascending key order.
    ///
    /// Under `Coarse` the snapshot is taken in one critical section and is a
    /// point-in-time view. Under `HandOverHand` it is taken with the coupled
    /// walk: every adjacent pair is seen consistently, but writers ahead of or
    /// behind the cursor may or may not be reflected.
    ///
    pub fn iter(&self) -> Iter<T>
    where
        T: Clone,
    {
        Iter::new(self.to_vec())
    }

    /// Collects all members into a Vec, in ascending key order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let session = self.discipline.enter();
        let values = self.chain.snapshot();
        drop(session);
        values
    }

    /// Remove every member. Returns how many were removed.
    ///
    /// Holds `head` for the whole sweep, so no new traversal can start. An add
    /// already in flight can only land ahead of the sweep cursor, where the
    /// sweep then removes it.
    ///
    pub fn clear(&self) -> usize {
        let session = self.discipline.enter();
        let unlinked = self.chain.unlink_all();
        self.len.fetch_sub(unlinked.len(), Ordering::AcqRel);
        drop(session);

        unlinked.len()
    }

    // =========================================================================
    // Non-blocking variants
    // =========================================================================

    /// `add` that never waits for a lock.
    ///
    /// # Errors
    ///
    /// Returns the value back inside [`TryAddError`] if any lock on the way
    /// was held by another thread. Nothing was changed in that case.
    ///
    pub fn try_add(&self, value: T) -> std::result::Result<bool, TryAddError<T>> {
        let key = value.key();
        let node = Box::new(Node::new(value, key));

        let Some(session) = self.discipline.try_enter() else {
            return Err(self.rejected(node, key));
        };
        let Some(mut window) = self.chain.try_find_predecessor(Bound::Key(key)) else {
            drop(session);
            return Err(self.rejected(node, key));
        };
        let outcome = window.splice_insert(node);
        if outcome.is_ok() {
            self.len.fetch_add(1, Ordering::AcqRel);
        }
        window.release();
        drop(session);

        Ok(outcome.is_ok())
    }

    /// `remove` that never waits for a lock.
    ///
    /// # Errors
    ///
    /// [`Error::Contended`] if any lock on the way was held by another thread.
    ///
    pub fn try_remove(&self, value: &T) -> Result<bool> {
        let key = value.key();

        let session = self.discipline.try_enter().ok_or_else(|| self.contended(key))?;
        let mut window = self
            .chain
            .try_find_predecessor(Bound::Key(key))
            .ok_or_else(|| self.contended(key))?;
        let removed = window.splice_remove(Bound::Key(key));
        if removed.is_some() {
            self.len.fetch_sub(1, Ordering::AcqRel);
        }
        window.release();
        drop(session);

        Ok(removed.is_some())
    }

    /// `contains` that never waits for a lock.
    ///
    /// # Errors
    ///
    /// [`Error::Contended`] if any lock on the way was held by another thread.
    ///
    pub fn try_contains(&self, value: &T) -> Result<bool> {
        let key = value.key();

        let session = self.discipline.try_enter().ok_or_else(|| self.contended(key))?;
        let window = self
            .chain
            .try_find_predecessor(Bound::Key(key))
            .ok_or_else(|| self.contended(key))?;
        let found = window.successor_bound() == Bound::Key(key);
        window.release();
        drop(session);

        Ok(found)
    }

    fn contended(&self, key: i64) -> Error {
        debug!(discipline = D::NAME, key, "backed off under contention");
        Error::Contended {
            discipline: D::NAME,
        }
    }

    fn rejected(&self, node: Box<Node<T, D::NodeLock>>, key: i64) -> TryAddError<T> {
        let error = self.contended(key);
        let Some(value) = node.into_value() else {
            unreachable!("member nodes always carry a value");
        };
        TryAddError::new(value, error)
    }
}

impl<T, D> Default for ConcurrentOrderedSet<T, D>
where
    T: Keyed,
    D: LockDiscipline,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, D> Extend<T> for ConcurrentOrderedSet<T, D>
where
    T: Keyed,
    D: LockDiscipline,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T, D> FromIterator<T> for ConcurrentOrderedSet<T, D>
where
    T: Keyed,
    D: LockDiscipline,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T, D> IntoIterator for &'a ConcurrentOrderedSet<T, D>
where
    T: Keyed + Clone,
    D: LockDiscipline,
{
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

impl<T, D> fmt::Debug for ConcurrentOrderedSet<T, D>
where
    T: Keyed + Clone + fmt::Debug,
    D: LockDiscipline,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentOrderedSet")
            .field("discipline", &D::NAME)
            .field("len", &self.len())
            .field("members", &self.to_vec())
            .finish()
    }
}
