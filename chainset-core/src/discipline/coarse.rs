use parking_lot::{Mutex, MutexGuard};

use super::{LockDiscipline, NodeLock};

/// One mutex guards the entire chain.
///
/// Every operation, reads and enumeration included, holds the mutex from entry
/// to exit, so at most one thread touches the chain at a time. Operations are
/// linearized in lock acquisition order. This is the obviously correct
/// baseline; it serializes all threads regardless of which keys they target.
///
#[derive(Debug, Default)]
pub struct Coarse {
    lock: Mutex<()>,
}

// SAFETY: the session is a guard on one mutex shared by the whole chain, so at
// most one thread is inside the chain while it lives.
unsafe impl LockDiscipline for Coarse {
    type NodeLock = Unlocked;

    type Session<'a>
        = MutexGuard<'a, ()>
    where
        Self: 'a;

    const NAME: &'static str = "coarse";

    fn enter(&self) -> Self::Session<'_> {
        self.lock.lock()
    }

    fn try_enter(&self) -> Option<Self::Session<'_>> {
        self.lock.try_lock()
    }
}

/// Node lock for chains already protected by a chain-wide mutex.
///
/// Zero-sized; every method is a no-op. Sound only under a session that
/// already excludes every other thread.
///
#[derive(Debug, Default, Clone, Copy)]
pub struct Unlocked;

// SAFETY: provides no exclusion. Only `Coarse` pairs it with a session, and
// that session already excludes every other thread.
unsafe impl NodeLock for Unlocked {
    #[inline]
    fn lock(&self) {}

    #[inline]
    fn try_lock(&self) -> bool {
        true
    }

    #[inline]
    unsafe fn unlock(&self) {}
}
