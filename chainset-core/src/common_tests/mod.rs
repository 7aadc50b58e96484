//! Test bodies shared by every lock discipline.
//!
//! Each function is generic over `D: LockDiscipline`; the integration tests
//! instantiate them once per discipline.


use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::data_structures::Keyed;

/// Value whose key is chosen independently of its payload, for exercising
/// key collisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagged {
    pub key: i64,
    pub tag: &'static str,
}

impl Keyed for Tagged {
    fn key(&self) -> i64 {
        self.key
    }
}

/// Value that counts how many times it has been dropped.
#[derive(Debug)]
pub struct DropCounter {
    pub key: i64,
    pub drops: Arc<AtomicUsize>,
}

impl Keyed for DropCounter {
    fn key(&self) -> i64 {
        self.key
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::Relaxed);
    }
}

/// Panics unless `values` is strictly ascending.
pub fn assert_strictly_ascending<T: Keyed + std::fmt::Debug>(values: &[T]) {
    for window in values.windows(2) {
        assert!(
            window[0].key() < window[1].key(),
            "not strictly ascending: {:?} then {:?}",
            window[0],
            window[1]
        );
    }
}
