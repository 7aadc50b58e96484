//! Ordering keys for set elements.
//!
//! Every element maps to a signed 64-bit key once, when its node is built.
//! The chain orders by key and treats equal keys as the same member, so two
//! values whose keys collide are one element as far as the set is concerned,
//! even when the values themselves differ.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;

/// Derives the ordering key of a value.
///
/// # Contract
///
/// `key` must be deterministic and must not change while the value is a
/// member of a set. Violations are not detected; the chain may then report
/// wrong membership or order.
///
pub trait Keyed {
    fn key(&self) -> i64;
}

macro_rules! impl_keyed_widening {
    ($($t:ty),* $(,)?) => {
        $(
            impl Keyed for $t {
                #[inline]
                fn key(&self) -> i64 {
                    i64::from(*self)
                }
            }
        )*
    };
}

// Bit reinterpretation: injective, but large unsigned values order below zero.
macro_rules! impl_keyed_reinterpret {
    ($($t:ty),* $(,)?) => {
        $(
            impl Keyed for $t {
                #[inline]
                fn key(&self) -> i64 {
                    *self as i64
                }
            }
        )*
    };
}

impl_keyed_widening!(i8, i16, i32, i64, u8, u16, u32, bool);
impl_keyed_reinterpret!(u64, usize, isize);

impl Keyed for char {
    #[inline]
    fn key(&self) -> i64 {
        i64::from(u32::from(*self))
    }
}

impl<K: Keyed + ?Sized> Keyed for &K {
    #[inline]
    fn key(&self) -> i64 {
        (**self).key()
    }
}

impl<K: Keyed + ?Sized> Keyed for Box<K> {
    #[inline]
    fn key(&self) -> i64 {
        (**self).key()
    }
}

impl<K: Keyed + ?Sized> Keyed for Arc<K> {
    #[inline]
    fn key(&self) -> i64 {
        (**self).key()
    }
}

impl<K: Keyed + ?Sized> Keyed for Rc<K> {
    #[inline]
    fn key(&self) -> i64 {
        (**self).key()
    }
}

/// Keys a value by its hash.
///
/// Lets any `Hash` type live in a set. The key is the 64-bit output of a
/// fixed-seed hasher, stable for the lifetime of the process. Hash collisions
/// are treated as identity: of two colliding values only the first one added
/// is a member.
///
/// # Example
///
/// ```rust
/// use chainset_core::data_structures::{HandOverHandSet, Hashed};
///
/// let set: HandOverHandSet<Hashed<String>> = HandOverHandSet::new();
/// assert!(set.add(Hashed("kiwi".to_string())));
/// assert!(set.contains(&Hashed("kiwi".to_string())));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hashed<T>(pub T);

impl<T> Hashed<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Hashed<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: Hash> Keyed for Hashed<T> {
    fn key(&self) -> i64 {
        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish() as i64
    }
}
