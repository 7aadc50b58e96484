use std::iter::FusedIterator;
use std::vec;

/// Snapshot iterator over a [`ConcurrentOrderedSet`].
///
/// Holds clones of the members taken by one traversal, in ascending key
/// order. It never touches the set again, so it neither blocks writers nor
/// observes changes made after it was created. Not restartable: call
/// `iter()` again for a fresh snapshot.
///
/// [`ConcurrentOrderedSet`]: super::ConcurrentOrderedSet
///
#[derive(Debug, Clone)]
pub struct Iter<T> {
    inner: vec::IntoIter<T>,
}

impl<T> Iter<T> {
    pub(crate) fn new(values: Vec<T>) -> Self {
        Iter {
            inner: values.into_iter(),
        }
    }
}

impl<T> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<T> {}

impl<T> FusedIterator for Iter<T> {}
