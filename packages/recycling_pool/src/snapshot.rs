use std::iter::FusedIterator;
use std::slice;

use crate::Key;
use crate::pool::Slot;

/// A live, read-only view of the active set of a [`Pool`][crate::Pool].
///
/// Returned by [`Pool::active_snapshot()`][crate::Pool::active_snapshot]. The view is not a
/// copy: it borrows the pool's internal bookkeeping directly, which also means it cannot outlive
/// the next call that modifies the pool.
///
/// Instances are listed in the order they were handed out.
#[derive(Debug)]
pub struct ActiveSnapshot<'p, T> {
    keys: &'p [Key],
    slots: &'p [Slot<T>],
}

impl<'p, T> ActiveSnapshot<'p, T> {
    pub(crate) fn new(keys: &'p [Key], slots: &'p [Slot<T>]) -> Self {
        Self { keys, slots }
    }

    /// The number of active instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no instance is currently active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The keys of all active instances.
    #[must_use]
    pub fn keys(&self) -> &'p [Key] {
        self.keys
    }

    /// Iterates over the active instances together with their keys.
    #[must_use]
    pub fn iter(&self) -> ActiveIter<'p, T> {
        ActiveIter {
            keys: self.keys.iter(),
            slots: self.slots,
        }
    }
}

impl<T> Clone for ActiveSnapshot<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ActiveSnapshot<'_, T> {}

impl<'p, T> IntoIterator for ActiveSnapshot<'p, T> {
    type Item = (Key, &'p T);
    type IntoIter = ActiveIter<'p, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'p, T> IntoIterator for &ActiveSnapshot<'p, T> {
    type Item = (Key, &'p T);
    type IntoIter = ActiveIter<'p, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the active instances of a [`Pool`][crate::Pool].
///
/// Created by [`ActiveSnapshot::iter()`].
#[derive(Debug)]
pub struct ActiveIter<'p, T> {
    keys: slice::Iter<'p, Key>,
    slots: &'p [Slot<T>],
}

impl<'p, T> ActiveIter<'p, T> {
    fn resolve(&self, key: Key) -> (Key, &'p T) {
        let slot = self
            .slots
            .get(key.index())
            .expect("the active set only refers to slots that exist");

        (key, &slot.item)
    }
}

impl<'p, T> Iterator for ActiveIter<'p, T> {
    type Item = (Key, &'p T);

    fn next(&mut self) -> Option<Self::Item> {
        let key = *self.keys.next()?;
        Some(self.resolve(key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<T> DoubleEndedIterator for ActiveIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = *self.keys.next_back()?;
        Some(self.resolve(key))
    }
}

impl<T> ExactSizeIterator for ActiveIter<'_, T> {}

impl<T> FusedIterator for ActiveIter<'_, T> {}
