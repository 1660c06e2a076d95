//! Growable swap-remove store
//!
//! Backs the entity, particle and star collections. Appends are amortised
//! O(1); removal is O(1) swap-remove and does not preserve order.
//!
//! Growth policy: when an append would exceed capacity, capacity grows by a
//! fixed increment equal to the initial capacity (linear, not doubling).
//! Allocation failure aborts through the global allocation-error handler.
//!
//! Indices are the only stable handle. A reference into the store must not be
//! held across an append, which the borrow checker enforces.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone)]
pub struct Store<T> {
    items: Vec<T>,
    increment: usize,
}

impl<T> Store<T> {
    /// Create a store with `initial` reserved slots. Growth steps use the same size.
    pub fn new(initial: usize) -> Self {
        let increment = initial.max(1);
        Self {
            items: Vec::with_capacity(increment),
            increment,
        }
    }

    /// Append a value and return its index
    pub fn append(&mut self, value: T) -> usize {
        if self.items.len() == self.items.capacity() {
            self.items.reserve_exact(self.increment);
        }
        self.items.push(value);
        self.items.len() - 1
    }

    /// Place `value` at `index`, relocating the previous occupant to the end.
    ///
    /// Membership is preserved, order is not. `index == len()` is a plain append.
    pub fn insert_at(&mut self, value: T, index: usize) {
        assert!(
            index <= self.items.len(),
            "insert index {index} out of bounds (len {})",
            self.items.len()
        );
        let last = self.append(value);
        self.items.swap(index, last);
    }

    /// Swap-remove: the last element moves into `index`.
    pub fn remove_at(&mut self, index: usize) -> T {
        self.items.swap_remove(index)
    }

    /// Drop all elements but keep the allocation
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    #[inline]
    pub fn increment(&self) -> usize {
        self.increment
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T> Extend<T> for Store<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> Index<usize> for Store<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for Store<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a Store<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
