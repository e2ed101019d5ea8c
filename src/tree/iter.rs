//! Ordered iteration.
//!
//! [`Iter`] walks the tree in place: each step follows successor or
//! predecessor links, so no traversal buffer is built. Both ends move
//! toward each other and a remaining-count stops them when they meet.
//!
//! Iterators borrow the tree. Mutating the tree invalidates any iterator
//! over it, and the borrow checker refuses to compile code that would do
//! so while the iterator is still in use.

use std::iter::FusedIterator;

use crate::tree::node::{Direction, NIL};
use crate::OrderedTree;

/// Borrowing iterator over a tree in ascending order.
pub struct Iter<'a, T> {
    tree: &'a OrderedTree<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(
        tree: &'a OrderedTree<T>,
        front: usize,
        back: usize,
        remaining: usize,
    ) -> Self {
        debug_assert!(remaining == 0 || (front != NIL && back != NIL));
        Self {
            tree,
            front,
            back,
            remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let key = self.front;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.front = self.tree.step(key, Direction::Right);
        }
        Some(self.tree.value_at(key))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    #[inline]
    fn count(self) -> usize {
        self.remaining
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let key = self.back;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.back = self.tree.step(key, Direction::Left);
        }
        Some(self.tree.value_at(key))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over a tree in ascending order.
///
/// Each step removes the smallest (or, from the back, largest) element.
pub struct IntoIter<T: Ord> {
    tree: OrderedTree<T>,
}

impl<T: Ord> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.tree.pop_first()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<T: Ord> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.tree.pop_last()
    }
}

impl<T: Ord> ExactSizeIterator for IntoIter<T> {}

impl<T: Ord> FusedIterator for IntoIter<T> {}

// ============================================================================
// Conversions
// ============================================================================

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord> IntoIterator for OrderedTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { tree: self }
    }
}

impl<T: Ord> FromIterator<T> for OrderedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut tree = OrderedTree::with_capacity(iter.size_hint().0);
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for OrderedTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: Ord + Copy + 'a> Extend<&'a T> for OrderedTree<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}
