//! Navigational handle into a tree.
//!
//! A [`NodeRef`] is a borrowed `(tree, slab key)` pair. It never refers to
//! the sentinel: every query that would land on the sentinel returns `None`
//! instead. The family queries (`sibling`, `uncle`, `grandparent`,
//! `direction`) are the ones rebalancing reasons about, exposed for callers
//! building their own traversals.

use std::fmt;

use crate::tree::node::{Color, Direction, NIL};
use crate::OrderedTree;

/// Borrowed handle to a real node.
///
/// Holding a handle keeps the tree immutably borrowed, so the node it
/// names cannot be removed or moved out from under it.
pub struct NodeRef<'a, T> {
    tree: &'a OrderedTree<T>,
    key: usize,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    /// Two handles are equal when they name the same node of the same tree
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.key == other.key
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("value", self.value())
            .field("color", &self.color())
            .finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    /// Wrap `key`, mapping the sentinel to `None`
    #[inline]
    pub(crate) fn new(tree: &'a OrderedTree<T>, key: usize) -> Option<Self> {
        if key == NIL {
            None
        } else {
            Some(Self { tree, key })
        }
    }

    /// The stored element
    #[inline]
    pub fn value(&self) -> &'a T {
        self.tree.value_at(self.key)
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.tree.color_of(self.key)
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color().is_red()
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color().is_black()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.tree.parent_of(self.key) == NIL
    }

    // ========================================================================
    // Family
    // ========================================================================

    #[inline]
    pub fn parent(&self) -> Option<Self> {
        Self::new(self.tree, self.tree.parent_of(self.key))
    }

    #[inline]
    pub fn left(&self) -> Option<Self> {
        Self::new(self.tree, self.tree.left_of(self.key))
    }

    #[inline]
    pub fn right(&self) -> Option<Self> {
        Self::new(self.tree, self.tree.right_of(self.key))
    }

    /// Child on the given side
    #[inline]
    pub fn child(&self, dir: Direction) -> Option<Self> {
        Self::new(self.tree, self.tree.child_of(self.key, dir))
    }

    /// Side of the parent this node hangs from, `None` for the root
    pub fn direction(&self) -> Option<Direction> {
        if self.is_root() {
            None
        } else {
            Some(self.tree.direction_of(self.key))
        }
    }

    /// The parent's other child
    pub fn sibling(&self) -> Option<Self> {
        let dir = self.direction()?;
        let parent = self.tree.parent_of(self.key);
        Self::new(self.tree, self.tree.child_of(parent, dir.opposite()))
    }

    #[inline]
    pub fn grandparent(&self) -> Option<Self> {
        self.parent()?.parent()
    }

    /// The parent's sibling
    #[inline]
    pub fn uncle(&self) -> Option<Self> {
        self.parent()?.sibling()
    }

    // ========================================================================
    // In-order stepping
    // ========================================================================

    /// Node holding the next larger element
    #[inline]
    pub fn next(&self) -> Option<Self> {
        Self::new(self.tree, self.tree.step(self.key, Direction::Right))
    }

    /// Node holding the next smaller element
    #[inline]
    pub fn prev(&self) -> Option<Self> {
        Self::new(self.tree, self.tree.step(self.key, Direction::Left))
    }
}
