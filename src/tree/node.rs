//! Tree node for slab-based storage.
//!
//! ## Design
//!
//! `TreeNode` wraps a value with its color and the three navigational links
//! of a red-black tree. Links are slab keys (`usize`), not references, so the
//! same node can be reached from its parent, both children and the tree root
//! without aliasing borrows.
//!
//! ## Sentinel
//!
//! Slot [`NIL`] of every tree's slab holds the sentinel: a valueless,
//! always-black node that stands in for every absent child and for the
//! root's parent. Because every link is a valid key, rotation and fixup code
//! can read colors and links without checking for "no node" first.
//!
//! ```text
//!            root (B)
//!           /        \
//!        a (R)       NIL
//!       /    \
//!     NIL    NIL          root.parent == NIL
//! ```

/// Slab key of the sentinel node.
///
/// The sentinel is inserted first into an empty slab and never removed,
/// so this key is never handed out to a real node.
pub const NIL: usize = 0;

/// Node color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Freshly inserted nodes are red
    Red,
    /// The sentinel and the root are always black
    #[default]
    Black,
}

impl Color {
    #[inline]
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    #[inline]
    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

/// Which child slot of its parent a node occupies.
///
/// Rebalancing is written once per case and parameterized by direction;
/// the mirror-image case is the same code with [`Direction::opposite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Returns the other side
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Node stored in the slab.
///
/// ## Memory Layout
///
/// ```text
/// TreeNode<T> {
///     value: Option<T>   (None only for the sentinel)
///     color: Color
///     parent: usize      (slab key, NIL for the root)
///     left: usize        (slab key, NIL if absent)
///     right: usize       (slab key, NIL if absent)
/// }
/// ```
#[derive(Debug, Clone)]
pub(crate) struct TreeNode<T> {
    pub(crate) value: Option<T>,
    pub(crate) color: Color,
    pub(crate) parent: usize,
    pub(crate) left: usize,
    pub(crate) right: usize,
}

impl<T> TreeNode<T> {
    /// Create the sentinel: black, valueless, every link pointing at itself.
    pub(crate) fn sentinel() -> Self {
        Self {
            value: None,
            color: Color::Black,
            parent: NIL,
            left: NIL,
            right: NIL,
        }
    }

    /// Create a new red leaf under `parent`
    pub(crate) fn new(value: T, parent: usize) -> Self {
        Self {
            value: Some(value),
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        }
    }

    #[inline]
    pub(crate) fn child(&self, dir: Direction) -> usize {
        match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, dir: Direction, key: usize) {
        match dir {
            Direction::Left => self.left = key,
            Direction::Right => self.right = key,
        }
    }

    /// Check if this node has no real children
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left == NIL && self.right == NIL
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
