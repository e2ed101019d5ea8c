//! Red-black tree ordered set.
//!
//! ## Architecture
//!
//! - **Slab**: Arena owning every node, addressed by `usize` keys
//! - **Sentinel**: Slot [`NIL`] stands in for every absent link
//! - **Root key**: Entry point for descent, `NIL` when empty
//!
//! ## Invariants
//!
//! After every public operation returns:
//!
//! 1. In-order traversal is strictly ascending
//! 2. The root is black (or the tree is empty)
//! 3. The sentinel is black, valueless and childless
//! 4. No red node has a red child
//! 5. Every root-to-sentinel path has the same number of black nodes
//! 6. `len()` equals the number of real nodes in the arena
//!
//! [`OrderedTree::validate`] checks all of them.
//!
//! ## Complexity
//!
//! | Operation | Complexity | Rotations |
//! |-----------|------------|-----------|
//! | insert | O(log n) | at most 2 |
//! | remove | O(log n) | at most 3 |
//! | find | O(log n) | - |
//! | first / last | O(log n) | - |
//! | iterator step | O(1) amortized | - |
//!
//! ## Example
//!
//! ```
//! use ordtree::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//! for value in [10, 20, 15, 5, 25] {
//!     assert!(tree.insert(value));
//! }
//!
//! assert!(!tree.insert(15));
//! assert!(tree.remove(&10));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![5, 15, 20, 25]);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};
use slab::Slab;

use crate::error::{InvariantViolation, Result};
use crate::tree::iter::Iter;
use crate::tree::node::{Color, Direction, TreeNode, NIL};
use crate::tree::NodeRef;

/// Ordered set backed by a red-black tree.
///
/// Elements are unique under `T`'s `Ord`. Nodes live in a slab whose slot
/// `0` is the sentinel, so links never need an `Option`.
///
/// Iterators and [`NodeRef`] handles borrow the tree, so any mutation
/// while one is alive is rejected at compile time. Keys held past a
/// mutation would be stale; the borrow is what keeps them from existing.
#[derive(Clone)]
pub struct OrderedTree<T> {
    /// Node arena. Slot `NIL` holds the sentinel.
    nodes: Slab<TreeNode<T>>,

    /// Root key, `NIL` when empty
    root: usize,

    /// Number of real nodes
    len: usize,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedTree<T> {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a tree with room for `capacity` elements before the arena
    /// reallocates
    ///
    /// # Example
    ///
    /// ```
    /// use ordtree::OrderedTree;
    ///
    /// let tree: OrderedTree<u64> = OrderedTree::with_capacity(1_000);
    /// assert!(tree.capacity() >= 1_000);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Slab::with_capacity(capacity.saturating_add(1));
        let nil = nodes.insert(TreeNode::sentinel());
        debug_assert_eq!(nil, NIL);

        Self {
            nodes,
            root: NIL,
            len: 0,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Number of elements in the tree
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the arena holds without reallocating
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity().saturating_sub(1)
    }

    /// Number of nodes on the longest root-to-leaf path, 0 when empty
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = Vec::new();
        if self.root != NIL {
            stack.push((self.root, 1));
        }

        while let Some((key, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(key);
            for child in [node.left, node.right] {
                if child != NIL {
                    stack.push((child, depth + 1));
                }
            }
        }

        height
    }

    /// Number of black nodes on any root-to-sentinel path, not counting the
    /// sentinel
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut key = self.root;
        while key != NIL {
            if self.color_of(key).is_black() {
                count += 1;
            }
            key = self.left_of(key);
        }
        count
    }

    // ========================================================================
    // Ordered Access
    // ========================================================================

    /// Ascending iterator over the elements
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(
            self,
            self.extreme(self.root, Direction::Left),
            self.extreme(self.root, Direction::Right),
            self.len,
        )
    }

    /// Smallest element
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.first_node().map(|node| node.value())
    }

    /// Largest element
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.last_node().map(|node| node.value())
    }

    /// Handle to the smallest element's node
    pub fn first_node(&self) -> Option<NodeRef<'_, T>> {
        NodeRef::new(self, self.extreme(self.root, Direction::Left))
    }

    /// Handle to the largest element's node
    pub fn last_node(&self) -> Option<NodeRef<'_, T>> {
        NodeRef::new(self, self.extreme(self.root, Direction::Right))
    }

    /// Handle to the root node
    pub fn root_node(&self) -> Option<NodeRef<'_, T>> {
        NodeRef::new(self, self.root)
    }

    // ========================================================================
    // Node Access (shared with handles and iterators)
    // ========================================================================

    #[inline]
    fn node(&self, key: usize) -> &TreeNode<T> {
        &self.nodes[key]
    }

    #[inline]
    fn node_mut(&mut self, key: usize) -> &mut TreeNode<T> {
        &mut self.nodes[key]
    }

    /// Value of a real node
    ///
    /// # Panics
    ///
    /// Panics if `key` is the sentinel
    #[inline]
    pub(crate) fn value_at(&self, key: usize) -> &T {
        self.node(key)
            .value
            .as_ref()
            .expect("sentinel holds no value")
    }

    #[inline]
    pub(crate) fn color_of(&self, key: usize) -> Color {
        self.node(key).color
    }

    #[inline]
    fn set_color(&mut self, key: usize, color: Color) {
        self.node_mut(key).color = color;
    }

    #[inline]
    pub(crate) fn parent_of(&self, key: usize) -> usize {
        self.node(key).parent
    }

    #[inline]
    pub(crate) fn left_of(&self, key: usize) -> usize {
        self.node(key).left
    }

    #[inline]
    pub(crate) fn right_of(&self, key: usize) -> usize {
        self.node(key).right
    }

    #[inline]
    pub(crate) fn child_of(&self, key: usize, dir: Direction) -> usize {
        self.node(key).child(dir)
    }

    /// Side of its parent that `key` hangs from. Only meaningful for
    /// non-root nodes.
    #[inline]
    pub(crate) fn direction_of(&self, key: usize) -> Direction {
        if self.left_of(self.parent_of(key)) == key {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Outermost node of the subtree at `key` in direction `dir`
    /// (minimum for `Left`, maximum for `Right`). `NIL` for an empty subtree.
    pub(crate) fn extreme(&self, mut key: usize, dir: Direction) -> usize {
        if key == NIL {
            return NIL;
        }
        while self.child_of(key, dir) != NIL {
            key = self.child_of(key, dir);
        }
        key
    }

    /// In-order neighbor of `key`: successor for `Right`, predecessor for
    /// `Left`. `NIL` past either end.
    pub(crate) fn step(&self, key: usize, dir: Direction) -> usize {
        let child = self.child_of(key, dir);
        if child != NIL {
            return self.extreme(child, dir.opposite());
        }

        // Climb while we are on the `dir` side; the first ancestor reached
        // from the other side is the neighbor.
        let mut key = key;
        let mut parent = self.parent_of(key);
        while parent != NIL && key == self.child_of(parent, dir) {
            key = parent;
            parent = self.parent_of(parent);
        }
        parent
    }

    // ========================================================================
    // Structural Primitives
    // ========================================================================

    /// Rotate `pivot` down toward `dir`; its child on the opposite side
    /// takes its place.
    ///
    /// ```text
    ///   rotate(x, Left)          rotate(y, Right)
    ///
    ///     x              y              y            x
    ///    / \            / \            / \          / \
    ///   a   y    =>    x   c          x   c   =>   a   y
    ///      / \        / \            / \              / \
    ///     b   c      a   b          a   b            b   c
    /// ```
    fn rotate(&mut self, pivot: usize, dir: Direction) {
        let other = dir.opposite();
        let lifted = self.child_of(pivot, other);
        let inner = self.child_of(lifted, dir);

        self.node_mut(pivot).set_child(other, inner);
        if inner != NIL {
            self.node_mut(inner).parent = pivot;
        }

        let parent = self.parent_of(pivot);
        self.node_mut(lifted).parent = parent;
        if parent == NIL {
            self.root = lifted;
        } else {
            let side = self.direction_of(pivot);
            self.node_mut(parent).set_child(side, lifted);
        }

        self.node_mut(lifted).set_child(dir, pivot);
        self.node_mut(pivot).parent = lifted;

        trace!("rotate {:?} at {}: {} lifted", dir, pivot, lifted);
    }

    /// Put the subtree at `replacement` in `target`'s slot.
    ///
    /// Only the parent side is rewired; `target`'s own links and both
    /// colors are untouched. `replacement` may be the sentinel, in which
    /// case the sentinel's parent is set so the removal fixup can climb
    /// from it.
    fn transplant(&mut self, target: usize, replacement: usize) {
        let parent = self.parent_of(target);
        if parent == NIL {
            self.root = replacement;
        } else {
            let side = self.direction_of(target);
            self.node_mut(parent).set_child(side, replacement);
        }
        self.node_mut(replacement).parent = parent;
    }

    // ========================================================================
    // Rebalancing
    // ========================================================================

    /// Restore the red-black properties after attaching red leaf `node`.
    fn insert_fixup(&mut self, mut node: usize) {
        while self.color_of(self.parent_of(node)).is_red() {
            // A red parent is never the root, so the grandparent is real
            let parent = self.parent_of(node);
            let grandparent = self.parent_of(parent);
            let side = self.direction_of(parent);
            let uncle = self.child_of(grandparent, side.opposite());

            if self.color_of(uncle).is_red() {
                trace!("insert fixup case 1 at {}: recolor, move up to {}", node, grandparent);
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            if node == self.child_of(parent, side.opposite()) {
                trace!("insert fixup case 2 at {}: inner grandchild", node);
                node = parent;
                self.rotate(node, side);
            }

            trace!("insert fixup case 3 at {}", node);
            let parent = self.parent_of(node);
            let grandparent = self.parent_of(parent);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Restore the red-black properties after a black node was spliced out
    /// above `node`, which carries an extra black.
    fn remove_fixup(&mut self, mut node: usize) {
        while node != self.root && self.color_of(node).is_black() {
            let parent = self.parent_of(node);
            // `node` may be the sentinel; its sibling is always real, so
            // comparing against the left slot still finds the right side.
            let dir = if node == self.left_of(parent) {
                Direction::Left
            } else {
                Direction::Right
            };
            let far = dir.opposite();
            let mut sibling = self.child_of(parent, far);

            if self.color_of(sibling).is_red() {
                trace!("remove fixup case 1 at {}: red sibling {}", node, sibling);
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, dir);
                sibling = self.child_of(parent, far);
            }

            let near_child = self.child_of(sibling, dir);
            let far_child = self.child_of(sibling, far);
            if self.color_of(near_child).is_black() && self.color_of(far_child).is_black() {
                trace!("remove fixup case 2 at {}: move up to {}", node, parent);
                self.set_color(sibling, Color::Red);
                node = parent;
                continue;
            }

            if self.color_of(far_child).is_black() {
                trace!("remove fixup case 3 at {}: near nephew {} red", node, near_child);
                self.set_color(near_child, Color::Black);
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, far);
                sibling = self.child_of(parent, far);
            }

            trace!("remove fixup case 4 at {}", node);
            let parent_color = self.color_of(parent);
            let far_child = self.child_of(sibling, far);
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            self.set_color(far_child, Color::Black);
            self.rotate(parent, dir);
            node = self.root;
        }

        self.set_color(node, Color::Black);
    }

    /// Unlink the real node `target`, rebalance and free its slot.
    fn remove_node(&mut self, target: usize) -> T {
        // Color of the node that physically leaves its position. In the
        // two-children case that is the successor, not `target`.
        let mut spliced_color = self.color_of(target);
        let vacated;

        if self.left_of(target) == NIL {
            vacated = self.right_of(target);
            self.transplant(target, vacated);
        } else if self.right_of(target) == NIL {
            vacated = self.left_of(target);
            self.transplant(target, vacated);
        } else {
            let successor = self.extreme(self.right_of(target), Direction::Left);
            spliced_color = self.color_of(successor);
            vacated = self.right_of(successor);

            if self.parent_of(successor) == target {
                self.node_mut(vacated).parent = successor;
            } else {
                self.transplant(successor, vacated);
                let right = self.right_of(target);
                self.node_mut(successor).right = right;
                self.node_mut(right).parent = successor;
            }

            self.transplant(target, successor);
            let left = self.left_of(target);
            self.node_mut(successor).left = left;
            self.node_mut(left).parent = successor;
            let color = self.color_of(target);
            self.set_color(successor, color);
        }

        if spliced_color.is_black() {
            self.remove_fixup(vacated);
        }

        self.node_mut(NIL).parent = NIL;
        self.len -= 1;

        self.nodes
            .remove(target)
            .value
            .expect("real node holds a value")
    }
}

impl<T: Ord> OrderedTree<T> {
    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert a value
    ///
    /// # Returns
    ///
    /// `true` if the value was added, `false` if an equal value is already
    /// present (the tree is left unchanged)
    ///
    /// # Example
    ///
    /// ```
    /// use ordtree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert!(tree.insert(7));
    /// assert!(!tree.insert(7));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let mut parent = NIL;
        let mut side = Direction::Left;
        let mut cursor = self.root;

        while cursor != NIL {
            parent = cursor;
            side = match value.cmp(self.value_at(cursor)) {
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
                Ordering::Equal => return false,
            };
            cursor = self.child_of(cursor, side);
        }

        let key = self.nodes.insert(TreeNode::new(value, parent));
        if parent == NIL {
            self.root = key;
        } else {
            self.node_mut(parent).set_child(side, key);
        }
        self.len += 1;

        self.insert_fixup(key);
        self.check_invariants();
        true
    }

    /// Remove a value
    ///
    /// # Returns
    ///
    /// `true` if the value was present, `false` otherwise (no-op)
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Remove a value and return it
    ///
    /// # Example
    ///
    /// ```
    /// use ordtree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
    /// assert_eq!(tree.take("a"), Some("a".to_string()));
    /// assert_eq!(tree.take("a"), None);
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let key = self.find_key(value);
        if key == NIL {
            return None;
        }

        let removed = self.remove_node(key);
        self.check_invariants();
        Some(removed)
    }

    /// Remove and return the smallest element
    pub fn pop_first(&mut self) -> Option<T> {
        let key = self.extreme(self.root, Direction::Left);
        if key == NIL {
            return None;
        }

        let removed = self.remove_node(key);
        self.check_invariants();
        Some(removed)
    }

    /// Remove and return the largest element
    pub fn pop_last(&mut self) -> Option<T> {
        let key = self.extreme(self.root, Direction::Right);
        if key == NIL {
            return None;
        }

        let removed = self.remove_node(key);
        self.check_invariants();
        Some(removed)
    }

    /// Remove every element
    ///
    /// Removes the root until the tree is empty; the sentinel survives.
    pub fn clear(&mut self) {
        debug!("clearing tree of {} elements", self.len);
        while self.len > 0 {
            let root = self.root;
            self.remove_node(root);
        }
        self.check_invariants();
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Find the node holding `value`
    ///
    /// # Example
    ///
    /// ```
    /// use ordtree::OrderedTree;
    ///
    /// let tree: OrderedTree<i32> = (1..=3).collect();
    /// let node = tree.find(&2).unwrap();
    ///
    /// assert!(node.is_root());
    /// assert_eq!(node.left().map(|n| *n.value()), Some(1));
    /// assert!(tree.find(&9).is_none());
    /// ```
    pub fn find<Q>(&self, value: &Q) -> Option<NodeRef<'_, T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        NodeRef::new(self, self.find_key(value))
    }

    /// Get the stored element equal to `value`
    #[inline]
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).map(|node| node.value())
    }

    /// Check if an element equal to `value` is present
    #[inline]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_key(value) != NIL
    }

    fn find_key<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = self.root;
        while cursor != NIL {
            cursor = match value.cmp(self.value_at(cursor).borrow()) {
                Ordering::Less => self.left_of(cursor),
                Ordering::Greater => self.right_of(cursor),
                Ordering::Equal => return cursor,
            };
        }
        NIL
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check every red-black invariant
    ///
    /// Runs in O(n). A failure is always a bug in this crate.
    ///
    /// # Example
    ///
    /// ```
    /// use ordtree::OrderedTree;
    ///
    /// let tree: OrderedTree<u32> = (0..100).collect();
    /// assert!(tree.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let nil = self.node(NIL);
        if nil.value.is_some() || nil.color.is_red() || !nil.is_leaf() || nil.parent != NIL {
            return Err(InvariantViolation::SentinelCorrupted);
        }

        if self.root != NIL {
            if self.color_of(self.root).is_red() {
                return Err(InvariantViolation::RedRoot { root: self.root });
            }
            let parent = self.parent_of(self.root);
            if parent != NIL {
                return Err(InvariantViolation::RootHasParent {
                    root: self.root,
                    parent,
                });
            }
        }

        // Structure and color: (key, expected parent, black nodes above key)
        let mut reachable = 0;
        let mut path_blacks: Option<usize> = None;
        let mut stack = vec![(self.root, NIL, 0usize)];

        while let Some((key, parent, blacks)) = stack.pop() {
            if key == NIL {
                match path_blacks {
                    None => path_blacks = Some(blacks),
                    Some(expected) if expected != blacks => {
                        return Err(InvariantViolation::BlackHeightMismatch {
                            node: parent,
                            expected,
                            found: blacks,
                        });
                    }
                    Some(_) => {}
                }
                continue;
            }

            reachable += 1;
            if reachable > self.len {
                break;
            }

            let node = self.node(key);
            if node.parent != parent {
                return Err(InvariantViolation::BrokenParentLink {
                    parent,
                    child: key,
                    found: node.parent,
                });
            }
            if node.color.is_red() && self.color_of(parent).is_red() {
                return Err(InvariantViolation::AdjacentRed {
                    node: parent,
                    child: key,
                });
            }

            let blacks = blacks + usize::from(node.color.is_black());
            stack.push((node.right, key, blacks));
            stack.push((node.left, key, blacks));
        }

        if reachable != self.len {
            return Err(InvariantViolation::CountMismatch {
                recorded: self.len,
                reachable,
            });
        }
        let allocated = self.nodes.len() - 1;
        if allocated != reachable {
            return Err(InvariantViolation::LeakedNodes {
                allocated,
                reachable,
            });
        }

        // Order: each element strictly greater than its in-order predecessor
        let mut previous = self.extreme(self.root, Direction::Left);
        let mut current = if previous == NIL {
            NIL
        } else {
            self.step(previous, Direction::Right)
        };
        while current != NIL {
            if self.value_at(previous) >= self.value_at(current) {
                return Err(InvariantViolation::OrderViolation { node: current });
            }
            previous = current;
            current = self.step(current, Direction::Right);
        }

        Ok(())
    }

    /// Check the root and the sentinel after a mutation in debug builds, and
    /// run the full validation when built with `strict-invariants`
    #[inline]
    fn check_invariants(&self) {
        debug_assert!(self.color_of(self.root).is_black(), "root {} is red", self.root);
        debug_assert!(self.color_of(NIL).is_black(), "sentinel is red");
        debug_assert_eq!(self.parent_of(NIL), NIL, "sentinel has a parent");

        if cfg!(feature = "strict-invariants") {
            if let Err(err) = self.validate() {
                panic!("red-black invariant violated: {}", err);
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for OrderedTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for OrderedTree<T> {}

// ============================================================================
// Unit Tests
// ============================================================================
