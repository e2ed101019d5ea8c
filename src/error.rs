//! Error types for ordtree.
//!
//! Inserting a duplicate or removing an absent value is not an error: those
//! are reported through `bool`/`Option` returns and leave the tree
//! unchanged. The only error type describes a broken red-black invariant,
//! which is always an implementation bug. It is produced by
//! [`OrderedTree::validate`](crate::OrderedTree::validate) so tests can
//! assert on it, never during normal operation.

use thiserror::Error;

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, InvariantViolation>;

/// A red-black tree invariant that does not hold.
///
/// Node identifiers are slab keys; they are only meaningful for the tree
/// instance that produced the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The sentinel was recolored, given a value or given children.
    #[error("sentinel node is corrupted")]
    SentinelCorrupted,

    /// The root of a non-empty tree is red.
    #[error("root node {root} is red")]
    RedRoot { root: usize },

    /// The root's parent link is not the sentinel.
    #[error("root node {root} has parent {parent}")]
    RootHasParent { root: usize, parent: usize },

    /// A child does not link back to the node that owns it.
    #[error("node {child} is a child of {parent} but links to parent {found}")]
    BrokenParentLink {
        parent: usize,
        child: usize,
        found: usize,
    },

    /// A red node has a red child.
    #[error("red node {node} has red child {child}")]
    AdjacentRed { node: usize, child: usize },

    /// Two root-to-sentinel paths disagree on their black-node count.
    #[error("black height mismatch at node {node}: expected {expected}, found {found}")]
    BlackHeightMismatch {
        node: usize,
        expected: usize,
        found: usize,
    },

    /// In-order traversal is not strictly ascending.
    #[error("node {node} is out of order with its in-order predecessor")]
    OrderViolation { node: usize },

    /// The recorded element count disagrees with the reachable node count.
    #[error("element count is {recorded} but {reachable} nodes are reachable")]
    CountMismatch { recorded: usize, reachable: usize },

    /// The arena holds nodes that are not reachable from the root.
    #[error("arena holds {allocated} nodes but only {reachable} are reachable")]
    LeakedNodes { allocated: usize, reachable: usize },
}
