//! # ordtree
//!
//! Ordered set backed by a red-black tree.
//!
//! ## Architecture
//!
//! - **Tree**: [`OrderedTree`], a red-black tree over a slab node arena
//! - **Handles**: [`NodeRef`], borrowed navigation over parent/child links
//! - **Errors**: [`InvariantViolation`], reported by [`OrderedTree::validate`]
//!
//! ## Design Principles
//!
//! 1. **Sentinel links**: absent children and the root's parent all point at
//!    one reserved black node, so rebalancing never branches on "no node"
//! 2. **Arena ownership**: the slab owns every node; links are plain keys
//! 3. **Iterative algorithms**: lookups, fixups and traversals are loops
//! 4. **Synchronous, single-owner**: mutation takes `&mut self`; share across
//!    threads behind your own lock
//!
//! ## Guarantees
//!
//! - insert / remove / find: O(log n)
//! - at most 2 rotations per insert, 3 per remove
//! - height at most 2·log2(n + 1)
//!
//! ## Logging
//!
//! Rotations and fixup cases are reported at `trace` level through the
//! [`log`] facade. The library never installs a logger.

// ============================================================================
// Module declarations
// ============================================================================

/// Invariant violation error type
pub mod error;

/// Red-black tree: nodes, handles, iterators
pub mod tree;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::InvariantViolation;
pub use tree::{Color, Direction, IntoIter, Iter, NodeRef, OrderedTree};
