//! Red-black tree module.
//!
//! ## Architecture
//!
//! The tree is an arena of nodes linked by slab keys:
//!
//! - **Slab-based storage**: every node lives in one `Slab`, links are keys
//! - **Sentinel**: slot `0` is a shared black placeholder for absent links
//! - **Direction-parameterized rebalancing**: each fixup case is written once
//!   and mirrored through [`Direction::opposite`]
//!
//! ## Components
//!
//! - [`OrderedTree`]: the ordered set, owner of every node
//! - [`NodeRef`]: borrowed handle for navigating parent/sibling/uncle links
//! - [`Iter`] / [`IntoIter`]: double-ended ascending iteration
//! - [`Color`] / [`Direction`]: node color and child side
//!
//! ## Example
//!
//! ```
//! use ordtree::tree::{Direction, OrderedTree};
//!
//! let tree: OrderedTree<u32> = [10, 20, 15, 5, 25].into_iter().collect();
//!
//! let node = tree.find(&25).unwrap();
//! assert_eq!(node.direction(), Some(Direction::Right));
//! assert_eq!(node.prev().map(|n| *n.value()), Some(20));
//! ```

pub mod handle;
pub mod iter;
pub mod node;
pub mod ordered;

pub use handle::NodeRef;
pub use iter::{IntoIter, Iter};
pub use node::{Color, Direction};
pub use ordered::OrderedTree;
