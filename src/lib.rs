//! Ordered binary search trees with parent links.
//!
//! Three trees share one vertex arena and one set of structural primitives:
//!
//! - `OrderedTree`, an unbalanced tree that callers may rotate directly.
//! - `AvlTree`, which keeps the heights of sibling subtrees within one of each other.
//! - `RedBlackTree`, which keeps every root-to-leaf path within a factor of two of the others.
//!
//! All of them implement `BinaryTree`, which exposes search, traversal and navigation through
//! read-only `VertexRef` views.
//!
//! # Examples
//!
//! ```
//! use balanced_trees::{AvlTree, BinaryTree, OrderedTree};
//!
//! let plain: OrderedTree<u32> = (1..=7).collect();
//! let balanced: AvlTree<u32> = (1..=7).collect();
//!
//! assert_eq!(plain.height(), 6);
//! assert_eq!(balanced.height(), 2);
//! assert!(plain.iter().eq(balanced.iter()));
//! ```

#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;

#[macro_use]
mod macros;

pub mod arena;
pub mod avl_tree;
pub mod bst;
pub mod error;
pub mod red_black_tree;

pub use crate::avl_tree::{AvlTree, Height};
pub use crate::bst::{BinaryTree, OrderedTree, VertexId, VertexRef};
pub use crate::error::{Error, Result};
pub use crate::red_black_tree::{Color, RedBlackTree};
