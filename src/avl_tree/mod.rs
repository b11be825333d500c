//! Self-balancing binary search tree where the heights of the two child subtrees of any vertex
//! differ by at most one.

mod node;
mod tree;

pub use self::node::Height;
pub use self::tree::AvlTree;
