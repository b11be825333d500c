//! Ordered binary search trees with parent links.
//!
//! Every tree in this crate keeps the ordered-tree invariant: each element in the left subtree of
//! a vertex compares less than or equal to the element of the vertex, and each element in its
//! right subtree compares greater. Equal elements are placed to the left.
//!
//! `OrderedTree` is the plain, unbalanced variant. It is the only one that lets callers rotate
//! it directly; the self-balancing variants perform their own rotations and reject external ones.

mod iter;
mod node;
mod ordered_tree;
mod tree;
mod vertex;

pub use self::iter::{IntoIter, Iter};
pub use self::node::Augment;
pub use self::ordered_tree::OrderedTree;
pub use self::tree::Tree;
pub use self::vertex::VertexRef;
pub use crate::arena::VertexId;

pub(crate) use self::tree::Side;

use crate::error::Result;

/// The interface shared by every tree in this crate.
///
/// Mutating operations are implemented by each tree type; inspection and traversal are provided
/// on top of the read-only view returned by `as_tree`.
pub trait BinaryTree<T>
where
    T: Ord,
{
    /// The balancing metadata stored in each vertex.
    type Augment: Augment;

    /// Returns a read-only view of the underlying tree.
    fn as_tree(&self) -> &Tree<T, Self::Augment>;

    /// Inserts an element. Equal elements are allowed and are placed to the left of each other.
    fn insert(&mut self, element: T);

    /// Deletes the first occurrence of `element` on its search path and returns it. Returns
    /// `None` and leaves the tree untouched if the element is absent.
    fn delete(&mut self, element: &T) -> Option<T>;

    /// Rotates the tree to the left around `vertex`, lifting its right child into its place.
    fn rotate_left(&mut self, vertex: VertexId) -> Result<()>;

    /// Rotates the tree to the right around `vertex`, lifting its left child into its place.
    fn rotate_right(&mut self, vertex: VertexId) -> Result<()>;

    /// Removes every element of the tree.
    fn clear(&mut self);

    /// Returns the number of elements in the tree.
    fn len(&self) -> usize {
        self.as_tree().len()
    }

    /// Returns `true` if the tree contains no elements.
    fn is_empty(&self) -> bool {
        self.as_tree().is_empty()
    }

    /// Returns the height of the tree, or -1 if it is empty.
    fn height(&self) -> i32 {
        self.as_tree().height()
    }

    /// Returns the root vertex, or `Error::NotFound` if the tree is empty.
    fn root<'a>(&'a self) -> Result<VertexRef<'a, T, Self::Augment>>
    where
        T: 'a,
        Self::Augment: 'a,
    {
        self.as_tree().root()
    }

    /// Resolves a vertex handle, or returns `Error::InvalidArgument` if it is stale.
    fn vertex<'a>(&'a self, id: VertexId) -> Result<VertexRef<'a, T, Self::Augment>>
    where
        T: 'a,
        Self::Augment: 'a,
    {
        self.as_tree().vertex(id)
    }

    /// Returns the vertex created by the most recent insertion. Only meaningful immediately
    /// after `insert`; any other mutation invalidates it.
    fn last_inserted<'a>(&'a self) -> Result<VertexRef<'a, T, Self::Augment>>
    where
        T: 'a,
        Self::Augment: 'a,
    {
        self.as_tree().last_inserted()
    }

    /// Returns the first vertex holding `element` on its search path.
    fn search<'a>(&'a self, element: &T) -> Option<VertexRef<'a, T, Self::Augment>>
    where
        T: 'a,
        Self::Augment: 'a,
    {
        self.as_tree().search(element)
    }

    /// Returns `true` if the tree contains `element`.
    fn contains(&self, element: &T) -> bool {
        self.as_tree().contains(element)
    }

    /// Applies `action` to every vertex in pre-order.
    fn pre_order<'a, F>(&'a self, action: F)
    where
        T: 'a,
        Self::Augment: 'a,
        F: FnMut(VertexRef<'a, T, Self::Augment>),
    {
        self.as_tree().pre_order(action)
    }

    /// Applies `action` to every vertex in in-order, i.e. in ascending order of elements.
    fn in_order<'a, F>(&'a self, action: F)
    where
        T: 'a,
        Self::Augment: 'a,
        F: FnMut(VertexRef<'a, T, Self::Augment>),
    {
        self.as_tree().in_order(action)
    }

    /// Applies `action` to every vertex in post-order.
    fn post_order<'a, F>(&'a self, action: F)
    where
        T: 'a,
        Self::Augment: 'a,
        F: FnMut(VertexRef<'a, T, Self::Augment>),
    {
        self.as_tree().post_order(action)
    }

    /// Applies `action` to every vertex in level order, left to right within each level.
    fn level_order<'a, F>(&'a self, action: F)
    where
        T: 'a,
        Self::Augment: 'a,
        F: FnMut(VertexRef<'a, T, Self::Augment>),
    {
        self.as_tree().level_order(action)
    }

    /// Returns an iterator over the elements in ascending order.
    fn iter<'a>(&'a self) -> Iter<'a, T, Self::Augment>
    where
        T: 'a,
        Self::Augment: 'a,
    {
        self.as_tree().iter()
    }
}
