use crate::arena::VertexId;
use crate::bst::tree::{Side, Tree};
use crate::bst::BinaryTree;
use crate::error::{Error, Result};

/// An unbalanced ordered binary search tree.
///
/// Insertions attach a new leaf and deletions splice a vertex out, so the shape of the tree
/// depends on the order of operations and its height can grow linearly with its size. Callers
/// may restructure it with `rotate_left` and `rotate_right`.
///
/// # Examples
///
/// ```
/// use balanced_trees::{BinaryTree, OrderedTree};
///
/// let mut tree = OrderedTree::new();
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(3);
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.root().unwrap().element(), &2);
/// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
///
/// let root = tree.root().unwrap().id();
/// tree.rotate_right(root).unwrap();
/// assert_eq!(tree.root().unwrap().element(), &1);
///
/// assert_eq!(tree.delete(&1), Some(1));
/// assert_eq!(tree.delete(&1), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderedTree<T> {
    tree: Tree<T, ()>,
}

impl_tree_common!(OrderedTree, ());

impl<T> OrderedTree<T>
where
    T: Ord,
{
    fn check_vertex(&self, vertex: VertexId) -> Result<()> {
        if self.tree.contains_vertex(vertex) {
            Ok(())
        } else {
            Err(Error::InvalidArgument("vertex is not part of the tree"))
        }
    }
}

impl<T> BinaryTree<T> for OrderedTree<T>
where
    T: Ord,
{
    type Augment = ();

    fn as_tree(&self) -> &Tree<T, ()> {
        &self.tree
    }

    fn insert(&mut self, element: T) {
        self.tree.insert_leaf(element);
    }

    fn delete(&mut self, element: &T) -> Option<T> {
        let target = self.tree.find(element)?;
        let spliced = self.tree.deletable(target);
        self.tree.splice(spliced);
        Some(self.tree.release(spliced, target))
    }

    /// Rotates the tree to the left around `vertex`. Does nothing if `vertex` has no right child.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `vertex` is not part of the tree.
    fn rotate_left(&mut self, vertex: VertexId) -> Result<()> {
        self.check_vertex(vertex)?;
        self.tree.rotate(vertex, Side::Left);
        Ok(())
    }

    /// Rotates the tree to the right around `vertex`. Does nothing if `vertex` has no left child.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `vertex` is not part of the tree.
    fn rotate_right(&mut self, vertex: VertexId) -> Result<()> {
        self.check_vertex(vertex)?;
        self.tree.rotate(vertex, Side::Right);
        Ok(())
    }

    fn clear(&mut self) {
        self.tree.clear();
    }
}
