use crate::arena::VertexId;
use crate::avl_tree::node::Height;
use crate::bst::{BinaryTree, Side, Tree};
use crate::error::{Error, Result};
use std::cmp;

/// An ordered tree implemented using an AVL tree.
///
/// An AVL tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of the two child subtrees of any vertex differ by at most one. After every insertion
/// and deletion the tree walks from the affected vertex up to the root, refreshing heights and
/// rotating wherever the invariant is broken.
///
/// # Examples
///
/// ```
/// use balanced_trees::{AvlTree, BinaryTree, Error};
///
/// let mut tree: AvlTree<u32> = vec![10, 20, 30, 40, 50].into_iter().collect();
///
/// assert_eq!(tree.height(), 2);
/// assert_eq!(tree.root().unwrap().element(), &20);
/// assert_eq!(tree.root().unwrap().balance(), -1);
///
/// let root = tree.root().unwrap().id();
/// match tree.rotate_left(root) {
///     Err(Error::UnsupportedOperation(_)) => {},
///     _ => unreachable!(),
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvlTree<T> {
    tree: Tree<T, Height>,
}

impl_tree_common!(AvlTree, Height);

impl<T> AvlTree<T>
where
    T: Ord,
{
    fn height_of(&self, id: Option<VertexId>) -> i32 {
        id.map(|id| self.tree.augment(id).0).unwrap_or(-1)
    }

    fn update_height(&mut self, id: VertexId) {
        let vertex = self.tree.node(id);
        let height = 1 + cmp::max(self.height_of(vertex.left), self.height_of(vertex.right));
        self.tree.augment_mut(id).0 = height;
    }

    fn balance(&self, id: VertexId) -> i32 {
        let vertex = self.tree.node(id);
        self.height_of(vertex.left) - self.height_of(vertex.right)
    }

    // Lifts the child on `heavy` side of `id`. If that child leans the other way, it is first
    // rotated so that the single rotation at `id` restores the balance.
    fn rotate_heavy_side(&mut self, id: VertexId, heavy: Side) {
        let child = match self.tree.child(id, heavy) {
            Some(child) => child,
            None => return,
        };
        let leans_inward = match heavy {
            Side::Left => self.balance(child) == -1,
            Side::Right => self.balance(child) == 1,
        };
        if leans_inward {
            debug!("double rotation at {:?}, first around {:?}", id, child);
            self.tree.rotate(child, heavy);
            self.update_height(child);
            if let Some(lifted) = self.tree.parent_of(child) {
                self.update_height(lifted);
            }
        } else {
            debug!("single rotation at {:?}", id);
        }
        self.tree.rotate(id, heavy.opposite());
        self.update_height(id);
    }

    /// Restores the AVL invariant on the path from `start` to the root.
    fn rebalance(&mut self, start: Option<VertexId>) {
        let mut current = start;
        while let Some(id) = current {
            self.update_height(id);
            match self.balance(id) {
                -2 => self.rotate_heavy_side(id, Side::Right),
                2 => self.rotate_heavy_side(id, Side::Left),
                _ => {}
            }
            current = self.tree.parent_of(id);
        }
    }
}

impl<T> BinaryTree<T> for AvlTree<T>
where
    T: Ord,
{
    type Augment = Height;

    fn as_tree(&self) -> &Tree<T, Height> {
        &self.tree
    }

    fn insert(&mut self, element: T) {
        let id = self.tree.insert_leaf(element);
        let parent = self.tree.parent_of(id);
        self.rebalance(parent);
    }

    fn delete(&mut self, element: &T) -> Option<T> {
        let target = self.tree.find(element)?;
        let spliced = self.tree.deletable(target);
        let parent = self.tree.parent_of(spliced);
        self.tree.splice(spliced);
        self.rebalance(parent);
        Some(self.tree.release(spliced, target))
    }

    /// Always fails: the tree rotates itself to stay balanced.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedOperation`.
    fn rotate_left(&mut self, _vertex: VertexId) -> Result<()> {
        Err(Error::UnsupportedOperation("avl trees cannot be rotated by callers"))
    }

    /// Always fails: the tree rotates itself to stay balanced.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedOperation`.
    fn rotate_right(&mut self, _vertex: VertexId) -> Result<()> {
        Err(Error::UnsupportedOperation("avl trees cannot be rotated by callers"))
    }

    fn clear(&mut self) {
        self.tree.clear();
    }
}
