use crate::arena::VertexId;
use crate::bst::{BinaryTree, Side, Tree};
use crate::error::{Error, Result};
use crate::red_black_tree::node::Color;
use std::mem;

/// An ordered tree implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that maintains the following
/// invariants:
///
/// 1. The root is black.
/// 2. A red vertex never has a red child.
/// 3. Every path from a vertex to any of its absent children passes through the same number of
///    black vertices.
///
/// Together they bound the height of the tree by twice the logarithm of its size.
///
/// # Examples
///
/// ```
/// use balanced_trees::{BinaryTree, Color, RedBlackTree};
///
/// let mut tree: RedBlackTree<u32> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
///
/// assert_eq!(tree.root().unwrap().color(), Color::Black);
/// assert!(tree.contains(&4));
///
/// assert_eq!(tree.delete(&5), Some(5));
/// assert_eq!(tree.delete(&5), None);
/// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &3, &4, &7, &8, &9]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedBlackTree<T> {
    tree: Tree<T, Color>,
}

impl_tree_common!(RedBlackTree, Color);

impl<T> RedBlackTree<T>
where
    T: Ord,
{
    /// Returns the color of a vertex.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `vertex` is not part of the tree.
    pub fn color(&self, vertex: VertexId) -> Result<Color> {
        self.tree.vertex(vertex).map(|vertex| vertex.color())
    }

    fn color_of(&self, id: Option<VertexId>) -> Color {
        id.map(|id| *self.tree.augment(id)).unwrap_or(Color::Black)
    }

    fn is_red(&self, id: Option<VertexId>) -> bool {
        self.color_of(id) == Color::Red
    }

    fn set_color(&mut self, id: VertexId, color: Color) {
        *self.tree.augment_mut(id) = color;
    }

    fn rebalance_insert(&mut self, mut vertex: VertexId) {
        loop {
            let mut parent = match self.tree.parent_of(vertex) {
                Some(parent) => parent,
                None => {
                    debug!("{:?} is the root, coloring it black", vertex);
                    self.set_color(vertex, Color::Black);
                    return;
                }
            };
            if !self.is_red(Some(parent)) {
                return;
            }

            // A red parent is never the root, so the grandparent exists.
            let grandparent = match self.tree.parent_of(parent) {
                Some(grandparent) => grandparent,
                None => {
                    self.set_color(parent, Color::Black);
                    return;
                }
            };
            let uncle = self.tree.sibling(parent);
            if let Some(uncle) = uncle.filter(|uncle| self.is_red(Some(*uncle))) {
                debug!("red uncle {:?}, recoloring and moving up to {:?}", uncle, grandparent);
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                vertex = grandparent;
                continue;
            }

            let parent_side = self.tree.side_of(parent);
            if self.tree.side_of(vertex) != parent_side {
                debug!("{:?} is crossed with its parent {:?}, uncrossing", vertex, parent);
                if let Some(side) = parent_side {
                    self.tree.rotate(parent, side);
                }
                mem::swap(&mut vertex, &mut parent);
            }

            debug!("black uncle, rotating grandparent {:?}", grandparent);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            match self.tree.side_of(vertex) {
                Some(side) => self.tree.rotate(grandparent, side.opposite()),
                None => unreachable!("vertex below a red parent has a parent"),
            }
            return;
        }
    }

    // `vertex` replaced a removed black vertex and is short one black on every path through it.
    // It may be absent, in which case `parent` identifies the position it occupies.
    fn rebalance_black(&mut self, mut vertex: Option<VertexId>, mut parent: Option<VertexId>) {
        loop {
            let parent_id = match parent {
                Some(parent_id) => parent_id,
                None => {
                    debug!("deficit reached the root");
                    return;
                }
            };
            let side = if self.tree.child(parent_id, Side::Left) == vertex {
                Side::Left
            } else {
                Side::Right
            };

            let mut sibling = match self.tree.child(parent_id, side.opposite()) {
                Some(sibling) => sibling,
                None => unreachable!("a black deficit always has a sibling"),
            };
            if self.is_red(Some(sibling)) {
                debug!("red sibling {:?}, rotating parent {:?}", sibling, parent_id);
                self.set_color(sibling, Color::Black);
                self.set_color(parent_id, Color::Red);
                self.tree.rotate(parent_id, side);
                sibling = match self.tree.child(parent_id, side.opposite()) {
                    Some(sibling) => sibling,
                    None => unreachable!("a black deficit always has a sibling"),
                };
            }

            let near = self.tree.child(sibling, side);
            let far = self.tree.child(sibling, side.opposite());
            if !self.is_red(near) && !self.is_red(far) {
                self.set_color(sibling, Color::Red);
                if self.is_red(Some(parent_id)) {
                    debug!("black sibling with black children, red parent {:?}", parent_id);
                    self.set_color(parent_id, Color::Black);
                    return;
                }
                debug!("black sibling with black children, moving up to {:?}", parent_id);
                vertex = Some(parent_id);
                parent = self.tree.parent_of(parent_id);
                continue;
            }

            let mut far = far;
            if !self.is_red(far) {
                debug!("red near child of sibling {:?}, rotating it outward", sibling);
                if let Some(near) = near {
                    self.set_color(near, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.tree.rotate(sibling, side.opposite());
                far = Some(sibling);
                sibling = match self.tree.child(parent_id, side.opposite()) {
                    Some(sibling) => sibling,
                    None => unreachable!("rotation keeps the sibling position occupied"),
                };
            }

            debug!("red far child of sibling {:?}, rotating parent {:?}", sibling, parent_id);
            let parent_color = self.color_of(Some(parent_id));
            self.set_color(sibling, parent_color);
            self.set_color(parent_id, Color::Black);
            if let Some(far) = far {
                self.set_color(far, Color::Black);
            }
            self.tree.rotate(parent_id, side);
            return;
        }
    }
}

impl<T> BinaryTree<T> for RedBlackTree<T>
where
    T: Ord,
{
    type Augment = Color;

    fn as_tree(&self) -> &Tree<T, Color> {
        &self.tree
    }

    fn insert(&mut self, element: T) {
        let id = self.tree.insert_leaf(element);
        self.rebalance_insert(id);
    }

    fn delete(&mut self, element: &T) -> Option<T> {
        let target = self.tree.find(element)?;
        let spliced = self.tree.deletable(target);
        let parent = self.tree.parent_of(spliced);
        let spliced_color = *self.tree.augment(spliced);
        let replacement = self.tree.splice(spliced);

        if spliced_color == Color::Black && !self.is_red(replacement) {
            self.rebalance_black(replacement, parent);
        } else if let Some(replacement) = replacement {
            self.set_color(replacement, Color::Black);
        }
        if let Ok(root) = self.tree.root() {
            let root = root.id();
            self.set_color(root, Color::Black);
        }
        Some(self.tree.release(spliced, target))
    }

    /// Always fails: the tree rotates itself to stay balanced.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedOperation`.
    fn rotate_left(&mut self, _vertex: VertexId) -> Result<()> {
        Err(Error::UnsupportedOperation("red black trees cannot be rotated by callers"))
    }

    /// Always fails: the tree rotates itself to stay balanced.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedOperation`.
    fn rotate_right(&mut self, _vertex: VertexId) -> Result<()> {
        Err(Error::UnsupportedOperation("red black trees cannot be rotated by callers"))
    }

    fn clear(&mut self) {
        self.tree.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackTree;
    use crate::bst::{BinaryTree, VertexRef};
    use crate::error::Error;
    use crate::red_black_tree::Color;

    // Returns the black height of the subtree, counting absent children as one black vertex.
    fn black_height(vertex: Option<VertexRef<'_, u32, Color>>) -> usize {
        match vertex {
            None => 1,
            Some(vertex) => {
                if vertex.color() == Color::Red {
                    for child in vertex.left().ok().into_iter().chain(vertex.right().ok()) {
                        assert_eq!(
                            child.color(),
                            Color::Black,
                            "red {} has a red child",
                            vertex.element(),
                        );
                    }
                }
                let left = black_height(vertex.left().ok());
                let right = black_height(vertex.right().ok());
                assert_eq!(left, right, "black heights differ below {}", vertex.element());
                left + if vertex.color() == Color::Black { 1 } else { 0 }
            }
        }
    }

    fn assert_valid(tree: &RedBlackTree<u32>) {
        if let Ok(root) = tree.root() {
            assert_eq!(root.color(), Color::Black);
        }
        black_height(tree.root().ok());
        let elements = tree.iter().collect::<Vec<&u32>>();
        assert!(elements.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(elements.len(), tree.len());
    }

    #[test]
    fn test_len_empty() {
        let tree: RedBlackTree<u32> = RedBlackTree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
    }

    #[test]
    fn test_insert_recolors() {
        let tree: RedBlackTree<u32> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
        assert_valid(&tree);
        assert_eq!(
            tree.to_string(),
            "B{5}\n├─›B{3}\n│  ├─›R{1}\n│  └─»R{4}\n└─»B{8}\n   ├─›R{7}\n   └─»R{9}\n",
        );
    }

    #[test]
    fn test_insert_ascending_rotates_left() {
        let tree: RedBlackTree<u32> = vec![1, 2, 3].into_iter().collect();
        let root = tree.root().unwrap();
        assert_eq!(root.element(), &2);
        assert_eq!(root.color(), Color::Black);
        assert_eq!(root.left().unwrap().color(), Color::Red);
        assert_eq!(root.right().unwrap().color(), Color::Red);
    }

    #[test]
    fn test_insert_crossed_rotates_twice() {
        let tree: RedBlackTree<u32> = vec![3, 1, 2].into_iter().collect();
        assert_eq!(tree.to_string(), "B{2}\n├─›R{1}\n└─»R{3}\n");
    }

    #[test]
    fn test_last_inserted_survives_rebalance() {
        let mut tree: RedBlackTree<u32> = vec![1, 2].into_iter().collect();
        tree.insert(3);
        let inserted = tree.last_inserted().unwrap();
        assert_eq!(inserted.element(), &3);
        assert_eq!(inserted.parent().unwrap().element(), &2);
    }

    #[test]
    fn test_ascending_sequence_stays_logarithmic() {
        let tree: RedBlackTree<u32> = (0..1024).collect();
        assert_valid(&tree);
        assert!(tree.height() <= 20);
    }

    #[test]
    fn test_delete_red_leaf() {
        let mut tree: RedBlackTree<u32> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
        assert_eq!(tree.delete(&9), Some(9));
        assert_valid(&tree);
        assert!(!tree.contains(&9));
    }

    #[test]
    fn test_delete_black_leaf_with_far_red_nephew() {
        let mut tree: RedBlackTree<u32> = vec![1, 2, 3, 4].into_iter().collect();
        assert_eq!(tree.delete(&1), Some(1));
        assert_eq!(tree.to_string(), "B{3}\n├─›B{2}\n└─»B{4}\n");
    }

    #[test]
    fn test_delete_two_children_uses_predecessor() {
        let mut tree: RedBlackTree<u32> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
        assert_eq!(tree.delete(&5), Some(5));
        let root = tree.root().unwrap();
        assert_eq!(root.element(), &4);
        assert_eq!(root.color(), Color::Black);
        assert_valid(&tree);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut tree: RedBlackTree<u32> = (0..10).collect();
        let before = tree.clone();
        assert_eq!(tree.delete(&42), None);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_delete_all() {
        let mut tree: RedBlackTree<u32> = (0..128).collect();
        for element in (0..128).rev().step_by(5).chain((0..128).step_by(2)).chain(0..128) {
            tree.delete(&element);
            assert_valid(&tree);
        }
        assert!(tree.is_empty());
        assert!(tree.root().is_err());
    }

    #[test]
    fn test_duplicates() {
        let mut tree: RedBlackTree<u32> = vec![5, 5, 5, 5, 5, 5].into_iter().collect();
        assert_valid(&tree);
        assert_eq!(tree.delete(&5), Some(5));
        assert_eq!(tree.len(), 5);
        assert_valid(&tree);
    }

    #[test]
    fn test_color_of_stale_vertex() {
        let mut tree: RedBlackTree<u32> = vec![2, 1].into_iter().collect();
        let leaf = tree.search(&1).unwrap().id();
        assert_eq!(tree.color(leaf), Ok(Color::Red));
        tree.delete(&1);
        assert_eq!(
            tree.color(leaf),
            Err(Error::InvalidArgument("vertex is not part of the tree")),
        );
    }

    #[test]
    fn test_rotations_rejected() {
        let mut tree: RedBlackTree<u32> = vec![1, 2, 3].into_iter().collect();
        let root = tree.root().unwrap().id();
        assert_eq!(
            tree.rotate_left(root),
            Err(Error::UnsupportedOperation("red black trees cannot be rotated by callers")),
        );
        match tree.rotate_right(root) {
            Err(Error::UnsupportedOperation(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(tree.root().unwrap().element(), &2);
    }
}
