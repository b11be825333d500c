use crate::arena::VertexId;
use crate::bst::tree::Tree;
use std::vec;

/// An iterator over the elements of a tree.
///
/// This iterator traverses the tree in-order and yields immutable references. Every call to
/// `iter` starts a fresh traversal.
pub struct Iter<'a, T, A> {
    tree: &'a Tree<T, A>,
    stack: Vec<VertexId>,
    remaining: usize,
}

impl<'a, T, A> Iter<'a, T, A> {
    pub(crate) fn new(tree: &'a Tree<T, A>) -> Self {
        let mut iter = Iter {
            tree,
            stack: Vec::new(),
            remaining: tree.len(),
        };
        iter.push_left_spine(tree.root_id());
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<VertexId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.tree.node(id).left;
        }
    }
}

impl<'a, T, A> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let vertex = self.tree.node(id);
        self.push_left_spine(vertex.right);
        self.remaining -= 1;
        Some(&vertex.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, A> ExactSizeIterator for Iter<'a, T, A> {}

/// An owning iterator over the elements of a tree.
///
/// This iterator yields the elements in ascending order, equal elements in the order the tree
/// holds them.
pub struct IntoIter<T> {
    elements: vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(elements: Vec<T>) -> Self {
        IntoIter {
            elements: elements.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.elements.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.elements.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
