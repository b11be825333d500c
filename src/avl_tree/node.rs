use crate::bst::{Augment, VertexRef};
use std::fmt;

/// The height stored in each vertex of an AVL tree. A leaf has height 0.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Height(pub(crate) i32);

impl Height {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl Augment for Height {
    fn cached_height(&self) -> Option<i32> {
        Some(self.0)
    }

    fn fmt_vertex<T>(vertex: &VertexRef<'_, T, Self>, f: &mut fmt::Formatter) -> fmt::Result
    where
        T: fmt::Display,
    {
        write!(f, "{} {}/{}", vertex.element(), vertex.height(), vertex.balance())
    }
}

impl<'a, T> VertexRef<'a, T, Height> {
    /// Returns the balance factor of the vertex: the height of its left subtree minus the height
    /// of its right subtree.
    pub fn balance(&self) -> i32 {
        let left = self.left().map(|left| left.height()).unwrap_or(-1);
        let right = self.right().map(|right| right.height()).unwrap_or(-1);
        left - right
    }
}
