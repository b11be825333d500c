use crate::bst::{Augment, VertexRef};
use std::fmt;

/// An enum representing the color of a vertex in a red black tree.
///
/// New vertices are red. Absent children count as black.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Color {
    Red,
    Black,
}

impl Default for Color {
    fn default() -> Self {
        Color::Red
    }
}

impl Augment for Color {
    fn fmt_vertex<T>(vertex: &VertexRef<'_, T, Self>, f: &mut fmt::Formatter) -> fmt::Result
    where
        T: fmt::Display,
    {
        match vertex.color() {
            Color::Red => write!(f, "R{{{}}}", vertex.element()),
            Color::Black => write!(f, "B{{{}}}", vertex.element()),
        }
    }
}

impl<'a, T> VertexRef<'a, T, Color> {
    /// Returns the color of the vertex.
    pub fn color(&self) -> Color {
        *self.augment()
    }
}
