use crate::arena::VertexId;
use crate::bst::vertex::VertexRef;
use std::fmt;

/// Per-vertex balancing metadata carried by a tree variant.
///
/// The unbalanced ordered tree uses `()`, the AVL tree stores a height and the red black tree a
/// color. New vertices start with `Default::default()`.
pub trait Augment: Default {
    /// The height of the vertex if the augmentation keeps it up to date.
    fn cached_height(&self) -> Option<i32> {
        None
    }

    /// Writes the label used for the vertex when the tree is displayed.
    fn fmt_vertex<T>(vertex: &VertexRef<'_, T, Self>, f: &mut fmt::Formatter) -> fmt::Result
    where
        T: fmt::Display,
    {
        write!(f, "{}", vertex.element())
    }
}

impl Augment for () {}

/// A struct representing a vertex of a binary search tree.
#[derive(Clone)]
pub(crate) struct Vertex<T, A> {
    pub element: T,
    pub parent: Option<VertexId>,
    pub left: Option<VertexId>,
    pub right: Option<VertexId>,
    pub augment: A,
}

impl<T, A> Vertex<T, A>
where
    A: Augment,
{
    pub fn new(element: T, parent: Option<VertexId>) -> Self {
        Vertex {
            element,
            parent,
            left: None,
            right: None,
            augment: A::default(),
        }
    }
}

impl<T, A> Vertex<T, A> {
    /// The only child of a vertex with at most one child.
    pub fn only_child(&self) -> Option<VertexId> {
        self.left.or(self.right)
    }
}
