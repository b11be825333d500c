use crate::arena::VertexId;
use crate::bst::node::{Augment, Vertex};
use crate::bst::tree::{self, Tree};
use crate::error::{Error, Result};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::result;

/// A read-only view of a vertex of a tree.
///
/// A `VertexRef` borrows the tree it belongs to, so the tree cannot be mutated while the view is
/// alive. Use `id` to obtain a handle that outlives the borrow.
pub struct VertexRef<'a, T, A> {
    tree: &'a Tree<T, A>,
    id: VertexId,
}

impl<'a, T, A> Clone for VertexRef<'a, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, A> Copy for VertexRef<'a, T, A> {}

impl<'a, T, A> VertexRef<'a, T, A> {
    pub(crate) fn new(tree: &'a Tree<T, A>, id: VertexId) -> Self {
        VertexRef { tree, id }
    }

    fn vertex(&self) -> &'a Vertex<T, A> {
        self.tree.node(self.id)
    }

    fn link(&self, link: Option<VertexId>, message: &'static str) -> Result<VertexRef<'a, T, A>> {
        link.map(|id| VertexRef::new(self.tree, id))
            .ok_or(Error::NotFound(message))
    }

    pub(crate) fn augment(&self) -> &'a A {
        &self.vertex().augment
    }

    /// Returns the handle of the vertex.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Returns the element stored in the vertex.
    pub fn element(&self) -> &'a T {
        &self.vertex().element
    }

    /// Returns `true` if the vertex has a parent, i.e. it is not the root.
    pub fn has_parent(&self) -> bool {
        self.vertex().parent.is_some()
    }

    /// Returns `true` if the vertex has a left child.
    pub fn has_left(&self) -> bool {
        self.vertex().left.is_some()
    }

    /// Returns `true` if the vertex has a right child.
    pub fn has_right(&self) -> bool {
        self.vertex().right.is_some()
    }

    /// Returns the parent of the vertex.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the vertex is the root.
    pub fn parent(&self) -> Result<VertexRef<'a, T, A>> {
        self.link(self.vertex().parent, "vertex has no parent")
    }

    /// Returns the left child of the vertex.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the vertex has no left child.
    pub fn left(&self) -> Result<VertexRef<'a, T, A>> {
        self.link(self.vertex().left, "vertex has no left child")
    }

    /// Returns the right child of the vertex.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the vertex has no right child.
    pub fn right(&self) -> Result<VertexRef<'a, T, A>> {
        self.link(self.vertex().right, "vertex has no right child")
    }

    /// Returns the number of edges between the vertex and the root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.vertex().parent;
        while let Some(id) = current {
            depth += 1;
            current = self.tree.node(id).parent;
        }
        depth
    }
}

impl<'a, T, A> VertexRef<'a, T, A>
where
    A: Augment,
{
    /// Returns the height of the subtree rooted at the vertex. A leaf has height 0.
    pub fn height(&self) -> i32 {
        match self.augment().cached_height() {
            Some(height) => height,
            None => self.tree.subtree_height(self.id),
        }
    }
}

/// Vertices compare recursively: two vertices are equal if their elements, their augmentations and
/// both of their subtrees are equal.
impl<'a, 'b, T, A> PartialEq<VertexRef<'b, T, A>> for VertexRef<'a, T, A>
where
    T: PartialEq,
    A: PartialEq,
{
    fn eq(&self, other: &VertexRef<'b, T, A>) -> bool {
        tree::subtrees_equal(self.tree, Some(self.id), other.tree, Some(other.id))
    }
}

impl<'a, T, A> fmt::Display for VertexRef<'a, T, A>
where
    T: fmt::Display,
    A: Augment,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        A::fmt_vertex(self, f)
    }
}

/// Lists the elements of the children only, not whole subtrees.
impl<'a, T, A> fmt::Debug for VertexRef<'a, T, A>
where
    T: fmt::Debug,
    A: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Vertex")
            .field("element", self.element())
            .field("augment", self.augment())
            .field("left", &self.left().ok().map(|left| left.element()))
            .field("right", &self.right().ok().map(|right| right.element()))
            .finish()
    }
}

/// Serializes the whole subtree rooted at the vertex, recursing once per level.
impl<'a, T, A> Serialize for VertexRef<'a, T, A>
where
    T: Serialize,
    A: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Vertex", 4)?;
        state.serialize_field("element", self.element())?;
        state.serialize_field("augment", self.augment())?;
        state.serialize_field("left", &self.left().ok())?;
        state.serialize_field("right", &self.right().ok())?;
        state.end()
    }
}
