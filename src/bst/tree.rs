use crate::arena::{Arena, VertexId};
use crate::bst::iter::{IntoIter, Iter};
use crate::bst::node::{Augment, Vertex};
use crate::bst::vertex::VertexRef;
use crate::error::{Error, Result};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::VecDeque;
use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::result;

/// The side of a vertex a child hangs from, and the direction of a rotation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The vertex storage and structural primitives shared by every tree in this crate.
///
/// `Tree` keeps the ordered-tree invariant on insertion and deletion but never rebalances; the
/// public tree types drive its primitives and add their own rebalancing. It is exposed read-only
/// through `BinaryTree::as_tree`.
#[derive(Clone)]
pub struct Tree<T, A> {
    arena: Arena<Vertex<T, A>>,
    root: Option<VertexId>,
    len: usize,
    // Valid only until the next operation that is not an insertion.
    last_inserted: Option<VertexId>,
}

impl<T, A> Tree<T, A> {
    pub(crate) fn new(chunk_size: usize) -> Self {
        Tree {
            arena: Arena::new(chunk_size),
            root: None,
            len: 0,
            last_inserted: None,
        }
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the root vertex.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the tree is empty.
    pub fn root(&self) -> Result<VertexRef<'_, T, A>> {
        self.root
            .map(|id| VertexRef::new(self, id))
            .ok_or(Error::NotFound("tree is empty"))
    }

    /// Resolves a vertex handle.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the handle does not address a vertex of the tree.
    pub fn vertex(&self, id: VertexId) -> Result<VertexRef<'_, T, A>> {
        if self.arena.contains(id) {
            Ok(VertexRef::new(self, id))
        } else {
            Err(Error::InvalidArgument("vertex is not part of the tree"))
        }
    }

    /// Returns the vertex created by the most recent insertion.
    ///
    /// The record is only meaningful immediately after an insertion. It survives the rebalancing
    /// that follows the insertion, but any deletion or clear invalidates it.
    ///
    /// # Errors
    ///
    /// Returns `Error::IllegalState` if nothing was inserted since the tree was created or since
    /// the record was last invalidated.
    pub fn last_inserted(&self) -> Result<VertexRef<'_, T, A>> {
        self.last_inserted
            .map(|id| VertexRef::new(self, id))
            .ok_or(Error::IllegalState("no insertion since the last structural change"))
    }

    /// Returns an iterator over the elements of the tree in ascending order.
    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter::new(self)
    }

    /// Applies `action` to every vertex, visiting a vertex before both of its subtrees.
    pub fn pre_order<'a, F>(&'a self, mut action: F)
    where
        F: FnMut(VertexRef<'a, T, A>),
    {
        self.walk_pre_order(|id| action(VertexRef::new(self, id)));
    }

    /// Applies `action` to every vertex, visiting a vertex between its left and right subtrees.
    pub fn in_order<'a, F>(&'a self, mut action: F)
    where
        F: FnMut(VertexRef<'a, T, A>),
    {
        self.walk_in_order(|id| action(VertexRef::new(self, id)));
    }

    /// Applies `action` to every vertex, visiting a vertex after both of its subtrees.
    pub fn post_order<'a, F>(&'a self, mut action: F)
    where
        F: FnMut(VertexRef<'a, T, A>),
    {
        self.walk_post_order(|id| action(VertexRef::new(self, id)));
    }

    /// Applies `action` to every vertex level by level, from the root down and from left to right
    /// within a level.
    pub fn level_order<'a, F>(&'a self, mut action: F)
    where
        F: FnMut(VertexRef<'a, T, A>),
    {
        if let Some(root) = self.root {
            self.walk_level_order(root, |id, _| action(VertexRef::new(self, id)));
        }
    }

    // Visits the subtree of `start` breadth first, passing each vertex with its depth below
    // `start`. Depths never decrease along the walk.
    fn walk_level_order(&self, start: VertexId, mut visit: impl FnMut(VertexId, i32)) {
        let mut queue = VecDeque::new();
        queue.push_back((start, 0));
        while let Some((id, depth)) = queue.pop_front() {
            visit(id, depth);
            let vertex = &self.arena[id];
            queue.extend(vertex.left.map(|left| (left, depth + 1)));
            queue.extend(vertex.right.map(|right| (right, depth + 1)));
        }
    }

    fn walk_pre_order(&self, mut visit: impl FnMut(VertexId)) {
        let mut stack: Vec<VertexId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            visit(id);
            let vertex = &self.arena[id];
            stack.extend(vertex.right);
            stack.extend(vertex.left);
        }
    }

    fn walk_in_order(&self, mut visit: impl FnMut(VertexId)) {
        let mut stack = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(id) = current {
                stack.push(id);
                current = self.arena[id].left;
            }
            match stack.pop() {
                Some(id) => {
                    visit(id);
                    current = self.arena[id].right;
                }
                None => return,
            }
        }
    }

    fn walk_post_order(&self, mut visit: impl FnMut(VertexId)) {
        let mut stack: Vec<(VertexId, bool)> = self.root.map(|id| (id, false)).into_iter().collect();
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                visit(id);
                continue;
            }
            let vertex = &self.arena[id];
            stack.push((id, true));
            stack.extend(vertex.right.map(|right| (right, false)));
            stack.extend(vertex.left.map(|left| (left, false)));
        }
    }

    pub(crate) fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
        self.last_inserted = None;
    }

    pub(crate) fn root_id(&self) -> Option<VertexId> {
        self.root
    }

    pub(crate) fn contains_vertex(&self, id: VertexId) -> bool {
        self.arena.contains(id)
    }

    pub(crate) fn node(&self, id: VertexId) -> &Vertex<T, A> {
        &self.arena[id]
    }

    pub(crate) fn augment(&self, id: VertexId) -> &A {
        &self.arena[id].augment
    }

    pub(crate) fn augment_mut(&mut self, id: VertexId) -> &mut A {
        &mut self.arena[id].augment
    }

    pub(crate) fn parent_of(&self, id: VertexId) -> Option<VertexId> {
        self.arena[id].parent
    }

    pub(crate) fn child(&self, id: VertexId, side: Side) -> Option<VertexId> {
        let vertex = &self.arena[id];
        match side {
            Side::Left => vertex.left,
            Side::Right => vertex.right,
        }
    }

    fn set_child(&mut self, id: VertexId, side: Side, child: Option<VertexId>) {
        let vertex = &mut self.arena[id];
        match side {
            Side::Left => vertex.left = child,
            Side::Right => vertex.right = child,
        }
    }

    /// The side of its parent `id` hangs from, or `None` for the root.
    pub(crate) fn side_of(&self, id: VertexId) -> Option<Side> {
        self.parent_of(id).map(|parent| {
            if self.arena[parent].left == Some(id) {
                Side::Left
            } else {
                Side::Right
            }
        })
    }

    pub(crate) fn sibling(&self, id: VertexId) -> Option<VertexId> {
        let parent = self.parent_of(id)?;
        let side = self.side_of(id)?;
        self.child(parent, side.opposite())
    }

    // Points the link that referenced `old` (a child link of `parent`, or the root) at `new`,
    // and makes `parent` the parent of `new`.
    fn replace_child(&mut self, parent: Option<VertexId>, old: VertexId, new: Option<VertexId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let vertex = &mut self.arena[parent];
                if vertex.left == Some(old) {
                    vertex.left = new;
                } else {
                    vertex.right = new;
                }
            }
        }
        if let Some(new) = new {
            self.arena[new].parent = parent;
        }
    }

    /// Rotates the subtree rooted at `id` in `direction`: a left rotation lifts the right child of
    /// `id` into its place. Does nothing if that child is absent.
    pub(crate) fn rotate(&mut self, id: VertexId, direction: Side) {
        let pivot = match self.child(id, direction.opposite()) {
            Some(pivot) => pivot,
            None => return,
        };
        let inner = self.child(pivot, direction);
        self.set_child(id, direction.opposite(), inner);
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(id);
        }

        let parent = self.parent_of(id);
        self.replace_child(parent, id, Some(pivot));
        self.set_child(pivot, direction, Some(id));
        self.arena[id].parent = Some(pivot);
        trace!("rotated {:?} around {:?}, {:?} is the new subtree root", direction, id, pivot);
    }

    /// Returns the vertex that is physically removed when deleting the element of `id`: `id`
    /// itself if it has at most one child, otherwise its in-order predecessor.
    pub(crate) fn deletable(&self, id: VertexId) -> VertexId {
        let vertex = &self.arena[id];
        match (vertex.left, vertex.right) {
            (Some(left), Some(_)) => {
                let mut current = left;
                while let Some(right) = self.arena[current].right {
                    current = right;
                }
                current
            }
            _ => id,
        }
    }

    /// Unlinks a vertex with at most one child, promoting that child into its position. Returns
    /// the promoted child. The vertex stays allocated until `release`.
    pub(crate) fn splice(&mut self, id: VertexId) -> Option<VertexId> {
        let (parent, child) = {
            let vertex = &self.arena[id];
            debug_assert!(vertex.left.is_none() || vertex.right.is_none());
            (vertex.parent, vertex.only_child())
        };
        self.replace_child(parent, id, child);

        let vertex = &mut self.arena[id];
        vertex.parent = None;
        vertex.left = None;
        vertex.right = None;
        child
    }

    /// Frees a spliced vertex and returns the deleted element. When the spliced vertex is the
    /// predecessor of `target`, its element moves into `target` and the element of `target` is
    /// the one returned.
    pub(crate) fn release(&mut self, spliced: VertexId, target: VertexId) -> T {
        let vertex = match self.arena.free(spliced) {
            Some(vertex) => vertex,
            None => unreachable!("spliced vertex was already released"),
        };
        self.len -= 1;
        self.last_inserted = None;
        trace!("released vertex {:?}", spliced);

        if spliced == target {
            vertex.element
        } else {
            mem::replace(&mut self.arena[target].element, vertex.element)
        }
    }

    /// Height of the subtree rooted at `id`: the depth of the last vertex a level-order walk
    /// reaches.
    pub(crate) fn subtree_height(&self, id: VertexId) -> i32 {
        let mut height = 0;
        self.walk_level_order(id, |_, depth| height = depth);
        height
    }

    // Writes one line per vertex in pre-order. Each pending frame carries the connector that
    // starts its line and the indentation its own children inherit.
    fn fmt_vertices(&self, f: &mut fmt::Formatter, root: VertexId) -> fmt::Result
    where
        T: fmt::Display,
        A: Augment,
    {
        let mut stack = vec![(root, String::new(), String::new())];
        while let Some((id, line, indent)) = stack.pop() {
            writeln!(f, "{}{}", line, VertexRef::new(self, id))?;

            let vertex = &self.arena[id];
            match (vertex.left, vertex.right) {
                (Some(left), Some(right)) => {
                    stack.push((right, format!("{}└─»", indent), format!("{}   ", indent)));
                    stack.push((left, format!("{}├─›", indent), format!("{}│  ", indent)));
                }
                (Some(left), None) => {
                    stack.push((left, format!("{}└─›", indent), format!("{}   ", indent)));
                }
                (None, Some(right)) => {
                    stack.push((right, format!("{}└─»", indent), format!("{}   ", indent)));
                }
                (None, None) => {}
            }
        }
        Ok(())
    }
}

impl<T, A> Tree<T, A>
where
    A: Augment,
{
    /// Returns the height of the tree: -1 if it is empty, otherwise the height of the root.
    pub fn height(&self) -> i32 {
        self.root().map(|root| root.height()).unwrap_or(-1)
    }
}

impl<T, A> Tree<T, A>
where
    T: Ord,
{
    /// Returns the first vertex holding `element` on the search path from the root.
    pub fn search(&self, element: &T) -> Option<VertexRef<'_, T, A>> {
        self.find(element).map(|id| VertexRef::new(self, id))
    }

    /// Returns `true` if the tree contains `element`.
    pub fn contains(&self, element: &T) -> bool {
        self.find(element).is_some()
    }

    pub(crate) fn find(&self, element: &T) -> Option<VertexId> {
        let mut current = self.root;
        while let Some(id) = current {
            let vertex = &self.arena[id];
            current = match element.cmp(&vertex.element) {
                Ordering::Equal => return Some(id),
                Ordering::Less => vertex.left,
                Ordering::Greater => vertex.right,
            };
        }
        None
    }
}

impl<T, A> Tree<T, A>
where
    T: Ord,
    A: Augment,
{
    /// Attaches `element` as a new leaf, routing ties to the left, and records the new vertex as
    /// the last inserted one.
    pub(crate) fn insert_leaf(&mut self, element: T) -> VertexId {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(id) = current {
            let vertex = &self.arena[id];
            parent = Some(id);
            if element <= vertex.element {
                side = Side::Left;
                current = vertex.left;
            } else {
                side = Side::Right;
                current = vertex.right;
            }
        }

        let id = self.arena.allocate(Vertex::new(element, parent));
        match parent {
            None => self.root = Some(id),
            Some(parent) => self.set_child(parent, side, Some(id)),
        }
        self.len += 1;
        self.last_inserted = Some(id);
        trace!("allocated vertex {:?} under {:?}", id, parent);
        id
    }
}

/// Compares two subtrees by shape, elements and augmentation.
pub(crate) fn subtrees_equal<T, A>(
    lhs: &Tree<T, A>,
    lhs_root: Option<VertexId>,
    rhs: &Tree<T, A>,
    rhs_root: Option<VertexId>,
) -> bool
where
    T: PartialEq,
    A: PartialEq,
{
    let mut stack = vec![(lhs_root, rhs_root)];
    while let Some(pair) = stack.pop() {
        match pair {
            (None, None) => {}
            (Some(lhs_id), Some(rhs_id)) => {
                let lhs_vertex = lhs.node(lhs_id);
                let rhs_vertex = rhs.node(rhs_id);
                if lhs_vertex.element != rhs_vertex.element
                    || lhs_vertex.augment != rhs_vertex.augment
                {
                    return false;
                }
                stack.push((lhs_vertex.left, rhs_vertex.left));
                stack.push((lhs_vertex.right, rhs_vertex.right));
            }
            _ => return false,
        }
    }
    true
}

impl<T, A> PartialEq for Tree<T, A>
where
    T: PartialEq,
    A: PartialEq,
{
    fn eq(&self, other: &Tree<T, A>) -> bool {
        subtrees_equal(self, self.root, other, other.root)
    }
}

impl<T, A> Eq for Tree<T, A>
where
    T: Eq,
    A: Eq,
{
}

impl<T, A> fmt::Display for Tree<T, A>
where
    T: fmt::Display,
    A: Augment,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.root {
            Some(root) => self.fmt_vertices(f, root),
            None => Ok(()),
        }
    }
}

impl<T, A> fmt::Debug for Tree<T, A>
where
    T: fmt::Debug,
    A: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("elements", &self.iter().collect::<Vec<&T>>())
            .finish()
    }
}

/// A tree serializes as nested `Vertex` structs. Serializers recurse once per level, so an
/// `OrderedTree` that degenerated into a long chain can exhaust the stack; the balanced trees stay
/// logarithmically shallow.
impl<T, A> Serialize for Tree<T, A>
where
    T: Serialize,
    A: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Tree", 2)?;
        state.serialize_field("len", &self.len)?;
        state.serialize_field("root", &self.root().ok())?;
        state.end()
    }
}

impl<T, A> IntoIterator for Tree<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let mut order = Vec::with_capacity(self.len);
        self.walk_in_order(|id| order.push(id));
        let Tree { mut arena, .. } = self;
        let elements: Vec<T> = order
            .into_iter()
            .filter_map(|id| arena.free(id))
            .map(|vertex| vertex.element)
            .collect();
        IntoIter::new(elements)
    }
}

impl<'a, T, A> IntoIterator for &'a Tree<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
