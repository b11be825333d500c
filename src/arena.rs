//! Chunked slot storage for tree vertices.
//!
//! Vertices refer to each other through copyable `VertexId` handles instead of pointers, so a
//! child link and the matching parent back-link are both plain indices into the arena that owns
//! every vertex of a tree.

use std::mem;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::vec::Vec;

/// Number of vertices per chunk used by the `new` constructors of every tree.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

static NEXT_ARENA_ID: AtomicUsize = AtomicUsize::new(0);

fn next_arena_id() -> usize {
    NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed)
}

/// A handle to a vertex stored in a tree.
///
/// Handles stay valid while the vertex they address is part of the tree, including across
/// rotations. Once the vertex is deleted, or the tree is cleared, the handle no longer resolves,
/// even after its slot is reused by a later insertion. Handles of one tree do not resolve in
/// another, except in a clone of that tree, where they address the corresponding vertex.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VertexId {
    arena_id: usize,
    chunk_index: usize,
    block_index: usize,
    generation: u64,
}

// Position of a block in the arena, without the generation it held.
type Slot = (usize, usize);

#[derive(Clone)]
enum Block<T> {
    Occupied { generation: u64, value: T },
    Vacant { generation: u64, next: Option<Slot> },
}

/// Slot storage that grows by whole chunks and recycles freed slots through an intrusive free
/// list, so existing handles never move. Every reuse of a slot bumps its generation, which makes
/// handles to the previous occupant stale.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    id: usize,
    head: Option<Slot>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> Arena<T> {
    pub fn new(chunk_size: usize) -> Self {
        Arena {
            id: next_arena_id(),
            head: None,
            chunks: Vec::new(),
            chunk_size: chunk_size.max(1),
            len: 0,
            capacity: 0,
        }
    }

    pub fn allocate(&mut self, value: T) -> VertexId {
        if self.len == self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        self.len += 1;

        match self.head.take() {
            None => {
                let chunk_count = self.chunks.len();
                let last_chunk = &mut self.chunks[chunk_count - 1];
                last_chunk.push(Block::Occupied {
                    generation: 0,
                    value,
                });
                VertexId {
                    arena_id: self.id,
                    chunk_index: chunk_count - 1,
                    block_index: last_chunk.len() - 1,
                    generation: 0,
                }
            }
            Some((chunk_index, block_index)) => {
                let block = &mut self.chunks[chunk_index][block_index];
                let (generation, next) = match *block {
                    Block::Vacant { generation, next } => (generation, next),
                    Block::Occupied { .. } => unreachable!("free list points at an occupied block"),
                };
                *block = Block::Occupied { generation, value };
                self.head = next;
                VertexId {
                    arena_id: self.id,
                    chunk_index,
                    block_index,
                    generation,
                }
            }
        }
    }

    /// Releases a slot and returns its value, or `None` if `id` does not address a live value.
    pub fn free(&mut self, id: VertexId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        let old_block = mem::replace(
            &mut self.chunks[id.chunk_index][id.block_index],
            Block::Vacant {
                generation: id.generation + 1,
                next: self.head.take(),
            },
        );
        self.head = Some((id.chunk_index, id.block_index));
        self.len -= 1;
        match old_block {
            Block::Occupied { value, .. } => Some(value),
            Block::Vacant { .. } => unreachable!(),
        }
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: VertexId) -> Option<&T> {
        if id.arena_id != self.id {
            return None;
        }
        match self.chunks.get(id.chunk_index)?.get(id.block_index)? {
            Block::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: VertexId) -> Option<&mut T> {
        if id.arena_id != self.id {
            return None;
        }
        match self.chunks.get_mut(id.chunk_index)?.get_mut(id.block_index)? {
            Block::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    // Handles issued before the clear must not resolve against the fresh chunks, so the arena
    // takes a new identity.
    pub fn clear(&mut self) {
        self.id = next_arena_id();
        self.head = None;
        self.chunks.clear();
        self.len = 0;
        self.capacity = 0;
    }
}

impl<T> Index<VertexId> for Arena<T> {
    type Output = T;

    fn index(&self, id: VertexId) -> &Self::Output {
        self.get(id).expect("Expected vertex handle to address a live vertex.")
    }
}

impl<T> IndexMut<VertexId> for Arena<T> {
    fn index_mut(&mut self, id: VertexId) -> &mut Self::Output {
        self.get_mut(id).expect("Expected vertex handle to address a live vertex.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Arena, VertexId};

    fn slot(id: VertexId) -> (usize, usize) {
        (id.chunk_index, id.block_index)
    }

    #[test]
    fn test_allocate_within_chunk() {
        let mut arena = Arena::new(1024);
        assert_eq!(slot(arena.allocate('a')), (0, 0));
        assert_eq!(slot(arena.allocate('b')), (0, 1));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_allocate_spills_into_new_chunk() {
        let mut arena = Arena::new(2);
        arena.allocate(0);
        arena.allocate(1);
        assert_eq!(slot(arena.allocate(2)), (1, 0));
    }

    #[test]
    fn test_zero_chunk_size() {
        let mut arena = Arena::new(0);
        let first = arena.allocate(7);
        let second = arena.allocate(8);
        assert_eq!(arena[first], 7);
        assert_eq!(arena[second], 8);
    }

    #[test]
    fn test_free_recycles_slot() {
        let mut arena = Arena::new(1024);
        let first = arena.allocate(10);
        arena.allocate(20);
        assert_eq!(arena.free(first), Some(10));
        assert!(!arena.contains(first));

        let reused = arena.allocate(30);
        assert_eq!(slot(reused), slot(first));
        assert_ne!(reused, first);
        assert_eq!(arena[reused], 30);
        assert_eq!(arena.get(first), None);
        assert_eq!(arena.free(first), None);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_free_vacant_slot() {
        let mut arena = Arena::new(1024);
        let id = arena.allocate(1);
        assert_eq!(arena.free(id), Some(1));
        assert_eq!(arena.free(id), None);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn test_get_unallocated_slot() {
        let arena: Arena<u32> = Arena::new(1024);
        let id = VertexId {
            arena_id: arena.id,
            chunk_index: 3,
            block_index: 0,
            generation: 0,
        };
        assert_eq!(arena.get(id), None);
        assert!(!arena.contains(id));
    }

    #[test]
    fn test_foreign_handle() {
        let mut lhs = Arena::new(1024);
        let mut rhs = Arena::new(1024);
        let id = lhs.allocate(1);
        rhs.allocate(2);
        assert_eq!(rhs.get(id), None);
        assert_eq!(rhs.free(id), None);
        assert_eq!(lhs.clone().get(id), Some(&1));
    }

    #[test]
    fn test_get_mut() {
        let mut arena = Arena::new(1024);
        let id = arena.allocate(0);
        *arena.get_mut(id).unwrap() = 5;
        assert_eq!(arena.get(id), Some(&5));
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new(4);
        let id = arena.allocate(0);
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert!(!arena.contains(id));

        let reused = arena.allocate(1);
        assert_eq!(slot(reused), slot(id));
        assert!(!arena.contains(id));
        assert_eq!(arena.get_mut(id), None);
    }

    #[test]
    #[should_panic]
    fn test_index_vacant_slot() {
        let mut arena = Arena::new(1024);
        let id = arena.allocate(0);
        arena.free(id);
        let _ = arena[id];
    }
}
