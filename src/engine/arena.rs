//! Scratch arena for parse-time records
//!
//! All values live in a single contiguous `Vec` and are addressed by
//! [`ArenaId`] indices instead of pointers. Rolling back speculative work is
//! just truncating the arena to a saved [`ArenaMark`]; anything allocated
//! after the mark is gone and nothing older can refer to it, so there are no
//! dangling links and no cycles.

use std::fmt;
use std::mem;

/// Index of a value in an [`Arena`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArenaId(u32);

impl ArenaId {
    /// Position of the value in allocation order
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ArenaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Saved arena length, used to discard everything allocated after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaMark(usize);

/// The arena allocator
#[derive(Debug)]
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    /// Create a new arena with default capacity
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a new arena with specified initial capacity
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Create a new arena sized for a given input length
    ///
    /// Scene files are dense: roughly one value every 4-8 bytes once
    /// punctuation and whitespace are accounted for.
    #[inline]
    pub fn for_input(input_len: usize) -> Self {
        let estimated = (input_len / 6).clamp(64, 100_000);
        Self::with_capacity(estimated)
    }

    /// Allocate a value and return its id
    #[inline]
    pub fn alloc(&mut self, value: T) -> ArenaId {
        // Input size limits keep token counts far below u32::MAX
        debug_assert!(self.items.len() < u32::MAX as usize);
        let id = ArenaId(self.items.len() as u32);
        self.items.push(value);
        id
    }

    /// Get a value by id
    ///
    /// Ids are only handed out by `alloc`, and rollback never leaves an id to
    /// a truncated value reachable, so lookups by live ids cannot miss.
    #[inline]
    pub fn get(&self, id: ArenaId) -> &T {
        &self.items[id.index()]
    }

    /// Get a value by id, or `None` if it was truncated away
    #[inline]
    pub fn try_get(&self, id: ArenaId) -> Option<&T> {
        self.items.get(id.index())
    }

    /// Current allocation mark
    #[inline]
    pub fn mark(&self) -> ArenaMark {
        ArenaMark(self.items.len())
    }

    /// Discard every value allocated after `mark`
    #[inline]
    pub fn truncate(&mut self, mark: ArenaMark) {
        self.items.truncate(mark.0);
    }

    /// Number of live values
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the arena holds no values
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the current capacity
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Reset the arena for reuse, retaining allocated memory
    #[inline]
    pub fn reset(&mut self) {
        self.items.clear();
    }

    /// Get memory usage estimate
    #[inline]
    pub fn memory_usage(&self) -> usize {
        self.items.capacity() * mem::size_of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_get() {
        let mut arena = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");

        assert_eq!(*arena.get(a), "a");
        assert_eq!(*arena.get(b), "b");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_truncate_to_mark() {
        let mut arena = Arena::new();
        arena.alloc(1);
        let mark = arena.mark();
        let dropped = arena.alloc(2);
        arena.alloc(3);

        arena.truncate(mark);
        assert_eq!(arena.len(), 1);
        assert!(arena.try_get(dropped).is_none());

        // Ids are reused after truncation
        let reused = arena.alloc(4);
        assert_eq!(reused, dropped);
        assert_eq!(*arena.get(reused), 4);
    }

    #[test]
    fn test_reset() {
        let mut arena = Arena::with_capacity(8);
        arena.alloc(1u64);
        assert!(!arena.is_empty());

        arena.reset();
        assert!(arena.is_empty());
        assert!(arena.capacity() >= 8);
    }

    #[test]
    fn test_for_input_capacity() {
        let small: Arena<u8> = Arena::for_input(10);
        assert!(small.capacity() >= 64);

        let large: Arena<u8> = Arena::for_input(6_000);
        assert!(large.capacity() >= 1_000);
    }

    #[test]
    fn test_memory_usage() {
        let arena: Arena<u64> = Arena::with_capacity(16);
        assert!(arena.memory_usage() >= 16 * 8);
    }

    #[test]
    fn test_id_debug() {
        let mut arena = Arena::new();
        let id = arena.alloc(());
        assert_eq!(format!("{:?}", id), "#0");
    }
}
