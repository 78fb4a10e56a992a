//! Bump-allocated arena used to own every compile-time data structure.
//!
//! The pipeline creates exactly one `Arena` per compilation and hands out
//! borrows of it to each phase. Nothing allocated here is ever freed
//! individually: the whole region is reclaimed in one step, either by
//! [`Arena::reset`] (reuse the same backing storage for another
//! compilation) or by dropping the `Arena` outright.

use std::cell::Cell;

use crate::error::ArenaError;

/// A linear allocator over a single contiguous region of declared capacity.
///
/// `Arena` wraps a [`bumpalo::Bump`] but additionally enforces the capacity
/// declared at construction time: `bumpalo` itself will happily request more
/// memory from the system allocator as a compilation grows, but allocation
/// requests beyond the declared capacity should fail cleanly (and leave the
/// arena's offset unchanged) rather than silently grow. We track bytes
/// charged against the budget ourselves and refuse the request before it
/// ever reaches `bumpalo`.
pub struct Arena {
    bump: bumpalo::Bump,
    capacity: usize,
    used: Cell<usize>,
}

impl Arena {
    /// Create a new arena with the given byte capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: bumpalo::Bump::with_capacity(capacity),
            capacity,
            used: Cell::new(0),
        }
    }

    /// Bytes charged against the declared capacity so far.
    pub fn bytes_used(&self) -> usize {
        self.used.get()
    }

    /// The declared capacity this arena was constructed with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn charge(&self, bytes: usize) -> Result<(), ArenaError> {
        let next = self
            .used
            .get()
            .checked_add(bytes)
            .filter(|&n| n <= self.capacity)
            .ok_or(ArenaError::Exhausted {
                requested: bytes,
                remaining: self.capacity.saturating_sub(self.used.get()),
            })?;
        self.used.set(next);
        Ok(())
    }

    /// Allocate `value`, returning a borrow tied to the arena's lifetime.
    pub fn alloc<T>(&self, value: T) -> Result<&mut T, ArenaError> {
        self.charge(std::mem::size_of::<T>())?;
        Ok(self.bump.alloc(value))
    }

    /// Copy `s` into the arena and return the arena-owned slice.
    pub fn alloc_str(&self, s: &str) -> Result<&str, ArenaError> {
        self.charge(s.len())?;
        Ok(self.bump.alloc_str(s))
    }

    /// Allocate `len` zeroed bytes.
    pub fn alloc_bytes_zeroed(&self, len: usize) -> Result<&mut [u8], ArenaError> {
        self.charge(len)?;
        Ok(self.bump.alloc_slice_fill_copy(len, 0u8))
    }

    /// Copy a slice of `Copy` values into the arena. Used to freeze a
    /// transient `Vec` built while parsing (e.g. a block's item list) into
    /// its final arena-owned form.
    pub fn alloc_slice_copy<T: Copy>(&self, items: &[T]) -> Result<&[T], ArenaError> {
        self.charge(std::mem::size_of::<T>() * items.len())?;
        Ok(self.bump.alloc_slice_copy(items))
    }

    /// Reset the arena to empty. Every pointer handed out previously is
    /// invalidated; the borrow checker enforces this because `reset` takes
    /// `&mut self`.
    pub fn reset(&mut self) {
        self.bump.reset();
        self.used.set(0);
    }

    /// Destroy the arena, freeing the backing storage. Equivalent to
    /// letting the arena drop, spelled out for parity with the arena's
    /// documented interface.
    pub fn destroy(self) {
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_within_capacity() {
        let arena = Arena::with_capacity(1024);
        let s = arena.alloc_str("hello").unwrap();
        assert_eq!(s, "hello");
        assert_eq!(arena.bytes_used(), 5);
    }

    #[test]
    fn refuses_allocation_past_capacity() {
        let arena = Arena::with_capacity(4);
        let before = arena.bytes_used();
        let err = arena.alloc_str("too long").unwrap_err();
        assert!(matches!(err, ArenaError::Exhausted { .. }));
        assert_eq!(arena.bytes_used(), before);
    }

    #[test]
    fn reset_reclaims_capacity() {
        let mut arena = Arena::with_capacity(16);
        arena.alloc_str("12345678").unwrap();
        assert_eq!(arena.bytes_used(), 8);
        arena.reset();
        assert_eq!(arena.bytes_used(), 0);
        arena.alloc_str("12345678").unwrap();
        assert_eq!(arena.bytes_used(), 8);
    }
}
