//! Growable, arena-backed character accumulator used to emit IR and
//! assembly text.
//!
//! `StringBuffer` mirrors `String`'s doubling growth strategy but draws its
//! backing storage from an [`Arena`] instead of the global allocator, so the
//! finished buffer lives exactly as long as everything else the compilation
//! produced and is reclaimed in the same step.

use std::cell::Cell;
use std::fmt;
use std::ptr;
use std::slice;
use std::str;

use crate::arena::Arena;
use crate::error::ArenaError;

const INITIAL_CAPACITY: usize = 64;

/// A `(pointer, length, capacity)` buffer, growable in place.
///
/// All mutating methods take `&self`: the buffer's current block is tracked
/// through `Cell`s so that callers can thread a single shared buffer through
/// deeply recursive emission code (as the code generator does) without
/// fighting the borrow checker over `&mut`.
pub struct StringBuffer<'a> {
    arena: &'a Arena,
    ptr: Cell<*mut u8>,
    len: Cell<usize>,
    cap: Cell<usize>,
}

impl<'a> StringBuffer<'a> {
    /// Create an empty buffer backed by `arena`.
    pub fn new(arena: &'a Arena) -> Self {
        Self {
            arena,
            ptr: Cell::new(ptr::null_mut()),
            len: Cell::new(0),
            cap: Cell::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.len.get()
    }

    pub fn is_empty(&self) -> bool {
        self.len.get() == 0
    }

    /// Reset the length to zero without releasing the backing block; the
    /// next append reuses the existing capacity.
    pub fn reset(&self) {
        self.len.set(0);
    }

    /// Append a single character.
    pub fn push_char(&self, c: char) -> Result<(), ArenaError> {
        let mut buf = [0u8; 4];
        self.push_str(c.encode_utf8(&mut buf))
    }

    /// Append a string slice.
    pub fn push_str(&self, s: &str) -> Result<(), ArenaError> {
        self.reserve(s.len())?;
        unsafe {
            ptr::copy_nonoverlapping(s.as_ptr(), self.ptr.get().add(self.len.get()), s.len());
        }
        self.len.set(self.len.get() + s.len());
        Ok(())
    }

    /// Append a formatted fragment, e.g. `buf.push_fmt(format_args!("movl ${}, %eax\n", n))`.
    pub fn push_fmt(&self, args: fmt::Arguments<'_>) -> Result<(), ArenaError> {
        match args.as_str() {
            Some(literal) => self.push_str(literal),
            None => self.push_str(&fmt::format(args)),
        }
    }

    fn reserve(&self, additional: usize) -> Result<(), ArenaError> {
        let needed = self.len.get() + additional;
        if needed <= self.cap.get() {
            return Ok(());
        }
        let mut new_cap = self.cap.get().max(INITIAL_CAPACITY);
        while new_cap < needed {
            new_cap *= 2;
        }
        let block = self.arena.alloc_bytes_zeroed(new_cap)?;
        let new_ptr = block.as_mut_ptr();
        if self.len.get() > 0 {
            unsafe {
                ptr::copy_nonoverlapping(self.ptr.get(), new_ptr, self.len.get());
            }
        }
        self.ptr.set(new_ptr);
        self.cap.set(new_cap);
        Ok(())
    }

    /// Read-only view of the buffer's current contents.
    pub fn as_str(&self) -> &str {
        if self.len.get() == 0 {
            return "";
        }
        unsafe {
            let bytes = slice::from_raw_parts(self.ptr.get(), self.len.get());
            str::from_utf8_unchecked(bytes)
        }
    }

    /// Copy the buffer's contents into the arena as a single owned,
    /// NUL-terminated allocation, independent of this buffer's internal
    /// capacity. Used to hand the finished assembly text out of the
    /// pipeline.
    pub fn finish(&self) -> Result<&'a str, ArenaError> {
        let body = self.as_str();
        let with_nul_len = body.len() + 1;
        let block = self.arena.alloc_bytes_zeroed(with_nul_len)?;
        block[..body.len()].copy_from_slice(body.as_bytes());
        block[body.len()] = 0;
        Ok(unsafe { str::from_utf8_unchecked(&block[..body.len()]) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_fragments() {
        let arena = Arena::with_capacity(4096);
        let buf = StringBuffer::new(&arena);
        buf.push_str(".globl _main\n").unwrap();
        buf.push_fmt(format_args!("movl ${}, %eax\n", 4)).unwrap();
        assert_eq!(buf.as_str(), ".globl _main\nmovl $4, %eax\n");
    }

    #[test]
    fn grows_past_initial_capacity() {
        let arena = Arena::with_capacity(1 << 20);
        let buf = StringBuffer::new(&arena);
        for _ in 0..200 {
            buf.push_str("movl $1, %eax\n").unwrap();
        }
        assert_eq!(buf.len(), 200 * "movl $1, %eax\n".len());
    }

    #[test]
    fn reset_reuses_capacity() {
        let arena = Arena::with_capacity(4096);
        let buf = StringBuffer::new(&arena);
        buf.push_str("leftover").unwrap();
        buf.reset();
        assert_eq!(buf.as_str(), "");
        buf.push_str("fresh").unwrap();
        assert_eq!(buf.as_str(), "fresh");
    }
}
