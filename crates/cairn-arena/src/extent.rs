//! Extent handles.
//!
//! An [`Extent`] names a byte range handed out by an arena. It is
//! generation-scoped: `reset` bumps the arena generation, which turns every
//! extent from before the reset stale in O(1) without a lookup table. Within a
//! generation each extent also carries an allocation sequence number, so an
//! extent whose bytes were popped stays stale even after a later push reuses
//! the same range.

use std::fmt;
use std::ops::Range;

/// A byte range allocated from an [`Arena`](crate::Arena).
///
/// Resolve it with [`Arena::get`](crate::Arena::get) or
/// [`Arena::get_mut`](crate::Arena::get_mut).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Extent {
    pub(crate) offset: usize,
    pub(crate) len: usize,
    pub(crate) generation: u32,
    pub(crate) seq: u64,
}

impl Extent {
    pub(crate) fn new(offset: usize, len: usize, generation: u32, seq: u64) -> Self {
        Self {
            offset,
            len,
            generation,
            seq,
        }
    }

    /// Byte offset of the extent from the start of the arena.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Arena generation when this extent was allocated.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// The extent as a byte range into the arena.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Extent(gen={}, off={}, len={})",
            self.generation, self.offset, self.len
        )
    }
}
