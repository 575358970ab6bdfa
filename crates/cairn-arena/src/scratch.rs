//! Scratch checkpoints for temporary allocations.
//!
//! [`Scratch`] records the arena cursor when it is opened and puts it back
//! when it ends, discarding everything allocated in between. It borrows the
//! arena (or its parent checkpoint) mutably, so nested checkpoints always
//! close innermost-first and the arena cannot be reset underneath one.

use tracing::trace;

use crate::arena::Arena;
use crate::error::ArenaError;
use crate::extent::Extent;
use crate::reserve::Reservation;

/// A saved cursor position over an [`Arena`].
///
/// Exposes the allocation surface of the arena, minus `reset` and
/// `destroy`. Pops cannot reach below the checkpoint's saved position.
///
/// # Example
///
/// ```
/// use cairn_arena::Arena;
///
/// let mut arena = Arena::with_capacity(1024).unwrap();
/// arena.push(100).unwrap();
///
/// let mut outer = arena.scratch();
/// outer.push(50).unwrap();
/// {
///     let mut inner = outer.scratch();
///     inner.push(25).unwrap();
///     assert_eq!(inner.used(), 175);
/// }
/// assert_eq!(outer.used(), 150);
/// outer.end();
/// assert_eq!(arena.used(), 100);
/// ```
///
/// # Ordering
///
/// A checkpoint borrows the arena for as long as it is open, so the arena
/// cannot be reset or destroyed underneath it:
///
/// ```compile_fail
/// use cairn_arena::Arena;
///
/// let mut arena = Arena::with_capacity(64).unwrap();
/// let scratch = arena.scratch();
/// arena.reset();
/// scratch.end();
/// ```
///
/// ```compile_fail
/// use cairn_arena::Arena;
///
/// let mut arena = Arena::with_capacity(64).unwrap();
/// let scratch = arena.scratch();
/// arena.destroy();
/// scratch.end();
/// ```
///
/// A nested checkpoint borrows its parent, so checkpoints end
/// innermost-first:
///
/// ```compile_fail
/// use cairn_arena::Arena;
///
/// let mut arena = Arena::with_capacity(64).unwrap();
/// let mut outer = arena.scratch();
/// let inner = outer.scratch();
/// outer.end();
/// inner.end();
/// ```
#[must_use = "a scratch checkpoint restores the cursor as soon as it is dropped"]
pub struct Scratch<'a> {
    arena: &'a mut Arena,
    saved_pos: usize,
}

impl<'a> Scratch<'a> {
    pub(crate) fn new(arena: &'a mut Arena) -> Self {
        arena.scratch_depth += 1;
        let saved_pos = arena.pos;
        Self { arena, saved_pos }
    }

    /// Cursor position recorded when the checkpoint opened.
    pub fn saved_pos(&self) -> usize {
        self.saved_pos
    }

    /// Bytes allocated since the checkpoint opened.
    pub fn allocated_since(&self) -> usize {
        self.arena.pos - self.saved_pos
    }

    /// See [`Arena::push`].
    pub fn push(&mut self, size: usize) -> Result<Extent, ArenaError> {
        self.arena.push(size)
    }

    /// See [`Arena::push_bytes`].
    pub fn push_bytes(&mut self, data: &[u8]) -> Result<Extent, ArenaError> {
        self.arena.push_bytes(data)
    }

    /// Release the most recent `size` bytes, but never below the saved
    /// position.
    pub fn pop(&mut self, size: usize) -> Result<(), ArenaError> {
        self.arena.pop_above(size, self.saved_pos)
    }

    /// Release `extent` if it is the topmost allocation of this checkpoint.
    pub fn pop_extent(&mut self, extent: Extent) -> Result<(), ArenaError> {
        self.arena.pop_extent_above(extent, self.saved_pos)
    }

    /// See [`Arena::get`].
    pub fn get(&self, extent: Extent) -> Result<&[u8], ArenaError> {
        self.arena.get(extent)
    }

    /// See [`Arena::get_mut`].
    pub fn get_mut(&mut self, extent: Extent) -> Result<&mut [u8], ArenaError> {
        self.arena.get_mut(extent)
    }

    /// Open a reservation inside this checkpoint. Whatever it commits is
    /// discarded with the checkpoint.
    pub fn reserve(&mut self) -> Reservation<'_> {
        self.arena.reserve()
    }

    /// Open a nested checkpoint.
    pub fn scratch(&mut self) -> Scratch<'_> {
        Scratch::new(self.arena)
    }

    /// Bytes currently allocated in the whole arena.
    pub fn used(&self) -> usize {
        self.arena.used()
    }

    /// Bytes still available in the arena.
    pub fn remaining(&self) -> usize {
        self.arena.remaining()
    }

    /// Total arena capacity.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Close the checkpoint, restoring the cursor. Same as dropping it.
    pub fn end(self) {}
}

impl Drop for Scratch<'_> {
    fn drop(&mut self) {
        // Pops are floored at saved_pos and nested checkpoints restore to a
        // position at or above ours, so the cursor cannot be below it here.
        debug_assert!(self.arena.pos >= self.saved_pos);
        debug_assert!(self.arena.scratch_depth > 0);
        trace!(
            saved_pos = self.saved_pos,
            discarded = self.arena.pos - self.saved_pos,
            "scratch restored"
        );
        self.arena.rewind_to(self.saved_pos);
        self.arena.scratch_depth -= 1;
    }
}
