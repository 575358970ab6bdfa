//! Two-phase reserve/commit allocation.
//!
//! A [`Reservation`] lends a writer the arena's entire remaining capacity
//! without moving the cursor. [`Reservation::commit`] then folds only the
//! bytes actually used into the cursor; the rest stays free for the next
//! allocation. Because the reservation holds `&mut Arena`, no other arena
//! operation can run while it is open.

use crate::arena::Arena;
use crate::error::ArenaError;
use crate::extent::Extent;

/// An open reservation over all remaining capacity of an [`Arena`].
///
/// Dropping it without committing releases the reservation and leaves the
/// cursor where it was.
///
/// # Example
///
/// ```
/// use cairn_arena::Arena;
///
/// let mut arena = Arena::with_capacity(256).unwrap();
/// let mut reservation = arena.reserve();
/// reservation.bytes_mut()[..3].copy_from_slice(b"abc");
/// let extent = reservation.commit(3).unwrap();
/// assert_eq!(arena.get(extent).unwrap(), b"abc");
/// ```
///
/// # Exclusivity
///
/// Only one reservation can be open at a time, and nothing else can touch
/// the arena while it is. Each of these fails to compile:
///
/// ```compile_fail
/// use cairn_arena::Arena;
///
/// let mut arena = Arena::with_capacity(64).unwrap();
/// let reservation = arena.reserve();
/// arena.push(1).unwrap();
/// reservation.cancel();
/// ```
///
/// ```compile_fail
/// use cairn_arena::Arena;
///
/// let mut arena = Arena::with_capacity(64).unwrap();
/// let first = arena.reserve();
/// let second = arena.reserve();
/// first.cancel();
/// second.cancel();
/// ```
///
/// ```compile_fail
/// use cairn_arena::Arena;
///
/// let mut arena = Arena::with_capacity(64).unwrap();
/// let reservation = arena.reserve();
/// arena.reset();
/// reservation.cancel();
/// ```
///
/// The same holds for a reservation taken inside a checkpoint:
///
/// ```compile_fail
/// use cairn_arena::Arena;
///
/// let mut arena = Arena::with_capacity(64).unwrap();
/// let mut scratch = arena.scratch();
/// let reservation = scratch.reserve();
/// scratch.push(1).unwrap();
/// reservation.cancel();
/// ```
#[must_use = "dropping a reservation releases it without committing"]
pub struct Reservation<'a> {
    arena: &'a mut Arena,
}

impl<'a> Reservation<'a> {
    pub(crate) fn new(arena: &'a mut Arena) -> Self {
        Self { arena }
    }

    /// Arena offset where the reserved bytes begin.
    pub fn offset(&self) -> usize {
        self.arena.pos
    }

    /// Bytes available to this reservation.
    pub fn capacity(&self) -> usize {
        self.arena.remaining()
    }

    /// The reserved bytes.
    pub fn bytes(&self) -> &[u8] {
        self.arena.region_from_cursor()
    }

    /// The reserved bytes, writable.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        self.arena.region_from_cursor_mut()
    }

    /// Keep the first `size` reserved bytes as a regular allocation.
    ///
    /// A non-empty commit must leave at least one byte of the arena free;
    /// otherwise [`ArenaError::CapacityExceeded`] is returned. Committing
    /// zero bytes always succeeds. The reservation is released either way.
    pub fn commit(self, size: usize) -> Result<Extent, ArenaError> {
        self.arena.commit_reserved(size)
    }

    /// Release the reservation without allocating anything.
    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_spans_remaining_capacity() {
        let mut arena = Arena::with_capacity(4096).unwrap();
        arena.push(100).unwrap();
        let reservation = arena.reserve();
        assert_eq!(reservation.offset(), 100);
        assert_eq!(reservation.capacity(), 3996);
        assert_eq!(reservation.bytes().len(), 3996);
    }

    #[test]
    fn commit_advances_by_used_bytes_only() {
        let mut arena = Arena::with_capacity(1024).unwrap();
        let mut reservation = arena.reserve();
        reservation.bytes_mut()[..4].copy_from_slice(&[1, 2, 3, 4]);
        let extent = reservation.commit(4).unwrap();
        assert_eq!(extent.offset(), 0);
        assert_eq!(arena.used(), 4);
        assert_eq!(arena.get(extent).unwrap(), &[1, 2, 3, 4]);
        assert_eq!(arena.remaining(), 1020);
    }

    #[test]
    fn cancel_leaves_cursor_unchanged() {
        let mut arena = Arena::with_capacity(1024).unwrap();
        arena.push(7).unwrap();
        let mut reservation = arena.reserve();
        reservation.bytes_mut()[0] = 1;
        reservation.cancel();
        assert_eq!(arena.used(), 7);
    }

    #[test]
    fn drop_releases_reservation() {
        let mut arena = Arena::with_capacity(1024).unwrap();
        {
            let _reservation = arena.reserve();
        }
        // A fresh reservation is possible once the previous one is gone.
        let reservation = arena.reserve();
        assert_eq!(reservation.capacity(), 1024);
    }

    #[test]
    fn commit_must_leave_a_free_byte() {
        let mut arena = Arena::with_capacity(64).unwrap();
        let err = arena.reserve().commit(64).unwrap_err();
        assert_eq!(
            err,
            ArenaError::CapacityExceeded {
                requested: 64,
                remaining: 64
            }
        );
        assert_eq!(arena.used(), 0);
        assert!(arena.reserve().commit(63).is_ok());
        assert_eq!(arena.used(), 63);
    }

    #[test]
    fn zero_commit_succeeds_on_full_arena() {
        let mut arena = Arena::with_capacity(16).unwrap();
        arena.push(16).unwrap();
        let extent = arena.reserve().commit(0).unwrap();
        assert!(extent.is_empty());
        assert_eq!(arena.used(), 16);
    }
}
