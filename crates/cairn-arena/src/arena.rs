//! The arena: one fixed-capacity region and a single allocation cursor.
//!
//! [`Arena`] owns a zeroed `Box<[u8]>` acquired from a
//! [`MemoryProvider`]. Allocation advances `pos`; `pop`, `reset`, and
//! scratch restores move it back. Nothing is ever freed individually and
//! the region is never resized.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::extent::Extent;
use crate::provider::{MemoryProvider, SystemProvider};
use crate::reserve::Reservation;
use crate::scratch::Scratch;

/// Snapshot of arena usage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaStats {
    /// Total capacity in bytes.
    pub capacity: usize,
    /// Bytes currently allocated (the cursor).
    pub used: usize,
    /// Highest cursor position ever reached.
    pub high_water: usize,
    /// Number of scratch checkpoints currently open.
    pub scratch_depth: usize,
}

/// Fixed-capacity bump allocator.
///
/// # Example
///
/// ```
/// use cairn_arena::Arena;
///
/// let mut arena = Arena::with_capacity(4096).unwrap();
/// let a = arena.push(100).unwrap();
/// arena.get_mut(a).unwrap()[0] = 7;
/// assert_eq!(arena.used(), 100);
///
/// {
///     let mut scratch = arena.scratch();
///     scratch.push(200).unwrap();
///     assert_eq!(scratch.used(), 300);
/// } // restored on drop
/// assert_eq!(arena.used(), 100);
/// assert_eq!(arena.get(a).unwrap()[0], 7);
/// ```
pub struct Arena {
    /// Backing storage, exactly `capacity` bytes. Empty once released.
    region: Box<[u8]>,
    /// Bump cursor: bytes currently allocated.
    pub(crate) pos: usize,
    high_water: usize,
    pub(crate) scratch_depth: usize,
    /// Bumped on every reset; extents from older generations are stale.
    generation: u32,
    /// Allocations made in this generation; each extent records its own.
    next_seq: u64,
    /// Cursor rewinds as `(next_seq at rewind, new pos)`, both strictly
    /// increasing from bottom to top. An extent is dead once a later rewind
    /// dropped the cursor below its end.
    rewinds: Vec<(u64, usize)>,
    zero_on_push: bool,
    provider: Box<dyn MemoryProvider + Send>,
}

impl Arena {
    /// Create an arena backed by the global heap.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        Self::with_provider(config, SystemProvider)
    }

    /// Create a heap-backed arena of `capacity` bytes with default settings.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        Self::new(ArenaConfig::new(capacity))
    }

    /// Create an arena whose region comes from `provider`.
    ///
    /// Returns [`ArenaError::AllocationFailed`] if the provider cannot
    /// supply `config.capacity` bytes.
    pub fn with_provider<P>(config: ArenaConfig, mut provider: P) -> Result<Self, ArenaError>
    where
        P: MemoryProvider + Send + 'static,
    {
        config.validate()?;

        let region = match provider.acquire(config.capacity) {
            Some(region) if region.len() == config.capacity => region,
            Some(region) => {
                warn!(
                    requested = config.capacity,
                    got = region.len(),
                    "memory provider returned a region of the wrong size"
                );
                provider.release(region);
                return Err(ArenaError::AllocationFailed {
                    requested: config.capacity,
                });
            }
            None => {
                warn!(requested = config.capacity, "memory provider out of memory");
                return Err(ArenaError::AllocationFailed {
                    requested: config.capacity,
                });
            }
        };

        debug!(capacity = config.capacity, "arena created");
        Ok(Self {
            region,
            pos: 0,
            high_water: 0,
            scratch_depth: 0,
            generation: 0,
            next_seq: 0,
            rewinds: Vec::new(),
            zero_on_push: config.zero_on_push,
            provider: Box::new(provider),
        })
    }

    /// Allocate `size` bytes at the cursor.
    ///
    /// Returns [`ArenaError::CapacityExceeded`] (and changes nothing) if
    /// fewer than `size` bytes remain.
    pub fn push(&mut self, size: usize) -> Result<Extent, ArenaError> {
        let end = self
            .pos
            .checked_add(size)
            .filter(|&end| end <= self.capacity())
            .ok_or(ArenaError::CapacityExceeded {
                requested: size,
                remaining: self.remaining(),
            })?;
        let offset = self.pos;
        if self.zero_on_push {
            // May hold bytes from before a pop, reset, or restore.
            self.region[offset..end].fill(0);
        }
        self.advance_to(end);
        Ok(self.issue(offset, size))
    }

    /// Allocate room for `data` and copy it in.
    pub fn push_bytes(&mut self, data: &[u8]) -> Result<Extent, ArenaError> {
        let end = self
            .pos
            .checked_add(data.len())
            .filter(|&end| end <= self.capacity())
            .ok_or(ArenaError::CapacityExceeded {
                requested: data.len(),
                remaining: self.remaining(),
            })?;
        let offset = self.pos;
        self.region[offset..end].copy_from_slice(data);
        self.advance_to(end);
        Ok(self.issue(offset, data.len()))
    }

    /// Release the most recent `size` bytes.
    ///
    /// The arena does not track individual allocations; callers must only
    /// pop what they most recently pushed. See [`Arena::pop_extent`] for a
    /// checked variant.
    pub fn pop(&mut self, size: usize) -> Result<(), ArenaError> {
        self.pop_above(size, 0)
    }

    /// Release exactly `extent`, which must be the most recent allocation.
    pub fn pop_extent(&mut self, extent: Extent) -> Result<(), ArenaError> {
        self.pop_extent_above(extent, 0)
    }

    /// Discard every allocation.
    ///
    /// All extents handed out before the reset become stale. No checkpoint
    /// can be open here, so the scratch depth is cleared as well; it is only
    /// non-zero if a checkpoint was leaked with `mem::forget`.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scratch_depth = 0;
        self.next_seq = 0;
        self.rewinds.clear();
        self.generation = self.generation.wrapping_add(1);
        debug!(generation = self.generation, "arena reset");
    }

    /// Open a reservation over all remaining capacity.
    ///
    /// The arena stays mutably borrowed until the reservation is committed
    /// or dropped.
    pub fn reserve(&mut self) -> Reservation<'_> {
        Reservation::new(self)
    }

    /// Open a scratch checkpoint at the current cursor.
    ///
    /// Everything allocated through the checkpoint is discarded when it ends.
    pub fn scratch(&mut self) -> Scratch<'_> {
        Scratch::new(self)
    }

    /// Shared view of an allocation.
    ///
    /// Fails with [`ArenaError::StaleExtent`] once the extent has been popped,
    /// restored away by a checkpoint, or reset, even if a later push reused
    /// its range.
    pub fn get(&self, extent: Extent) -> Result<&[u8], ArenaError> {
        self.check_live(extent)?;
        Ok(&self.region[extent.range()])
    }

    /// Mutable view of an allocation.
    pub fn get_mut(&mut self, extent: Extent) -> Result<&mut [u8], ArenaError> {
        self.check_live(extent)?;
        Ok(&mut self.region[extent.range()])
    }

    /// Every allocated byte, `[0, pos)`.
    pub fn allocated(&self) -> &[u8] {
        &self.region[..self.pos]
    }

    /// Release the backing region through the provider.
    ///
    /// Returns the provider's status. Dropping an arena releases it as well;
    /// `destroy` only makes the status observable.
    pub fn destroy(mut self) -> bool {
        self.release_region()
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.region.len()
    }

    /// Bytes currently allocated.
    pub fn used(&self) -> usize {
        self.pos
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        self.capacity() - self.pos
    }

    /// Number of scratch checkpoints currently open.
    pub fn scratch_depth(&self) -> usize {
        self.scratch_depth
    }

    /// Current generation.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Usage snapshot.
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            capacity: self.capacity(),
            used: self.pos,
            high_water: self.high_water,
            scratch_depth: self.scratch_depth,
        }
    }

    pub(crate) fn pop_above(&mut self, size: usize, floor: usize) -> Result<(), ArenaError> {
        let available = self.pos - floor;
        if size > available {
            return Err(ArenaError::PopUnderflow {
                requested: size,
                available,
            });
        }
        if size > 0 {
            self.rewind_to(self.pos - size);
        }
        Ok(())
    }

    pub(crate) fn pop_extent_above(
        &mut self,
        extent: Extent,
        floor: usize,
    ) -> Result<(), ArenaError> {
        self.check_live(extent)?;
        if extent.end() != self.pos {
            return Err(ArenaError::NotTopmost {
                extent_end: extent.end(),
                pos: self.pos,
            });
        }
        self.pop_above(extent.len(), floor)
    }

    pub(crate) fn region_from_cursor(&self) -> &[u8] {
        &self.region[self.pos..]
    }

    pub(crate) fn region_from_cursor_mut(&mut self) -> &mut [u8] {
        &mut self.region[self.pos..]
    }

    /// Second half of reserve/commit: fold `size` reserved bytes into the
    /// cursor. Non-empty commits must leave at least one byte free.
    pub(crate) fn commit_reserved(&mut self, size: usize) -> Result<Extent, ArenaError> {
        if size > 0 && size >= self.remaining() {
            return Err(ArenaError::CapacityExceeded {
                requested: size,
                remaining: self.remaining(),
            });
        }
        let offset = self.pos;
        self.advance_to(offset + size);
        trace!(offset, size, "reservation committed");
        Ok(self.issue(offset, size))
    }

    /// Move the cursor back to `pos`, killing every live extent that ends
    /// above it.
    pub(crate) fn rewind_to(&mut self, pos: usize) {
        debug_assert!(pos <= self.pos);
        self.pos = pos;
        // Older rewinds to a position at or above `pos` can no longer be the
        // lowest rewind seen by any extent.
        while self.rewinds.last().is_some_and(|&(_, p)| p >= pos) {
            self.rewinds.pop();
        }
        self.rewinds.push((self.next_seq, pos));
    }

    fn issue(&mut self, offset: usize, len: usize) -> Extent {
        let seq = self.next_seq;
        self.next_seq += 1;
        Extent::new(offset, len, self.generation, seq)
    }

    fn advance_to(&mut self, end: usize) {
        self.pos = end;
        self.high_water = self.high_water.max(end);
    }

    fn check_live(&self, extent: Extent) -> Result<(), ArenaError> {
        // First rewind after the extent was issued; positions grow along the
        // stack, so it is also the lowest the cursor has been since.
        let first_later = self.rewinds.partition_point(|&(seq, _)| seq <= extent.seq);
        let rewound_below = self
            .rewinds
            .get(first_later)
            .is_some_and(|&(_, p)| p < extent.end());
        if extent.generation != self.generation || extent.end() > self.pos || rewound_below {
            return Err(ArenaError::StaleExtent {
                extent_generation: extent.generation,
                generation: self.generation,
            });
        }
        Ok(())
    }

    fn release_region(&mut self) -> bool {
        let region = std::mem::take(&mut self.region);
        let capacity = region.len();
        self.pos = 0;
        self.high_water = 0;
        let released = self.provider.release(region);
        if released {
            debug!(capacity, "arena destroyed");
        } else {
            warn!(capacity, "memory provider refused to release arena region");
        }
        released
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        if !self.region.is_empty() {
            self.release_region();
        }
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity())
            .field("pos", &self.pos)
            .field("high_water", &self.high_water)
            .field("scratch_depth", &self.scratch_depth)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
