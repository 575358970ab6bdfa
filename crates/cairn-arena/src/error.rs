//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
///
/// Every failing operation leaves the arena exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The [`ArenaConfig`](crate::ArenaConfig) was rejected at creation.
    InvalidConfig {
        /// Why the configuration is unusable.
        reason: &'static str,
    },
    /// The memory provider could not hand out the backing region.
    AllocationFailed {
        /// Number of bytes requested from the provider.
        requested: usize,
    },
    /// Not enough capacity left for a push or commit.
    CapacityExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes still available after the cursor.
        remaining: usize,
    },
    /// A pop asked for more bytes than are allocated above the current floor
    /// (zero, or the innermost scratch checkpoint).
    PopUnderflow {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes that may be popped.
        available: usize,
    },
    /// `pop_extent` was given an extent that is not the most recent allocation.
    NotTopmost {
        /// End offset of the extent.
        extent_end: usize,
        /// Current cursor position.
        pos: usize,
    },
    /// An [`Extent`](crate::Extent) that no longer refers to live memory:
    /// it was popped or discarded by a scratch restore (even if the range has
    /// been allocated again), or the arena was reset since.
    StaleExtent {
        /// Generation recorded in the extent.
        extent_generation: u32,
        /// Current arena generation.
        generation: u32,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
            Self::AllocationFailed { requested } => {
                write!(f, "memory provider failed to supply {requested} bytes")
            }
            Self::CapacityExceeded {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, {remaining} bytes remaining"
                )
            }
            Self::PopUnderflow {
                requested,
                available,
            } => {
                write!(
                    f,
                    "pop underflow: requested {requested} bytes, only {available} bytes poppable"
                )
            }
            Self::NotTopmost { extent_end, pos } => {
                write!(
                    f,
                    "extent ending at {extent_end} is not the topmost allocation (pos {pos})"
                )
            }
            Self::StaleExtent {
                extent_generation,
                generation,
            } => {
                write!(
                    f,
                    "stale extent: generation {extent_generation}, arena generation {generation}"
                )
            }
        }
    }
}

impl Error for ArenaError {}
