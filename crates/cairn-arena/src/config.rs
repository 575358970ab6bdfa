//! Arena configuration parameters.

use crate::error::ArenaError;
use crate::units::mega_bytes;

/// Configuration for an [`Arena`](crate::Arena).
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Total capacity of the arena in bytes.
    ///
    /// Default: 64 MiB. Must be non-zero. The arena never grows past it.
    pub capacity: usize,

    /// Whether `push` zeroes the bytes it hands out.
    ///
    /// Fresh memory from the provider is always zeroed; this only matters
    /// for memory re-used after a pop, reset, or scratch restore.
    /// Default: `true`.
    pub zero_on_push: bool,
}

impl ArenaConfig {
    /// Default capacity: 64 MiB.
    pub const DEFAULT_CAPACITY: usize = mega_bytes(64) as usize;

    /// Create a config with the given capacity and default settings.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            zero_on_push: true,
        }
    }

    /// Disable zeroing of re-used memory on push.
    pub fn without_zeroing(mut self) -> Self {
        self.zero_on_push = false;
        self
    }

    /// Check the config is usable.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.capacity == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "capacity must be non-zero",
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
