//! Error types for the codec.

use std::error::Error;
use std::fmt;

use cairn_arena::ArenaError;

/// Errors reported by [`WriteBuffer`](crate::WriteBuffer) and
/// [`ReadBuffer`](crate::ReadBuffer).
///
/// Read errors are ordinary data-driven outcomes (truncated or malformed
/// input); the buffer is left untouched and the caller decides whether to
/// stop, retry with more data, or treat it as end of stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodecError {
    /// A write did not fit in the remaining reserved space.
    Overflow {
        /// Bytes the write needed.
        requested: usize,
        /// Bytes left in the reservation.
        remaining: usize,
    },
    /// A read needed more bytes than remain in the input.
    Truncated {
        /// Bytes the read needed.
        requested: usize,
        /// Bytes left in the input.
        remaining: usize,
    },
    /// A length prefix that cannot be represented on this platform.
    LengthOverflow {
        /// The declared length.
        declared: u64,
    },
    /// Caller-provided storage is too small for a length-prefixed blob.
    BufferTooSmall {
        /// Bytes the blob needs.
        needed: usize,
        /// Bytes the caller provided.
        available: usize,
    },
    /// The underlying arena rejected the commit.
    Arena(ArenaError),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow {
                requested,
                remaining,
            } => write!(
                f,
                "write overflow: {requested} bytes requested, {remaining} bytes reserved space left"
            ),
            Self::Truncated {
                requested,
                remaining,
            } => write!(
                f,
                "truncated input: {requested} bytes requested, {remaining} bytes left"
            ),
            Self::LengthOverflow { declared } => {
                write!(f, "declared length {declared} does not fit in memory")
            }
            Self::BufferTooSmall { needed, available } => write!(
                f,
                "output buffer too small: blob needs {needed} bytes, {available} provided"
            ),
            Self::Arena(e) => write!(f, "arena error: {e}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for CodecError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}
