//! Sequential binary serialization into Cairn arenas.
//!
//! Writes a value of unknown final size into an arena, then commits only
//! the bytes actually used; reads it back with every access bounds-checked.
//!
//! # Architecture
//!
//! - [`WriteBuffer`] wraps an arena [`Reservation`](cairn_arena::Reservation)
//!   and commits `written` bytes on [`WriteBuffer::end`]
//! - [`ReadBuffer`] is a cursor over any borrowed `&[u8]`
//! - [`serialize`] runs a closure between begin and end
//! - [`push_values`] allocates and encodes a fixed-size array in one step
//!
//! # Format
//!
//! ```text
//! [field 1] [field 2] ... [field N]
//! fixed-width field:   little-endian bytes (u8, u32, u64, i32, i64, f32, f64)
//! blob field:          [u64 length] [length bytes]
//! ```
//!
//! There is no header, version tag, or checksum. The schema is implicit:
//! the reader must issue the same sequence of reads the writer issued.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod primitive;
pub mod read;
pub mod write;

pub use error::CodecError;
pub use primitive::Primitive;
pub use read::ReadBuffer;
pub use write::{push_values, serialize, WriteBuffer};

/// Width of the length prefix in front of every blob.
pub const LENGTH_PREFIX_BYTES: usize = 8;
