//! Cairn: a fixed-capacity linear arena with scratch checkpoints and a
//! reserve/commit serialization layer.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Cairn sub-crates. For most users, adding `cairn` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use cairn::prelude::*;
//!
//! let mut arena = Arena::with_capacity(4096).unwrap();
//! let header = arena.push(100).unwrap();
//!
//! // Temporary work, undone when the checkpoint ends.
//! {
//!     let mut scratch = arena.scratch();
//!     scratch.push(200).unwrap();
//! }
//! assert_eq!(arena.used(), 100);
//!
//! // Serialize a record of unknown size, committing only what was written.
//! let record = serialize(&mut arena, |w| {
//!     w.write_u64(42)?;
//!     w.write_length_prefixed(b"hi")
//! })
//! .unwrap();
//! assert_eq!(arena.used(), 118);
//!
//! let mut reader = ReadBuffer::new(arena.get(record).unwrap());
//! assert_eq!(reader.read_u64().unwrap(), 42);
//! assert_eq!(reader.read_length_prefixed().unwrap(), b"hi");
//! # let _ = header;
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `cairn-arena` | `Arena`, `Scratch`, `Reservation`, providers, byte-size helpers |
//! | [`codec`] | `cairn-codec` | `WriteBuffer`, `ReadBuffer`, `serialize`, `push_values` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Arena, checkpoints, reservations, and memory providers (`cairn-arena`).
pub use cairn_arena as arena;

/// Write and read buffers (`cairn-codec`).
pub use cairn_codec as codec;

/// Common imports for typical Cairn usage.
///
/// ```rust
/// use cairn::prelude::*;
/// ```
pub mod prelude {
    pub use cairn_arena::{
        align16, giga_bytes, kilo_bytes, mega_bytes, tera_bytes, Arena, ArenaConfig, ArenaError,
        ArenaStats, BudgetProvider, Extent, MemoryProvider, Reservation, Scratch, SystemProvider,
    };
    pub use cairn_codec::{
        push_values, serialize, CodecError, Primitive, ReadBuffer, WriteBuffer,
    };
}
