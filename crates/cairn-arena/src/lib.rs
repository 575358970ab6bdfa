//! Fixed-capacity linear (bump) arena for Cairn.
//!
//! One contiguous region is acquired up front from a [`MemoryProvider`];
//! allocations advance a single cursor and are reclaimed in O(1) by moving
//! the cursor back. The region never grows: the capacity chosen at creation
//! is a hard ceiling.
//!
//! # Architecture
//!
//! ```text
//! Arena (owns Box<[u8]> from a MemoryProvider)
//! ├── push / pop / reset      cursor moves, Extent handles
//! ├── Scratch<'_>             saved cursor, restored on end/drop (LIFO by borrow)
//! └── Reservation<'_>         all remaining capacity, folded back by commit(n)
//! ```
//!
//! # Borrow discipline
//!
//! [`Scratch`] and [`Reservation`] hold `&mut Arena`. While either is alive
//! nothing else can touch the arena: a second reservation, a reset, or a
//! destroy are compile errors rather than runtime assertions. Nested
//! checkpoints borrow their parent, so they can only close innermost-first.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod extent;
pub mod provider;
pub mod reserve;
pub mod scratch;
pub mod units;

// Public re-exports for the primary API surface.
pub use arena::{Arena, ArenaStats};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use extent::Extent;
pub use provider::{BudgetProvider, MemoryProvider, SystemProvider};
pub use reserve::Reservation;
pub use scratch::Scratch;
pub use units::{align16, giga_bytes, kilo_bytes, mega_bytes, tera_bytes};
