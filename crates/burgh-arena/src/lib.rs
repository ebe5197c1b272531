//! Bump-allocated arena memory for the Burgh city-simulation engine.
//!
//! Everything above this crate — asset loading, render command buffers,
//! UI layout, the per-layer simulation passes — allocates its transient
//! and bulk memory here instead of going to the global allocator one
//! object at a time.
//!
//! # Architecture
//!
//! ```text
//! Arena (orchestrator)
//! ├── Block chain (SmallVec<[Block; 1]>, oldest first)
//! │   └── Block: zero-filled Vec<u8> + bump cursor
//! ├── Checkpoint (saved block/cursor pair for rewind)
//! └── ArenaScope (drop guard: checkpoint on enter, rewind on drop)
//! ```
//!
//! Allocation only ever moves the cursor forward; memory is released in
//! bulk by rewinding to a [`Checkpoint`]. The dominant pattern is the
//! per-frame scope: the frame loop enters an [`ArenaScope`] on its
//! shared temp arena, hands it down to whatever needs scratch space,
//! and the scope's drop rewinds everything at frame end.
//!
//! # Error model
//!
//! The substrate has no recoverable failures: it grows on demand, and
//! misuse (a 1 GiB+ request, rewinding to a checkpoint that is not an
//! ancestor of the current state, resolving a handle out of bounds) is
//! a programming error that panics. "Not present" lookups elsewhere in
//! the engine return `Option`; the arena itself has none.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod block;
pub mod handle;
pub mod scope;

pub use arena::{Arena, ArenaStats, Checkpoint};
pub use handle::{BlobHandle, StrHandle};
pub use scope::ArenaScope;
