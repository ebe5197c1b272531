//! Container types for the Burgh city-simulation engine.
//!
//! Every long-lived collection in the engine — entity and building
//! storage, render-buffer segment recycling, asset-name lookup, UI
//! widget lists — is one of the five structures in this crate rather
//! than a standard-library collection. They share two design rules:
//! growth never moves existing elements (chunked storage), and nothing
//! ever shrinks during a run.
//!
//! - [`BitArray`] — packed bitmap with an O(1) maintained set count.
//! - [`Pool`] — slab of reusable objects with an external free list.
//! - [`ChunkedArray`] — append-friendly sequence; removal reorders
//!   unless asked not to.
//! - [`OccupancyArray`] — chunked storage with **stable indices**:
//!   removal leaves a hole that a later insert refills, so buildings
//!   can be referenced by index across frames.
//! - [`HashTable`] — string-keyed open addressing with tombstones and
//!   a private key arena.
//!
//! Like the rest of the substrate this crate is single-threaded:
//! every instance has exactly one logical owner, and iterators are
//! invalidated by structural mutation (the borrow checker enforces
//! both).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bit_array;
pub mod chunked;
pub mod hash_table;
pub mod occupancy;
pub mod pool;

pub use bit_array::BitArray;
pub use chunked::ChunkedArray;
pub use hash_table::HashTable;
pub use occupancy::OccupancyArray;
pub use pool::{Pool, PoolIndex, Reusable};
