//! Burgh: the memory substrate of a city-building simulation engine.
//!
//! This is the facade crate re-exporting the public API of the two
//! substrate sub-crates. Engine code (asset pipeline, renderer, UI,
//! simulation layers) depends on `burgh` alone.
//!
//! # Quick start
//!
//! The dominant pattern is the per-frame scope over a shared temp
//! arena, with long-lived entities in stable-index storage and names
//! resolved through the hash table:
//!
//! ```rust
//! use burgh::{Arena, ArenaScope, HashTable, OccupancyArray};
//!
//! struct Building {
//!     kind: u32,
//!     tile: (u16, u16),
//! }
//!
//! let mut temp = Arena::new();
//! let mut buildings: OccupancyArray<Building> = OccupancyArray::new(64);
//! let mut by_name: HashTable<usize> = HashTable::new();
//!
//! // Placing a building: a stable index, registered by name.
//! let index = buildings.insert(Building { kind: 3, tile: (10, 12) });
//! by_name.insert("fire_station_01", index);
//!
//! // One frame: scratch allocations live exactly as long as the scope.
//! {
//!     let mut frame = ArenaScope::enter(&mut temp);
//!     let scratch = frame.alloc(4096);
//!     assert_eq!(frame.bytes(scratch).len(), 4096);
//!
//!     // Cross-frame references resolve by stable index.
//!     let station = by_name.get("fire_station_01").copied().unwrap();
//!     assert_eq!(buildings.get(station).unwrap().tile, (10, 12));
//! }
//! assert_eq!(temp.stats().used_bytes, 0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `burgh-arena` | `Arena`, `ArenaScope`, checkpoints, handles |
//! | [`store`] | `burgh-store` | `Pool`, `ChunkedArray`, `OccupancyArray`, `HashTable`, `BitArray` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Arena allocation: [`burgh-arena`](burgh_arena) re-exported.
pub mod arena {
    pub use burgh_arena::*;
}

/// Containers: [`burgh-store`](burgh_store) re-exported.
pub mod store {
    pub use burgh_store::*;
}

pub use burgh_arena::{Arena, ArenaScope, ArenaStats, BlobHandle, Checkpoint, StrHandle};
pub use burgh_store::{BitArray, ChunkedArray, HashTable, OccupancyArray, Pool, PoolIndex, Reusable};
