//! Shared helpers for the Burgh substrate benchmarks.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

use burgh_store::OccupancyArray;

/// Build an occupancy array pre-filled with `count` dummy buildings.
pub fn filled_occupancy(count: usize, chunk_capacity: usize) -> OccupancyArray<u64> {
    let mut array = OccupancyArray::new(chunk_capacity);
    for i in 0..count {
        array.insert(i as u64);
    }
    array
}
