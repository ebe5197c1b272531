//! Chunked storage with stable indices and per-chunk occupancy bitmaps.

use crate::bit_array::BitArray;

/// One fixed-capacity chunk: slot storage plus its occupancy bitmap.
///
/// `items[i].is_some()` if and only if occupancy bit `i` is set; the
/// bitmap exists for its O(1) full/empty checks and word-wise
/// free-slot scan, the `Option` storage for safe typed access.
struct OccupancyChunk<T> {
    items: Vec<Option<T>>,
    occupancy: BitArray,
}

impl<T> OccupancyChunk<T> {
    fn new(capacity: usize) -> Self {
        Self {
            items: std::iter::repeat_with(|| None).take(capacity).collect(),
            occupancy: BitArray::new(capacity),
        }
    }
}

/// Chunked storage whose indices stay valid until the element is
/// explicitly removed.
///
/// Removal clears the slot's occupancy bit and leaves a hole; nothing
/// moves or compacts, so an index handed out by [`insert`] keeps
/// meaning the same element for its whole life. Buildings and other
/// simulation entities are referenced across frames by these indices.
/// A later insert refills the lowest hole before touching fresh space.
///
/// The array caches the first chunk with free space. Inserts claim the
/// first clear bit there; when the chunk fills, the cache advances by
/// forward scan (chunks behind it are full by invariant). Removal is
/// the only thing that moves the cache backward, when it opens a hole
/// in an earlier chunk.
///
/// [`insert`]: OccupancyArray::insert
pub struct OccupancyArray<T> {
    /// Slots per chunk.
    chunk_capacity: usize,
    /// Number of occupied slots.
    len: usize,
    /// Chunks, never freed once allocated.
    chunks: Vec<OccupancyChunk<T>>,
    /// Index of the first chunk with a clear bit; `None` when every
    /// allocated chunk is full (or no chunk exists yet).
    first_with_space: Option<usize>,
}

impl<T> OccupancyArray<T> {
    /// Create an empty array with the given chunk capacity.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_capacity` is zero.
    pub fn new(chunk_capacity: usize) -> Self {
        assert!(chunk_capacity > 0, "chunk capacity must be non-zero");
        Self {
            chunk_capacity,
            len: 0,
            chunks: Vec::new(),
            first_with_space: None,
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of chunks currently allocated.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Store `item` in the lowest free slot and return its index.
    ///
    /// The index is stable: it refers to this item until
    /// [`remove`](OccupancyArray::remove) is called with it.
    pub fn insert(&mut self, item: T) -> usize {
        let chunk_index = match self.first_with_space {
            Some(chunk_index) => chunk_index,
            None => {
                self.chunks.push(OccupancyChunk::new(self.chunk_capacity));
                let chunk_index = self.chunks.len() - 1;
                self.first_with_space = Some(chunk_index);
                chunk_index
            }
        };

        let chunk = &mut self.chunks[chunk_index];
        let slot = chunk
            .occupancy
            .first_clear()
            .expect("cached chunk always has a free slot");
        chunk.occupancy.set(slot);
        chunk.items[slot] = Some(item);
        self.len += 1;

        if chunk.occupancy.all_set() {
            // Forward scan only: everything before the cache is full.
            self.first_with_space = self.chunks[chunk_index + 1..]
                .iter()
                .position(|c| !c.occupancy.all_set())
                .map(|ahead| chunk_index + 1 + ahead);
        }

        chunk_index * self.chunk_capacity + slot
    }

    /// Remove and return the item at `index`; `None` if the slot is a
    /// hole or the index was never allocated.
    ///
    /// Other elements keep their indices. If the freed slot is in a
    /// chunk earlier than the cached one, the cache rewinds to it —
    /// the one place the cache legally moves backward.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let chunk_index = index / self.chunk_capacity;
        let slot = index % self.chunk_capacity;
        let chunk = self.chunks.get_mut(chunk_index)?;
        if !chunk.occupancy.clear(slot) {
            return None;
        }
        let item = chunk.items[slot].take();
        debug_assert!(item.is_some(), "occupancy bit was set for an empty slot");
        self.len -= 1;

        match self.first_with_space {
            Some(cached) if cached <= chunk_index => {}
            _ => self.first_with_space = Some(chunk_index),
        }
        item
    }

    /// Shared access to the item at `index`; `None` for holes and
    /// unallocated indices.
    pub fn get(&self, index: usize) -> Option<&T> {
        let chunk = self.chunks.get(index / self.chunk_capacity)?;
        chunk.items[index % self.chunk_capacity].as_ref()
    }

    /// Mutable access to the item at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let chunk = self.chunks.get_mut(index / self.chunk_capacity)?;
        chunk.items[index % self.chunk_capacity].as_mut()
    }

    /// Whether `index` currently holds an item.
    pub fn contains(&self, index: usize) -> bool {
        self.chunks
            .get(index / self.chunk_capacity)
            .is_some_and(|chunk| chunk.occupancy.get(index % self.chunk_capacity))
    }

    /// Iterate over `(index, &item)` pairs in index order, skipping
    /// holes.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        let cap = self.chunk_capacity;
        self.chunks.iter().enumerate().flat_map(move |(ci, chunk)| {
            chunk
                .items
                .iter()
                .enumerate()
                .filter_map(move |(slot, item)| item.as_ref().map(|v| (ci * cap + slot, v)))
        })
    }
}
