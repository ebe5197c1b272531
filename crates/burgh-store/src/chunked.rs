//! Append-friendly sequence stored as fixed-capacity chunks.

/// A sequence stored in fixed-capacity chunks that never move once
/// allocated.
///
/// Growing appends a chunk; existing elements stay where they are, so
/// pushing is O(1) and never invalidates other elements' positions the
/// way a reallocating vector would. Indices are **not** stable across
/// removal: the default removal swaps the last element into the hole.
/// Consumers needing cross-frame indices use
/// [`OccupancyArray`](crate::OccupancyArray) instead.
///
/// The chunk list itself is a `Vec` of chunk headers, so random access
/// is O(1) arithmetic rather than a chain walk.
pub struct ChunkedArray<T> {
    /// Maximum items per chunk.
    chunk_capacity: usize,
    /// Total live elements.
    len: usize,
    /// Chunks, in order. Every chunk before the tail is full; chunks
    /// past the tail (emptied by removal) are retained for reuse.
    chunks: Vec<Vec<T>>,
}

impl<T> ChunkedArray<T> {
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
        }
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of chunks currently allocated (including retained empties).
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Append an element, allocating a new chunk if the tail is full.
    /// Returns the element's index.
    pub fn push(&mut self, item: T) -> usize {
        let index = self.len;
        let chunk = index / self.chunk_capacity;
        if chunk == self.chunks.len() {
            self.chunks.push(Vec::with_capacity(self.chunk_capacity));
        }
        self.chunks[chunk].push(item);
        self.len += 1;
        index
    }

    /// Shared access by index; `None` past the end.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        Some(&self.chunks[index / self.chunk_capacity][index % self.chunk_capacity])
    }

    /// Mutable access by index; `None` past the end.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        Some(&mut self.chunks[index / self.chunk_capacity][index % self.chunk_capacity])
    }

    /// The first element, if any.
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// The last element, if any.
    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Remove and return the element at `index`.
    ///
    /// With `keep_order == false` (the common case) the last element
    /// is swapped into the hole: O(1), but the element that was last
    /// now lives at `index`. With `keep_order == true` every element
    /// after `index` shifts down one slot, crossing chunk boundaries
    /// as needed: O(n).
    ///
    /// Emptied tail chunks are retained for reuse; capacity never
    /// shrinks.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize, keep_order: bool) -> T {
        assert!(
            index < self.len,
            "remove index {index} out of range for length {}",
            self.len
        );
        let cap = self.chunk_capacity;
        let last = self.len - 1;
        self.len -= 1;

        if keep_order {
            let removed = self.chunks[index / cap].remove(index % cap);
            // Restore the all-but-tail-full invariant by pulling each
            // later chunk's head onto the previous chunk's tail.
            let mut chunk = index / cap;
            while chunk + 1 < self.chunks.len() && !self.chunks[chunk + 1].is_empty() {
                let moved = self.chunks[chunk + 1].remove(0);
                self.chunks[chunk].push(moved);
                chunk += 1;
            }
            removed
        } else {
            let last_item = self.chunks[last / cap]
                .pop()
                .expect("tail chunk holds the last element");
            if index == last {
                last_item
            } else {
                std::mem::replace(&mut self.chunks[index / cap][index % cap], last_item)
            }
        }
    }

    /// Iterate over all elements in index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.chunks.iter().flat_map(|chunk| chunk.iter())
    }

    /// Iterate from `start` to the end without wrapping.
    ///
    /// # Panics
    ///
    /// Panics if `start > len`.
    pub fn iter_from(&self, start: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(
            start <= self.len,
            "iteration start {start} out of range for length {}",
            self.len
        );
        let cap = self.chunk_capacity;
        (start..self.len).map(move |i| (i, &self.chunks[i / cap][i % cap]))
    }

    /// Visit every element exactly once starting at `start`, wrapping
    /// past the end back to index 0.
    ///
    /// This is the round-robin workhorse: a simulation pass that
    /// budgets a fixed number of sectors per tick resumes where it
    /// left off and still touches everything over a full cycle.
    ///
    /// # Panics
    ///
    /// Panics if `start >= len` and the array is non-empty.
    pub fn iter_wrapping(&self, start: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(
            self.len == 0 || start < self.len,
            "iteration start {start} out of range for length {}",
            self.len
        );
        let cap = self.chunk_capacity;
        let len = self.len;
        (0..len).map(move |step| {
            let i = (start + step) % len;
            (i, &self.chunks[i / cap][i % cap])
        })
    }
}
