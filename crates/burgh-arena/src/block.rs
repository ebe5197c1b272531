//! A single contiguous memory block with bump allocation.

/// Poison byte written over rewound memory in debug builds.
///
/// A dangling handle resolved after a rewind reads `0xCD` garbage
/// instead of stale-but-plausible data, which surfaces the bug early.
pub(crate) const POISON: u8 = 0xCD;

/// One contiguous byte block with a bump cursor.
///
/// Blocks are the storage unit of the arena. Each block is a
/// zero-filled `Vec<u8>` allocated to full capacity at creation; the
/// cursor advances on each allocation and only ever moves backward
/// when the owning arena rewinds past it.
pub struct Block {
    /// Backing storage. Allocated to full capacity at creation.
    data: Vec<u8>,
    /// Bump cursor: next free byte offset.
    used: usize,
}

impl Block {
    /// Create a new zero-filled block with the given capacity in bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            used: 0,
        }
    }

    /// Bump-allocate `len` bytes from this block.
    ///
    /// Returns the starting offset, or `None` if there is insufficient
    /// remaining capacity. The allocated range is zero-filled (it may
    /// hold poison from an earlier rewind).
    pub fn alloc(&mut self, len: usize) -> Option<usize> {
        let new_used = self.used.checked_add(len)?;
        if new_used > self.data.len() {
            return None;
        }
        let offset = self.used;
        self.data[offset..new_used].fill(0);
        self.used = new_used;
        Some(offset)
    }

    /// Shared view of `len` bytes starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` exceeds the block's allocated region.
    pub fn bytes(&self, offset: usize, len: usize) -> &[u8] {
        &self.data[offset..offset + len]
    }

    /// Mutable view of `len` bytes starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` exceeds the block's allocated region.
    pub fn bytes_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        &mut self.data[offset..offset + len]
    }

    /// Move the cursor back to `offset`, releasing everything after it.
    ///
    /// In debug builds the released range is overwritten with
    /// [`POISON`] so dangling reads are loud.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is beyond the current cursor — a rewind may
    /// only move backward.
    pub(crate) fn truncate(&mut self, offset: usize) {
        assert!(
            offset <= self.used,
            "block rewind to offset {offset} is past the cursor at {}",
            self.used
        );
        if cfg!(debug_assertions) {
            self.data[offset..self.used].fill(POISON);
        }
        self.used = offset;
    }

    /// Number of bytes currently allocated.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Remaining free capacity in bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.used
    }
}
