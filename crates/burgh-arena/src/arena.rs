//! The arena allocator: a chain of bump-allocated blocks with
//! checkpoint/rewind.

use smallvec::SmallVec;

use crate::block::Block;
use crate::handle::{BlobHandle, StrHandle};

/// Default minimum block size: 64 KiB.
///
/// Small enough that per-subsystem arenas (settings, UI scratch) stay
/// cheap, large enough that per-tile simulation arrays for a typical
/// city footprint fit in one block.
pub const DEFAULT_MIN_BLOCK_SIZE: usize = 64 * 1024;

/// Allocations at or above this size are treated as a programming
/// error, not a real request. Per-tile arrays for the largest city
/// footprint are tens of megabytes; anything gigabyte-sized is a
/// corrupted length upstream.
const MAX_ALLOC: usize = 1 << 30;

/// A saved arena position: `(block, cursor)` pair.
///
/// Captured by [`Arena::checkpoint`] or [`Arena::mark_reset_position`];
/// consumed by [`Arena::rewind_to`] or [`Arena::reset`]. Valid only for
/// the arena that produced it, and only while it names an ancestor of
/// the arena's current state — rewinding forward is a fatal error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct Checkpoint {
    /// Index of the block that was current when the checkpoint was taken.
    block: usize,
    /// That block's cursor at the time.
    used: usize,
}

/// Memory usage summary for an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaStats {
    /// Number of blocks in the chain.
    pub block_count: usize,
    /// Total bytes allocated out of the chain.
    pub used_bytes: usize,
    /// Total capacity of the chain in bytes.
    pub capacity_bytes: usize,
}

/// Bump allocator over a chain of heap blocks, released in bulk by
/// rewinding to a [`Checkpoint`].
///
/// The chain grows at the tail: when the current (last) block cannot
/// satisfy a request, a new block of `max(request, min_block_size)`
/// bytes is pushed and becomes current. Earlier blocks are never
/// revisited — their tail gap is the price of never moving data.
/// Rewinding drops every block after the checkpoint's and truncates
/// the checkpoint's own block back to the recorded cursor.
///
/// One logical owner mutates an arena at a time; nothing here is
/// re-entrant or thread-safe.
pub struct Arena {
    /// Block chain, oldest first. The last block is current. Almost
    /// every arena in the engine lives its whole life in one block,
    /// hence the inline slot.
    blocks: SmallVec<[Block; 1]>,
    /// Lower bound on the size of newly pushed blocks.
    min_block_size: usize,
    /// Position restored by [`Arena::reset`].
    reset_mark: Checkpoint,
}

impl Arena {
    /// Create an arena with the default minimum block size.
    ///
    /// The first block is allocated eagerly so that the common case —
    /// an arena that never outgrows one block — does a single heap
    /// allocation up front and none after.
    pub fn new() -> Self {
        Self::with_min_block_size(DEFAULT_MIN_BLOCK_SIZE)
    }

    /// Create an arena whose blocks are at least `min_block_size` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `min_block_size` is zero.
    pub fn with_min_block_size(min_block_size: usize) -> Self {
        assert!(min_block_size > 0, "arena minimum block size must be non-zero");
        let mut blocks = SmallVec::new();
        blocks.push(Block::new(min_block_size));
        Self {
            blocks,
            min_block_size,
            reset_mark: Checkpoint { block: 0, used: 0 },
        }
    }

    /// Allocate `len` zero-initialised bytes.
    ///
    /// `len == 0` returns [`BlobHandle::EMPTY`] without consuming any
    /// block space — zero-length blobs and empty interned strings are
    /// common and must stay free.
    ///
    /// # Panics
    ///
    /// Panics if `len` is 1 GiB or more (a corrupted size upstream,
    /// not a real request).
    pub fn alloc(&mut self, len: usize) -> BlobHandle {
        assert!(
            len < MAX_ALLOC,
            "arena allocation of {len} bytes is at or above the 1 GiB limit"
        );
        if len == 0 {
            return BlobHandle::EMPTY;
        }

        let current = self.blocks.len() - 1;
        if let Some(offset) = self.blocks[current].alloc(len) {
            return BlobHandle::new(current as u32, offset as u32, len as u32);
        }

        // Current block full: push a block big enough for the request.
        let mut block = Block::new(len.max(self.min_block_size));
        let offset = block
            .alloc(len)
            .expect("fresh block is sized to fit the request");
        self.blocks.push(block);
        BlobHandle::new((self.blocks.len() - 1) as u32, offset as u32, len as u32)
    }

    /// Copy a string's bytes into the arena and return its handle.
    ///
    /// The empty string yields [`StrHandle::EMPTY`] without allocating.
    pub fn alloc_str(&mut self, s: &str) -> StrHandle {
        let handle = self.alloc(s.len());
        if !handle.is_empty() {
            self.bytes_mut(handle).copy_from_slice(s.as_bytes());
        }
        StrHandle(handle)
    }

    /// Resolve a handle to its byte slice.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not lie within this arena's current
    /// chain (wrong arena, or the allocation was rewound away).
    pub fn bytes(&self, handle: BlobHandle) -> &[u8] {
        if handle.is_empty() {
            return &[];
        }
        self.blocks[handle.block as usize].bytes(handle.offset as usize, handle.len as usize)
    }

    /// Resolve a handle to its mutable byte slice.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Arena::bytes`].
    pub fn bytes_mut(&mut self, handle: BlobHandle) -> &mut [u8] {
        if handle.is_empty() {
            return &mut [];
        }
        self.blocks[handle.block as usize].bytes_mut(handle.offset as usize, handle.len as usize)
    }

    /// Resolve a string handle back to `&str`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is out of bounds or the referenced bytes
    /// are no longer valid UTF-8 (someone scribbled over an interned
    /// string through [`Arena::bytes_mut`]).
    pub fn str_of(&self, handle: StrHandle) -> &str {
        std::str::from_utf8(self.bytes(handle.0))
            .expect("string handle references bytes that are not valid UTF-8")
    }

    /// Capture the current position without changing the reset mark.
    pub fn checkpoint(&self) -> Checkpoint {
        let block = self.blocks.len() - 1;
        Checkpoint {
            block,
            used: self.blocks[block].used(),
        }
    }

    /// Record the current position as the target of the next [`Arena::reset`].
    pub fn mark_reset_position(&mut self) {
        self.reset_mark = self.checkpoint();
    }

    /// Rewind to the last marked reset position (the arena's start if
    /// no mark was ever taken).
    pub fn reset(&mut self) {
        self.rewind_to(self.reset_mark);
    }

    /// Rewind to an arbitrary previously captured checkpoint.
    ///
    /// Every block after the checkpoint's is dropped; the checkpoint's
    /// block is truncated back to the recorded cursor (poisoned with
    /// `0xCD` in debug builds). If the reset mark pointed past the
    /// target it is pulled back to the target, so a later
    /// [`Arena::reset`] cannot move forward.
    ///
    /// # Panics
    ///
    /// Panics if the checkpoint is not an ancestor of the current
    /// state: its block no longer exists, or its cursor is past that
    /// block's current cursor. A checkpoint from another arena is
    /// indistinguishable from a stale one and falls under the same
    /// caller contract.
    pub fn rewind_to(&mut self, to: Checkpoint) {
        assert!(
            to.block < self.blocks.len(),
            "rewind target block {} does not exist (chain has {} blocks); \
             checkpoint is not an ancestor of the current state",
            to.block,
            self.blocks.len()
        );
        self.blocks.truncate(to.block + 1);
        self.blocks[to.block].truncate(to.used);

        if self.reset_mark.block > to.block
            || (self.reset_mark.block == to.block && self.reset_mark.used > to.used)
        {
            self.reset_mark = to;
        }
    }

    /// Memory usage summary.
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            block_count: self.blocks.len(),
            used_bytes: self.blocks.iter().map(Block::used).sum(),
            capacity_bytes: self.blocks.iter().map(Block::capacity).sum(),
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_within_first_block() {
        let mut arena = Arena::with_min_block_size(1024);
        let h = arena.alloc(10);
        assert_eq!(h.len(), 10);
        assert!(arena.bytes(h).iter().all(|&b| b == 0));
        assert_eq!(arena.stats().block_count, 1);
    }

    #[test]
    fn zero_alloc_returns_empty_handle() {
        let mut arena = Arena::with_min_block_size(64);
        let before = arena.stats().used_bytes;
        let h = arena.alloc(0);
        assert!(h.is_empty());
        assert_eq!(arena.stats().used_bytes, before);
        assert!(arena.bytes(h).is_empty());
    }

    #[test]
    fn overflow_pushes_new_block() {
        let mut arena = Arena::with_min_block_size(100);
        arena.alloc(80);
        let h = arena.alloc(50);
        assert_eq!(arena.stats().block_count, 2);
        assert_eq!(arena.bytes(h).len(), 50);
    }

    #[test]
    fn oversized_request_gets_a_block_its_own_size() {
        let mut arena = Arena::with_min_block_size(100);
        let h = arena.alloc(400);
        assert_eq!(h.len(), 400);
        let stats = arena.stats();
        assert_eq!(stats.block_count, 2);
        // The new block is sized to the request, not the minimum.
        assert!(stats.capacity_bytes >= 100 + 400);
    }

    #[test]
    fn small_allocs_stay_in_current_block_while_room_remains() {
        let mut arena = Arena::with_min_block_size(1024);
        for _ in 0..10 {
            arena.alloc(64);
        }
        assert_eq!(arena.stats().block_count, 1);
        assert_eq!(arena.stats().used_bytes, 640);
    }

    #[test]
    #[should_panic(expected = "1 GiB limit")]
    fn gigabyte_alloc_is_fatal() {
        let mut arena = Arena::new();
        arena.alloc(1 << 30);
    }

    #[test]
    fn reset_restores_marked_position() {
        let mut arena = Arena::with_min_block_size(256);
        arena.alloc(100);
        arena.mark_reset_position();
        let marked = arena.stats().used_bytes;

        arena.alloc(100);
        arena.alloc(300); // forces a second block
        assert_eq!(arena.stats().block_count, 2);

        arena.reset();
        assert_eq!(arena.stats().used_bytes, marked);
        assert_eq!(arena.stats().block_count, 1, "later blocks released");
    }

    #[test]
    fn reset_without_mark_rewinds_to_start() {
        let mut arena = Arena::with_min_block_size(128);
        arena.alloc(100);
        arena.alloc(200);
        arena.reset();
        assert_eq!(arena.stats().used_bytes, 0);
        assert_eq!(arena.stats().block_count, 1);
    }

    #[test]
    fn rewind_to_arbitrary_checkpoint() {
        let mut arena = Arena::with_min_block_size(128);
        arena.alloc(50);
        let cp = arena.checkpoint();
        arena.alloc(50);
        arena.alloc(500);
        arena.rewind_to(cp);
        assert_eq!(arena.stats().used_bytes, 50);
    }

    #[test]
    fn rewind_pulls_back_a_later_reset_mark() {
        let mut arena = Arena::with_min_block_size(128);
        arena.alloc(10);
        let cp = arena.checkpoint();
        arena.alloc(10);
        arena.mark_reset_position(); // mark is now past cp
        arena.rewind_to(cp);
        arena.alloc(30);
        arena.reset(); // must rewind to cp, not the stale mark
        assert_eq!(arena.stats().used_bytes, 10);
    }

    #[test]
    #[should_panic(expected = "not an ancestor")]
    fn rewind_to_dropped_block_is_fatal() {
        let mut arena = Arena::with_min_block_size(64);
        arena.alloc(60);
        arena.alloc(60); // second block
        let cp = arena.checkpoint();
        arena.reset(); // back to block 0, start
        arena.rewind_to(cp);
    }

    #[test]
    #[should_panic(expected = "past the cursor")]
    fn rewind_forward_within_block_is_fatal() {
        let mut arena = Arena::with_min_block_size(1024);
        arena.alloc(100);
        let cp = arena.checkpoint();
        arena.reset(); // back to start
        arena.rewind_to(cp);
    }

    #[test]
    fn realloc_after_reset_is_zeroed() {
        let mut arena = Arena::with_min_block_size(1024);
        let h = arena.alloc(32);
        arena.bytes_mut(h).fill(0xFF);
        arena.reset();
        let h2 = arena.alloc(32);
        assert!(arena.bytes(h2).iter().all(|&b| b == 0));
    }

    #[test]
    fn string_interning_round_trip() {
        let mut arena = Arena::new();
        let h = arena.alloc_str("residential_zone");
        assert_eq!(arena.str_of(h), "residential_zone");
        assert_eq!(h.len(), 16);
    }

    #[test]
    fn empty_string_does_not_allocate() {
        let mut arena = Arena::new();
        let before = arena.stats().used_bytes;
        let h = arena.alloc_str("");
        assert!(h.is_empty());
        assert_eq!(arena.str_of(h), "");
        assert_eq!(arena.stats().used_bytes, before);
    }

    #[test]
    fn handles_into_earlier_blocks_survive_growth() {
        let mut arena = Arena::with_min_block_size(64);
        let h = arena.alloc_str("power_plant");
        for _ in 0..20 {
            arena.alloc(48); // spill into fresh blocks
        }
        assert_eq!(arena.str_of(h), "power_plant");
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn reset_restores_used_bytes(
                before in proptest::collection::vec(1usize..512, 0..12),
                after in proptest::collection::vec(1usize..512, 1..12),
            ) {
                let mut arena = Arena::with_min_block_size(256);
                for len in before {
                    arena.alloc(len);
                }
                arena.mark_reset_position();
                let marked = arena.stats();
                for len in after {
                    arena.alloc(len);
                }
                arena.reset();
                prop_assert_eq!(arena.stats().used_bytes, marked.used_bytes);
                prop_assert_eq!(arena.stats().block_count, marked.block_count);
            }

            #[test]
            fn used_bytes_equals_sum_of_requests(
                lens in proptest::collection::vec(0usize..300, 0..20),
            ) {
                let mut arena = Arena::with_min_block_size(128);
                for &len in &lens {
                    arena.alloc(len);
                }
                let total: usize = lens.iter().sum();
                prop_assert_eq!(arena.stats().used_bytes, total);
            }
        }
    }
}
