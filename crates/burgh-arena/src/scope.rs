//! Scoped arena lifetimes: checkpoint on enter, rewind on drop.

use crate::arena::{Arena, Checkpoint};
use crate::handle::{BlobHandle, StrHandle};

/// A drop guard giving stack-like lifetimes over a shared arena.
///
/// The frame loop enters a scope on the shared temp arena at the top
/// of the frame and passes it down to whatever needs scratch space —
/// render command assembly, pathfinding working sets, UI layout.
/// Dropping the scope rewinds the arena to where it was on entry, so
/// deallocation is deterministic and visible at the call site instead
/// of hiding behind a process-wide "temp arena" global.
///
/// Scopes nest: an inner scope borrows the arena back out of the outer
/// one via [`ArenaScope::arena`], and the borrow checker enforces the
/// LIFO discipline that makes the rewinds well-ordered.
///
/// ```
/// use burgh_arena::{Arena, ArenaScope};
///
/// let mut temp = Arena::new();
/// {
///     let mut frame = ArenaScope::enter(&mut temp);
///     let scratch = frame.alloc(4096);
///     assert_eq!(frame.bytes(scratch).len(), 4096);
///     {
///         let mut pass = ArenaScope::enter(frame.arena());
///         pass.alloc(1024);
///     } // pass scratch released here
/// } // frame scratch released here
/// assert_eq!(temp.stats().used_bytes, 0);
/// ```
#[must_use]
pub struct ArenaScope<'a> {
    arena: &'a mut Arena,
    mark: Checkpoint,
}

impl<'a> ArenaScope<'a> {
    /// Enter a scope, capturing the arena's current position.
    pub fn enter(arena: &'a mut Arena) -> Self {
        let mark = arena.checkpoint();
        Self { arena, mark }
    }

    /// Allocate `len` zero-initialised bytes; released when the scope
    /// drops.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Arena::alloc`].
    pub fn alloc(&mut self, len: usize) -> BlobHandle {
        self.arena.alloc(len)
    }

    /// Copy a string into the scope's region of the arena.
    pub fn alloc_str(&mut self, s: &str) -> StrHandle {
        self.arena.alloc_str(s)
    }

    /// Resolve a handle allocated in this scope (or any enclosing one).
    pub fn bytes(&self, handle: BlobHandle) -> &[u8] {
        self.arena.bytes(handle)
    }

    /// Mutable counterpart of [`ArenaScope::bytes`].
    pub fn bytes_mut(&mut self, handle: BlobHandle) -> &mut [u8] {
        self.arena.bytes_mut(handle)
    }

    /// Resolve a string handle.
    pub fn str_of(&self, handle: StrHandle) -> &str {
        self.arena.str_of(handle)
    }

    /// Reborrow the underlying arena, e.g. to enter a nested scope.
    ///
    /// Rewinding the arena past this scope's entry point through the
    /// reborrow makes the scope's own drop rewind fatal.
    pub fn arena(&mut self) -> &mut Arena {
        self.arena
    }
}

impl Drop for ArenaScope<'_> {
    fn drop(&mut self) {
        self.arena.rewind_to(self.mark);
    }
}
