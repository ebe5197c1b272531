//! Arena handles: copyable locations of blob and string allocations.
//!
//! A [`BlobHandle`] encodes `(block, offset, len)` — enough to resolve
//! a byte slice against the arena that produced it in O(1). Handles
//! are plain values: copying one never copies the underlying bytes.

use std::fmt;

/// Location of a byte allocation within an [`Arena`](crate::Arena).
///
/// Valid only for the arena that produced it, and only until that
/// arena is rewound past the allocation. Resolving a handle after a
/// rewind reads poisoned memory in debug builds and panics if the
/// handle's block no longer exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct BlobHandle {
    /// Index of the block within the arena's chain.
    pub(crate) block: u32,
    /// Byte offset within the block.
    pub(crate) offset: u32,
    /// Length in bytes.
    pub(crate) len: u32,
}

impl BlobHandle {
    /// The zero-length handle. Returned by zero-size allocations and
    /// resolved to an empty slice without touching any block.
    pub const EMPTY: Self = Self {
        block: 0,
        offset: 0,
        len: 0,
    };

    pub(crate) fn new(block: u32, offset: u32, len: u32) -> Self {
        Self { block, offset, len }
    }

    /// Length of the allocation in bytes.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether this is the zero-length handle.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for BlobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BlobHandle(block={}, off={}, len={})",
            self.block, self.offset, self.len
        )
    }
}

/// Location of an interned UTF-8 string within an [`Arena`](crate::Arena).
///
/// Produced by [`Arena::alloc_str`](crate::Arena::alloc_str); resolved
/// back to `&str` with [`Arena::str_of`](crate::Arena::str_of). Used by
/// the hash table to keep key bytes in a private arena, and by the
/// asset pipeline for interned asset names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct StrHandle(pub(crate) BlobHandle);

impl StrHandle {
    /// The empty-string handle.
    pub const EMPTY: Self = Self(BlobHandle::EMPTY);

    /// Length of the string in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StrHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StrHandle(block={}, off={}, len={})",
            self.0.block, self.0.offset, self.0.len
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_accessors() {
        let h = BlobHandle::new(2, 64, 16);
        assert_eq!(h.len(), 16);
        assert!(!h.is_empty());
    }

    #[test]
    fn empty_handle_is_empty() {
        assert!(BlobHandle::EMPTY.is_empty());
        assert_eq!(BlobHandle::EMPTY.len(), 0);
        assert!(StrHandle::EMPTY.is_empty());
    }

    #[test]
    fn handles_are_comparable_values() {
        let a = BlobHandle::new(0, 8, 4);
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, BlobHandle::new(0, 12, 4));
    }
}
