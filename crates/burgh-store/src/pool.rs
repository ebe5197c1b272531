//! Object pool: a slab with an external LIFO free list.
//!
//! Recycling bookkeeping lives in the pool, not in the payload type —
//! items carry no intrusive list pointers and need only implement
//! [`Reusable`].

use std::fmt;

/// A type that can be recycled through a [`Pool`].
///
/// `Default` constructs a fresh item when the pool grows; [`reset`]
/// returns an item to a blank state before reuse and before it parks
/// in the free list. `reset` must drop or clear anything referencing
/// state outside the pool (handles into other containers, cached
/// indices) so a recycled item never acts on a previous user's data.
///
/// [`reset`]: Reusable::reset
pub trait Reusable: Default {
    /// Clear the item back to a blank state.
    fn reset(&mut self);
}

/// Index of an item within a [`Pool`].
///
/// Valid from [`Pool::obtain`] until the matching [`Pool::discard`];
/// the slot may then be handed to a different caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct PoolIndex(pub(crate) u32);

impl fmt::Display for PoolIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One pool slot: the item plus whether a caller currently owns it.
struct PoolSlot<T> {
    item: T,
    live: bool,
}

/// A slab of reusable objects with an external free list.
///
/// [`Pool::obtain`] pops the most recently discarded slot (LIFO, so
/// recently touched memory is favoured) or grows the slab by one;
/// either way the item has been [`reset`](Reusable::reset) before the
/// caller sees it. The pool never shrinks. Used for render-buffer
/// segments and per-sector simulation scratch objects, where the same
/// handful of objects cycles every frame.
pub struct Pool<T> {
    /// All slots ever created, live and parked.
    slots: Vec<PoolSlot<T>>,
    /// Indices of parked slots, most recently discarded last.
    free: Vec<u32>,
    /// Total slots ever created (diagnostics).
    created: usize,
}

impl<T: Reusable> Pool<T> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            created: 0,
        }
    }

    /// Take an item from the pool, recycling the most recently
    /// discarded one if any, growing the slab otherwise.
    ///
    /// The returned item is reset; the caller finishes initialising it
    /// through the mutable reference.
    pub fn obtain(&mut self) -> (PoolIndex, &mut T) {
        let index = if let Some(index) = self.free.pop() {
            self.slots[index as usize].live = true;
            index
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(PoolSlot {
                item: T::default(),
                live: true,
            });
            self.created += 1;
            index
        };
        let item = &mut self.slots[index as usize].item;
        item.reset();
        (PoolIndex(index), item)
    }

    /// Return an item to the pool.
    ///
    /// The item is reset immediately so it holds nothing while parked.
    ///
    /// # Panics
    ///
    /// Panics if the slot is not live — discarding twice, or passing
    /// an index from another pool, is a programming error.
    pub fn discard(&mut self, index: PoolIndex) {
        let slot = &mut self.slots[index.0 as usize];
        assert!(slot.live, "pool slot {index} discarded while not live");
        slot.item.reset();
        slot.live = false;
        self.free.push(index.0);
    }

    /// Shared access to a live item, `None` if the slot is parked or
    /// out of range.
    pub fn get(&self, index: PoolIndex) -> Option<&T> {
        let slot = self.slots.get(index.0 as usize)?;
        slot.live.then_some(&slot.item)
    }

    /// Mutable access to a live item.
    pub fn get_mut(&mut self, index: PoolIndex) -> Option<&mut T> {
        let slot = self.slots.get_mut(index.0 as usize)?;
        slot.live.then_some(&mut slot.item)
    }

    /// Number of parked items ready for reuse.
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Total items ever created by this pool.
    pub fn created_total(&self) -> usize {
        self.created
    }

    /// Number of items currently held by callers.
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl<T: Reusable> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stand-in for a render-buffer segment: a payload plus a cached
    /// reference into external state that reset must clear.
    #[derive(Default)]
    struct Segment {
        commands: Vec<u32>,
        bound_target: Option<u32>,
    }

    impl Reusable for Segment {
        fn reset(&mut self) {
            self.commands.clear();
            self.bound_target = None;
        }
    }

    #[test]
    fn obtain_grows_then_recycles() {
        let mut pool: Pool<Segment> = Pool::new();
        let (a, _) = pool.obtain();
        let (b, _) = pool.obtain();
        assert_ne!(a, b);
        assert_eq!(pool.created_total(), 2);
        assert_eq!(pool.live_count(), 2);

        pool.discard(a);
        assert_eq!(pool.available(), 1);

        // Recycling must not create a new slot.
        let (c, _) = pool.obtain();
        assert_eq!(c, a, "most recently discarded slot is reused");
        assert_eq!(pool.created_total(), 2);
    }

    #[test]
    fn lifo_reuse_order() {
        let mut pool: Pool<Segment> = Pool::new();
        let (a, _) = pool.obtain();
        let (b, _) = pool.obtain();
        pool.discard(a);
        pool.discard(b);
        let (first, _) = pool.obtain();
        assert_eq!(first, b, "last discarded comes back first");
        let (second, _) = pool.obtain();
        assert_eq!(second, a);
    }

    #[test]
    fn recycled_items_are_reset() {
        let mut pool: Pool<Segment> = Pool::new();
        let (index, segment) = pool.obtain();
        segment.commands.extend([1, 2, 3]);
        segment.bound_target = Some(9);
        pool.discard(index);

        let (_, recycled) = pool.obtain();
        assert!(recycled.commands.is_empty());
        assert_eq!(recycled.bound_target, None);
    }

    #[test]
    fn get_distinguishes_live_and_parked() {
        let mut pool: Pool<Segment> = Pool::new();
        let (index, _) = pool.obtain();
        assert!(pool.get(index).is_some());
        pool.discard(index);
        assert!(pool.get(index).is_none());
        assert!(pool.get_mut(index).is_none());
    }

    #[test]
    fn get_out_of_range_is_none() {
        let pool: Pool<Segment> = Pool::new();
        assert!(pool.get(PoolIndex(3)).is_none());
    }

    #[test]
    #[should_panic(expected = "not live")]
    fn double_discard_is_fatal() {
        let mut pool: Pool<Segment> = Pool::new();
        let (index, _) = pool.obtain();
        pool.discard(index);
        pool.discard(index);
    }

    #[test]
    fn steady_state_churn_never_grows() {
        let mut pool: Pool<Segment> = Pool::new();
        // Warm up with 4 live items.
        let indices: Vec<PoolIndex> = (0..4).map(|_| pool.obtain().0).collect();
        for index in indices {
            pool.discard(index);
        }
        // 100 frames of obtain/discard cycles.
        for _ in 0..100 {
            let held: Vec<PoolIndex> = (0..4).map(|_| pool.obtain().0).collect();
            for index in held {
                pool.discard(index);
            }
        }
        assert_eq!(pool.created_total(), 4);
        assert_eq!(pool.available(), 4);
    }
}
