//! String-keyed open-addressing hash table with tombstone deletion.

use burgh_arena::{Arena, StrHandle};

/// Capacity of the first allocated slot array; growth doubles from here.
const MIN_CAPACITY: usize = 8;

/// Maximum load factor 3/4, expressed as a ratio to stay in integers.
const MAX_LOAD_NUM: usize = 3;
const MAX_LOAD_DEN: usize = 4;

/// FNV-1a, 64-bit. Cheap, deterministic, and good enough for asset
/// names and setting keys; collisions are handled by probing, not
/// avoided by hash quality.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let mut hash = OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// One table slot. The explicit three-state enum makes it impossible
/// to read a value out of an empty or deleted slot.
enum Slot<V> {
    /// Never occupied; terminates probe sequences.
    Empty,
    /// Deleted. Keeps probe sequences intact for keys that hashed past
    /// this slot, and is preferred for recycling on insert.
    Tombstone,
    /// Live entry.
    Occupied {
        /// Cached key hash, compared before the key bytes.
        hash: u64,
        /// Key bytes, interned in the table's private arena.
        key: StrHandle,
        /// The value.
        value: V,
    },
}

/// Where a probe for a key ended up.
enum Probe {
    /// The key is present at this slot.
    Found(usize),
    /// The key is absent; this is the slot an insert should claim
    /// (the first tombstone on the probe path, else the empty slot
    /// that terminated it).
    Vacant(usize),
}

/// String-keyed map: open addressing, linear probing, tombstones.
///
/// Keys are interned into a private [`Arena`] owned by the table, so
/// the table and its key bytes share one lifetime; individual keys are
/// never reclaimed, only the whole table (removal is rare and
/// re-insertion of the same key is common — asset names, settings).
///
/// Lookup compares the cached hash before the key bytes, so probe
/// mismatches cost one integer compare. The table grows (doubling,
/// minimum 8) before an insert would push the live count past 3/4 of
/// capacity; it never shrinks.
pub struct HashTable<V> {
    /// Slot array; length is the capacity, always zero or a multiple
    /// of [`MIN_CAPACITY`].
    slots: Vec<Slot<V>>,
    /// Number of occupied (non-tombstone) slots.
    len: usize,
    /// Private arena owning every interned key.
    keys: Arena,
}

impl<V> HashTable<V> {
    /// Create an empty table. No slots are allocated until the first
    /// insert.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
            keys: Arena::with_min_block_size(1024),
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table has no live entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current slot capacity.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Insert or replace. Returns the previous value if the key was
    /// already present.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        self.grow_if_needed();
        let hash = fnv1a(key.as_bytes());
        match self.probe(hash, key) {
            Probe::Found(slot) => {
                let Slot::Occupied { value: old, .. } = &mut self.slots[slot] else {
                    unreachable!("probe returned Found for a non-occupied slot");
                };
                Some(std::mem::replace(old, value))
            }
            Probe::Vacant(slot) => {
                let key = self.keys.alloc_str(key);
                self.slots[slot] = Slot::Occupied { hash, key, value };
                self.len += 1;
                None
            }
        }
    }

    /// Look up the value for `key`, inserting `default()` first if the
    /// key is absent. Returns a mutable reference either way.
    pub fn entry_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> V) -> &mut V {
        self.grow_if_needed();
        let hash = fnv1a(key.as_bytes());
        let slot = match self.probe(hash, key) {
            Probe::Found(slot) => slot,
            Probe::Vacant(slot) => {
                let key = self.keys.alloc_str(key);
                self.slots[slot] = Slot::Occupied {
                    hash,
                    key,
                    value: default(),
                };
                self.len += 1;
                slot
            }
        };
        let Slot::Occupied { value, .. } = &mut self.slots[slot] else {
            unreachable!("slot was just found or filled");
        };
        value
    }

    /// Shared access to the value for `key`; `None` if absent — the
    /// one genuinely soft path in the substrate, because "not present"
    /// is a normal outcome.
    pub fn get(&self, key: &str) -> Option<&V> {
        let hash = fnv1a(key.as_bytes());
        match self.probe(hash, key) {
            Probe::Found(slot) => match &self.slots[slot] {
                Slot::Occupied { value, .. } => Some(value),
                _ => None,
            },
            Probe::Vacant(_) => None,
        }
    }

    /// Mutable access to the value for `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let hash = fnv1a(key.as_bytes());
        match self.probe(hash, key) {
            Probe::Found(slot) => match &mut self.slots[slot] {
                Slot::Occupied { value, .. } => Some(value),
                _ => None,
            },
            Probe::Vacant(_) => None,
        }
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        matches!(
            self.probe(fnv1a(key.as_bytes()), key),
            Probe::Found(_)
        )
    }

    /// Remove the entry for `key`, returning its value.
    ///
    /// The slot becomes a tombstone; the interned key bytes stay in
    /// the table's arena until the table is dropped.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let hash = fnv1a(key.as_bytes());
        match self.probe(hash, key) {
            Probe::Found(slot) => {
                let Slot::Occupied { value, .. } =
                    std::mem::replace(&mut self.slots[slot], Slot::Tombstone)
                else {
                    unreachable!("probe returned Found for a non-occupied slot");
                };
                self.len -= 1;
                Some(value)
            }
            Probe::Vacant(_) => None,
        }
    }

    /// Iterate over `(key, &value)` pairs, skipping empty and
    /// tombstoned slots. Order is the table's internal slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied { key, value, .. } => Some((self.keys.str_of(*key), value)),
            _ => None,
        })
    }

    /// Linear probe from `hash % capacity`, at most one full lap.
    ///
    /// Tracks the first tombstone seen so insertion recycles it,
    /// bounding probe-sequence growth over time. With the load factor
    /// below 1 an occupied match or a vacant candidate always exists
    /// within one lap.
    fn probe(&self, hash: u64, key: &str) -> Probe {
        let capacity = self.slots.len();
        if capacity == 0 {
            return Probe::Vacant(0);
        }
        let mut first_tombstone = None;
        let mut slot = hash as usize % capacity;
        for _ in 0..capacity {
            match &self.slots[slot] {
                Slot::Empty => {
                    return Probe::Vacant(first_tombstone.unwrap_or(slot));
                }
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(slot);
                    }
                }
                Slot::Occupied {
                    hash: entry_hash,
                    key: entry_key,
                    ..
                } => {
                    if *entry_hash == hash && self.keys.str_of(*entry_key) == key {
                        return Probe::Found(slot);
                    }
                }
            }
            slot = (slot + 1) % capacity;
        }
        // A full lap without an empty slot: every slot is occupied or
        // tombstoned. The load factor caps occupied slots below
        // capacity, so a tombstone was seen.
        Probe::Vacant(first_tombstone.expect("full table lap must pass a tombstone"))
    }

    /// Grow before an insert would push the load factor past 3/4.
    fn grow_if_needed(&mut self) {
        let capacity = self.slots.len();
        if (self.len + 1) * MAX_LOAD_DEN <= capacity * MAX_LOAD_NUM {
            return;
        }
        let new_capacity = (capacity * 2).max(MIN_CAPACITY);

        let old = std::mem::replace(&mut self.slots, {
            let mut slots = Vec::with_capacity(new_capacity);
            slots.resize_with(new_capacity, || Slot::Empty);
            slots
        });

        // Re-place every occupied entry. Tombstones are dropped, and
        // key handles move as-is — the key arena is untouched.
        for slot in old {
            if let Slot::Occupied { hash, key, value } = slot {
                let mut target = hash as usize % new_capacity;
                while !matches!(self.slots[target], Slot::Empty) {
                    target = (target + 1) % new_capacity;
                }
                self.slots[target] = Slot::Occupied { hash, key, value };
            }
        }
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}
