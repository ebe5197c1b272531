//! Fixed-size packed bitmap with a maintained set-bit count.

const WORD_BITS: usize = 64;

/// A fixed-size bitmap packed into `u64` words.
///
/// The number of set bits is maintained incrementally on every state
/// change, never recomputed by scanning, so "is this chunk full" and
/// "is this chunk empty" are O(1). The occupancy array leans on those
/// two fast paths for every insert.
#[derive(Clone, Debug)]
pub struct BitArray {
    /// Number of addressable bits.
    len: usize,
    /// Count of set bits. Invariant: always equals the true popcount.
    set_count: usize,
    /// Backing words. Bits at positions >= `len` are never set.
    words: Vec<u64>,
}

impl BitArray {
    /// Create a bitmap of `len` bits, all clear.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            set_count: 0,
            words: vec![0; len.div_ceil(WORD_BITS)],
        }
    }

    /// Number of addressable bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the bitmap has zero addressable bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of set bits. O(1).
    pub fn set_count(&self) -> usize {
        self.set_count
    }

    /// Whether every bit is set. O(1).
    pub fn all_set(&self) -> bool {
        self.set_count == self.len
    }

    /// Whether no bit is set. O(1).
    pub fn none_set(&self) -> bool {
        self.set_count == 0
    }

    /// Read bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn get(&self, index: usize) -> bool {
        self.bounds_check(index);
        self.words[index / WORD_BITS] >> (index % WORD_BITS) & 1 == 1
    }

    /// Set bit `index`. Returns whether the bit actually changed;
    /// setting an already-set bit is a no-op and does not touch the
    /// count.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn set(&mut self, index: usize) -> bool {
        self.bounds_check(index);
        let word = &mut self.words[index / WORD_BITS];
        let mask = 1u64 << (index % WORD_BITS);
        if *word & mask != 0 {
            return false;
        }
        *word |= mask;
        self.set_count += 1;
        true
    }

    /// Clear bit `index`. Returns whether the bit actually changed.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn clear(&mut self, index: usize) -> bool {
        self.bounds_check(index);
        let word = &mut self.words[index / WORD_BITS];
        let mask = 1u64 << (index % WORD_BITS);
        if *word & mask == 0 {
            return false;
        }
        *word &= !mask;
        self.set_count -= 1;
        true
    }

    /// Clear every bit.
    pub fn clear_all(&mut self) {
        self.words.fill(0);
        self.set_count = 0;
    }

    /// Index of the first set bit, or `None` if no bit is set.
    ///
    /// Word-wise linear scan, short-circuited entirely when the count
    /// says there is nothing to find.
    pub fn first_set(&self) -> Option<usize> {
        if self.set_count == 0 {
            return None;
        }
        for (wi, &word) in self.words.iter().enumerate() {
            if word != 0 {
                return Some(wi * WORD_BITS + word.trailing_zeros() as usize);
            }
        }
        unreachable!("set_count > 0 but no set bit found");
    }

    /// Index of the first clear bit, or `None` if every bit is set.
    pub fn first_clear(&self) -> Option<usize> {
        if self.set_count == self.len {
            return None;
        }
        for (wi, &word) in self.words.iter().enumerate() {
            let inverted = !word;
            if inverted != 0 {
                let index = wi * WORD_BITS + inverted.trailing_zeros() as usize;
                // The last word's high bits are beyond `len` and always
                // read as clear; the count check above guarantees a real
                // clear bit exists before them.
                if index < self.len {
                    return Some(index);
                }
            }
        }
        unreachable!("set_count < len but no clear bit found");
    }

    /// Iterate over the indices of set bits, ascending.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &word)| {
            (0..WORD_BITS)
                .filter(move |bit| word >> bit & 1 == 1)
                .map(move |bit| wi * WORD_BITS + bit)
        })
    }

    fn bounds_check(&self, index: usize) {
        assert!(
            index < self.len,
            "bit index {index} out of range for BitArray of {} bits",
            self.len
        );
    }
}
