//! Word addresses and their cache decomposition.
//!
//! Memory is word-addressed: address `n` names the `n`th 8-byte word. A cache
//! geometry splits a word address into the following:
//! 1. **Tag:** Identifies which block occupies a line.
//! 2. **Set:** Selects the group of lines the block may live in.
//! 3. **Offset:** Selects the word within the block.
//! 4. **Block:** The backing store block holding the word.

use std::fmt;

/// An index of one word in the flat, word-addressed memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WordAddr(pub u64);

impl WordAddr {
    /// Creates a word address from a raw word index.
    #[inline]
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the raw word index.
    #[inline]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Splits the address for a cache with `block_words` words per block and `sets` sets.
    ///
    /// # Panics
    ///
    /// Divides by `block_words` and `sets`; both are guaranteed non-zero by
    /// [`Geometry`](crate::config::Geometry), which is the only caller outside tests.
    #[inline]
    pub const fn decompose(self, block_words: usize, sets: usize) -> DecodedAddr {
        let block_words = block_words as u64;
        let sets = sets as u64;
        let block = self.0 / block_words;
        DecodedAddr {
            tag: self.0 / (block_words * sets),
            set: (block % sets) as usize,
            offset: (self.0 % block_words) as usize,
            block,
        }
    }
}

impl From<u64> for WordAddr {
    fn from(index: u64) -> Self {
        Self(index)
    }
}

impl fmt::Display for WordAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "word {:#x}", self.0)
    }
}

/// A word address split into the fields the cache operates on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddr {
    /// Tag stored in the line that holds this block.
    pub tag: u64,
    /// Index of the set this block maps to.
    pub set: usize,
    /// Word position within the block.
    pub offset: usize,
    /// Backing store block address.
    pub block: u64,
}
