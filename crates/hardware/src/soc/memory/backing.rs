//! Backing Store Implementation.
//!
//! The backing store holds every word the workload can address, grouped into
//! blocks of the cache's block size. Each block carries a "previously read"
//! flag: the first read of a block is what makes a miss compulsory. Writes
//! never touch the flag, so a block that was only ever written still reports
//! a compulsory miss the first time it is read.

use tracing::trace;

use crate::common::constants::SEED_PERIOD;
use crate::common::data::AccessType;
use crate::common::error::{SimError, SimResult};

/// Block-addressed main memory.
#[derive(Debug, Clone)]
pub struct BackingStore {
    /// Word contents, block after block.
    words: Vec<f64>,
    /// One flag per block; set by the first read.
    read_before: Vec<bool>,
    /// Words per block.
    block_words: usize,
}

impl BackingStore {
    /// Creates a backing store of `words` words split into blocks of `block_words`.
    ///
    /// Word `i` is seeded with `i % 100` so loads return recognizable values.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if `block_words` is zero or does not
    /// evenly divide a non-zero `words`.
    pub fn new(words: usize, block_words: usize) -> SimResult<Self> {
        if block_words == 0 || words == 0 || words % block_words != 0 {
            return Err(SimError::Configuration(format!(
                "backing store of {words} words cannot be split into {block_words}-word blocks"
            )));
        }
        Ok(Self {
            words: (0..words as u64).map(|i| (i % SEED_PERIOD) as f64).collect(),
            read_before: vec![false; words / block_words],
            block_words,
        })
    }

    /// Number of blocks in the store.
    pub fn blocks(&self) -> u64 {
        self.read_before.len() as u64
    }

    /// Words per block.
    pub const fn block_words(&self) -> usize {
        self.block_words
    }

    /// Fetches a block for the cache.
    ///
    /// For [`AccessType::Read`] the block's first-access flag is consumed: the
    /// returned bool is `true` exactly once per block (until
    /// [`clear_read_flags`](Self::clear_read_flags)). For [`AccessType::Write`]
    /// the flag is left alone and `false` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`] if `block` is beyond the end of the store.
    pub fn read_block(&mut self, block: u64, access: AccessType) -> SimResult<(&[f64], bool)> {
        let index = self.check(block)?;
        let first = match access {
            AccessType::Read => !std::mem::replace(&mut self.read_before[index], true),
            AccessType::Write => false,
        };
        if first {
            trace!(block, "first read of block");
        }
        let start = index * self.block_words;
        Ok((&self.words[start..start + self.block_words], first))
    }

    /// Overwrites a block. The first-access flag is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`] if `block` is beyond the end of the store.
    pub fn write_block(&mut self, block: u64, data: &[f64]) -> SimResult<()> {
        let index = self.check(block)?;
        debug_assert_eq!(data.len(), self.block_words);
        let start = index * self.block_words;
        self.words[start..start + self.block_words].copy_from_slice(data);
        Ok(())
    }

    /// Returns a block's contents without affecting its first-access flag.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`] if `block` is beyond the end of the store.
    pub fn block(&self, block: u64) -> SimResult<&[f64]> {
        let index = self.check(block)?;
        let start = index * self.block_words;
        Ok(&self.words[start..start + self.block_words])
    }

    /// Whether `block` has been read since construction or the last flag reset.
    pub fn was_read(&self, block: u64) -> bool {
        self.read_before
            .get(block as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Forgets every first-access flag, so the next read of each block is compulsory again.
    pub fn clear_read_flags(&mut self) {
        self.read_before.fill(false);
    }

    /// Bounds-checks a block address and converts it to an index.
    fn check(&self, block: u64) -> SimResult<usize> {
        if block < self.blocks() {
            Ok(block as usize)
        } else {
            Err(SimError::OutOfRange {
                block,
                blocks: self.blocks(),
            })
        }
    }
}
