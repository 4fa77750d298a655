//! Set-Associative Data Cache Simulator.
//!
//! This module implements a configurable set-associative cache that holds real
//! data. It supports LRU, FIFO and Random replacement and models the following:
//! 1. **Lookup:** Tag match across the ways of the addressed set.
//! 2. **Write Policy:** Write-through with write-allocate; the backing store is never stale.
//! 3. **Miss Classification:** Read misses split into compulsory, capacity and conflict.
//! 4. **Fill/Evict:** First invalid way, otherwise the policy's victim, refilled in place.

/// Cache line storage.
pub mod line;

/// Read miss classification.
pub mod miss;

/// Cache replacement policy implementations (FIFO, LRU, Random).
pub mod policies;

use tracing::{debug, trace};

pub use self::line::CacheLine;
pub use self::miss::{MissKind, ReadOutcome, classify_miss};

use self::policies::ReplacementPolicy;
use crate::common::addr::{DecodedAddr, WordAddr};
use crate::common::constants::FIRST_STAMP;
use crate::common::data::AccessType;
use crate::common::error::SimResult;
use crate::config::{Config, Geometry};
use crate::soc::memory::BackingStore;
use crate::stats::CacheStats;

/// Cache simulator implementing a set-associative, write-through, write-allocate cache.
///
/// Owns its backing store, its replacement policy, and the recency counter used
/// to stamp lines, so independent instances never share state.
#[derive(Debug)]
pub struct CacheSim {
    geometry: Geometry,
    /// Set `s` occupies `lines[s * ways .. (s + 1) * ways]`.
    lines: Vec<CacheLine>,
    memory: BackingStore,
    policy: Box<dyn ReplacementPolicy>,
    /// Next recency stamp to hand out.
    clock: u64,
    stats: CacheStats,
}

impl CacheSim {
    /// Creates a new cache simulator with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache geometry, replacement policy, seed and backing store size.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`](crate::common::SimError::Configuration) if the
    /// geometry cannot be resolved or the backing store cannot be split into blocks.
    pub fn new(config: &Config) -> SimResult<Self> {
        let geometry = config.geometry()?;
        let memory = BackingStore::new(config.memory.words, geometry.block_words)?;
        Ok(Self::with_memory(geometry, memory, config.cache.seed))
    }

    /// Creates a cache over an existing backing store.
    ///
    /// The store's block size must match `geometry.block_words`.
    pub fn with_memory(geometry: Geometry, memory: BackingStore, seed: u64) -> Self {
        debug_assert_eq!(memory.block_words(), geometry.block_words);
        debug!(%geometry, memory_blocks = memory.blocks(), "constructing data cache");
        Self {
            lines: vec![CacheLine::new(geometry.block_words); geometry.total_lines()],
            policy: policies::build(geometry.policy, seed),
            geometry,
            memory,
            clock: FIRST_STAMP,
            stats: CacheStats::default(),
        }
    }

    /// Geometry the cache was built with.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Hit, miss and fill counters accumulated so far.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// The backing store behind the cache.
    pub const fn memory(&self) -> &BackingStore {
        &self.memory
    }

    /// The lines of one set, in way order.
    ///
    /// # Panics
    ///
    /// Panics if `set` is not below `geometry().sets`.
    pub fn set(&self, set: usize) -> &[CacheLine] {
        let base = set * self.geometry.ways;
        &self.lines[base..base + self.geometry.ways]
    }

    /// Checks if the block containing `addr` is resident. Does not touch recency or counters.
    pub fn contains(&self, addr: WordAddr) -> bool {
        self.lookup(&self.geometry.decode(addr)).is_some()
    }

    /// Reads one word.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`](crate::common::SimError::OutOfRange) if the
    /// block is beyond the backing store.
    pub fn read(&mut self, addr: WordAddr) -> SimResult<f64> {
        self.read_outcome(addr).map(|(value, _)| value)
    }

    /// Reads one word and reports whether it hit or how it missed.
    ///
    /// On a hit, LRU restamps the line. On a miss the block is fetched (which
    /// consumes its first-read flag), the miss is classified against the fill
    /// count before installation, and the block is installed.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`](crate::common::SimError::OutOfRange) if the
    /// block is beyond the backing store.
    pub fn read_outcome(&mut self, addr: WordAddr) -> SimResult<(f64, ReadOutcome)> {
        let decoded = self.geometry.decode(addr);
        if let Some(idx) = self.lookup(&decoded) {
            self.stats.read_hits += 1;
            self.touch(idx);
            return Ok((self.lines[idx].data[decoded.offset], ReadOutcome::Hit));
        }

        let (block, first) = self.memory.read_block(decoded.block, AccessType::Read)?;
        let (idx, fresh) = select_line(
            &self.lines,
            self.geometry.ways,
            decoded.set,
            self.policy.as_mut(),
        );
        let kind = classify_miss(first, self.stats.blocks_filled, self.geometry.total_lines());
        self.stats.record_miss(kind);
        trace!(%addr, block = decoded.block, set = decoded.set, %kind, "read miss");

        self.lines[idx].data.copy_from_slice(block);
        self.install(idx, decoded.tag, fresh);
        Ok((self.lines[idx].data[decoded.offset], ReadOutcome::Miss(kind)))
    }

    /// Writes one word through to the backing store.
    ///
    /// A hit updates the resident line (LRU restamps it). A miss fetches the
    /// block without consuming its first-read flag, installs it, then updates
    /// it. Either way the whole block is mirrored to the backing store. Write
    /// misses are counted but never classified.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`](crate::common::SimError::OutOfRange) if the
    /// block is beyond the backing store.
    pub fn write(&mut self, addr: WordAddr, value: f64) -> SimResult<()> {
        let decoded = self.geometry.decode(addr);
        let idx = if let Some(idx) = self.lookup(&decoded) {
            self.stats.write_hits += 1;
            self.touch(idx);
            idx
        } else {
            let (block, _) = self.memory.read_block(decoded.block, AccessType::Write)?;
            let (idx, fresh) = select_line(
                &self.lines,
                self.geometry.ways,
                decoded.set,
                self.policy.as_mut(),
            );
            self.stats.write_misses += 1;
            trace!(%addr, block = decoded.block, set = decoded.set, "write miss");
            self.lines[idx].data.copy_from_slice(block);
            self.install(idx, decoded.tag, fresh);
            idx
        };

        let line = &mut self.lines[idx];
        line.data[decoded.offset] = value;
        self.memory.write_block(decoded.block, &line.data)
    }

    /// Invalidates every line, zeroes all counters and forgets which blocks were read.
    ///
    /// Backing store contents are kept, so data written before the reset is
    /// still visible afterwards.
    pub fn reset(&mut self) {
        debug!(stats = ?self.stats, "resetting data cache");
        for line in &mut self.lines {
            line.clear();
        }
        self.stats = CacheStats::default();
        self.memory.clear_read_flags();
    }

    /// Finds the line holding `decoded`'s block, returning its index into `lines`.
    fn lookup(&self, decoded: &DecodedAddr) -> Option<usize> {
        let base = decoded.set * self.geometry.ways;
        self.lines[base..base + self.geometry.ways]
            .iter()
            .position(|line| line.holds(decoded.tag))
            .map(|way| base + way)
    }

    /// Marks a freshly loaded line valid under `tag` and stamps it.
    fn install(&mut self, idx: usize, tag: u64, fresh: bool) {
        let stamp = self.next_stamp();
        let line = &mut self.lines[idx];
        if fresh {
            self.stats.blocks_filled += 1;
        } else {
            trace!(
                set = idx / self.geometry.ways,
                way = idx % self.geometry.ways,
                victim_tag = line.tag,
                tag,
                "evicting line"
            );
        }
        line.valid = true;
        line.tag = tag;
        line.stamp = stamp;
    }

    /// Applies the policy's hit-time recency update.
    fn touch(&mut self, idx: usize) {
        if self.policy.refreshes_on_hit() {
            let stamp = self.next_stamp();
            self.lines[idx].stamp = stamp;
        }
    }

    fn next_stamp(&mut self) -> u64 {
        let stamp = self.clock;
        self.clock += 1;
        stamp
    }
}

/// Picks the line a new block goes into: the first invalid way, or the
/// policy's victim if the set is full. The bool is `true` for an invalid way.
///
/// Called only once the block has been fetched, so a failed access never
/// advances the policy.
fn select_line(
    lines: &[CacheLine],
    ways: usize,
    set: usize,
    policy: &mut dyn ReplacementPolicy,
) -> (usize, bool) {
    let base = set * ways;
    let set_lines = &lines[base..base + ways];
    if let Some(way) = set_lines.iter().position(|line| !line.valid) {
        return (base + way, true);
    }
    (base + policy.get_victim(set_lines), false)
}
