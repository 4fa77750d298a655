//! Emulator: the instruction-counting front end over one data cache.
//!
//! Every load, store, add and multiply counts as one instruction. Loads and
//! stores go through the cache; the arithmetic operations never touch memory
//! and exist so that a kernel's instruction count reflects its ALU work too.

use tracing::debug;

use crate::common::addr::WordAddr;
use crate::common::error::SimResult;
use crate::config::{Associativity, Config, Geometry, ReplacementPolicy};
use crate::core::units::cache::CacheSim;
use crate::stats::SimStats;

/// Top-level simulator: one data cache plus the instruction counter.
#[derive(Debug)]
pub struct Emulator {
    /// The data cache (and, through it, the backing store).
    cache: CacheSim,
    /// Instructions issued since construction or the last reset.
    instructions: u64,
}

impl Emulator {
    /// Creates a new emulator from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`](crate::common::SimError::Configuration)
    /// if the geometry or memory size is invalid.
    pub fn new(config: &Config) -> SimResult<Self> {
        Ok(Self {
            cache: CacheSim::new(config)?,
            instructions: 0,
        })
    }

    /// Creates an emulator for the given cache parameters over a default-sized backing store.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`](crate::common::SimError::Configuration)
    /// if `sets * ways * block_words * 8 == size_bytes` has no positive solution.
    pub fn configure(
        size_bytes: usize,
        associativity: Associativity,
        block_bytes: usize,
        policy: ReplacementPolicy,
    ) -> SimResult<Self> {
        Self::new(&Config::with_cache(
            size_bytes,
            associativity,
            block_bytes,
            policy,
        ))
    }

    /// Loads one word through the cache.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`](crate::common::SimError::OutOfRange) if
    /// `addr` lies beyond the backing store.
    pub fn load(&mut self, addr: WordAddr) -> SimResult<f64> {
        self.instructions += 1;
        self.cache.read(addr)
    }

    /// Stores one word through the cache (and on to the backing store).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`](crate::common::SimError::OutOfRange) if
    /// `addr` lies beyond the backing store.
    pub fn store(&mut self, addr: WordAddr, value: f64) -> SimResult<()> {
        self.instructions += 1;
        self.cache.write(addr, value)
    }

    /// Adds two values, counting one instruction.
    pub const fn add(&mut self, a: f64, b: f64) -> f64 {
        self.instructions += 1;
        a + b
    }

    /// Multiplies two values, counting one instruction.
    pub const fn multiply(&mut self, a: f64, b: f64) -> f64 {
        self.instructions += 1;
        a * b
    }

    /// Instructions issued so far.
    pub const fn instructions(&self) -> u64 {
        self.instructions
    }

    /// Consistent snapshot of the instruction count and all cache counters.
    pub const fn stats(&self) -> SimStats {
        SimStats::from_parts(self.instructions, self.cache.stats())
    }

    /// The data cache.
    pub const fn cache(&self) -> &CacheSim {
        &self.cache
    }

    /// Geometry of the data cache.
    pub const fn geometry(&self) -> &Geometry {
        self.cache.geometry()
    }

    /// Discards warm-up effects: zeroes every counter, invalidates every line
    /// and clears the backing store's first-read flags. Memory contents survive.
    pub fn reset(&mut self) {
        debug!(instructions = self.instructions, "resetting emulator");
        self.instructions = 0;
        self.cache.reset();
    }
}
