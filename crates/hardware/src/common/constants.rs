//! Global Simulator Constants.
//!
//! This module defines constants shared across the simulator. It includes:
//! 1. **Word Constants:** The size of the unit of data moved by loads and stores.
//! 2. **Memory Constants:** The default backing store dimensions.

/// Size of one memory word in bytes (one IEEE 754 double).
pub const WORD_BYTES: usize = 8;

/// Default number of words held by the backing store (2^22 doubles, 32 MiB).
pub const MEMORY_WORDS: usize = 1 << 22;

/// Values seeded into a fresh backing store repeat with this period.
///
/// Word `i` starts out holding `i % SEED_PERIOD`.
pub const SEED_PERIOD: u64 = 100;

/// First value handed out by a cache's recency counter.
pub const FIRST_STAMP: u64 = 1;
