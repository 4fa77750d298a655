//! Shared fixtures for cache simulator tests.

use cachesim_core::CacheSim;
use cachesim_core::config::{Associativity, Config, MemoryConfig, ReplacementPolicy};
use tracing_subscriber::EnvFilter;

/// Backing store size used by the fixtures: 4096 words (32 KiB).
pub const TEST_MEMORY_WORDS: usize = 4096;

/// Routes simulator logs to the test harness, filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a configuration over a small backing store.
pub fn small_config(
    size_bytes: usize,
    associativity: Associativity,
    block_bytes: usize,
    policy: ReplacementPolicy,
) -> Config {
    let mut config = Config::with_cache(size_bytes, associativity, block_bytes, policy);
    init_tracing();
    config.memory = MemoryConfig {
        words: TEST_MEMORY_WORDS,
    };
    config
}

/// Builds a cache over a small backing store.
///
/// # Panics
///
/// Panics if the geometry is invalid.
pub fn small_cache(
    size_bytes: usize,
    associativity: Associativity,
    block_bytes: usize,
    policy: ReplacementPolicy,
) -> CacheSim {
    CacheSim::new(&small_config(size_bytes, associativity, block_bytes, policy))
        .expect("test geometry must be valid")
}

/// Direct-mapped cache with two sets of two-word blocks.
///
/// ```text
/// block = addr / 2
/// set   = block % 2
/// tag   = addr / 4
/// ```
pub fn tiny_direct_mapped() -> CacheSim {
    small_cache(32, Associativity::DirectMapped, 16, ReplacementPolicy::Lru)
}

/// Fully associative cache of two one-word lines under `policy`.
pub fn two_line_fully_associative(policy: ReplacementPolicy) -> CacheSim {
    small_cache(16, Associativity::FullyAssociative, 8, policy)
}
