//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim lines in a full set.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Fifo`: First-In, First-Out.
//! - `Random`: Random selection.
//!
//! LRU and FIFO share victim selection (oldest stamp wins) and differ only in
//! whether a hit refreshes the stamp.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

/// Random replacement policy.
pub mod random;

use std::fmt;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use random::RandomPolicy;

use super::line::CacheLine;
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// Defines whether hits refresh recency and how a victim is picked from a full set.
pub trait ReplacementPolicy: fmt::Debug + Send + Sync {
    /// Whether a hit restamps the line with a fresh counter value.
    fn refreshes_on_hit(&self) -> bool;

    /// Selects a victim line to evict from a full set.
    ///
    /// # Arguments
    ///
    /// * `set` - The lines of the set, all valid. Never empty.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn get_victim(&mut self, set: &[CacheLine]) -> usize;
}

/// Returns the way with the smallest stamp, preferring the lowest way on ties.
pub fn oldest_way(set: &[CacheLine]) -> usize {
    set.iter()
        .enumerate()
        .min_by_key(|(_, line)| line.stamp)
        .map_or(0, |(way, _)| way)
}

/// Instantiates the policy named by the configuration.
///
/// `seed` only matters for [`PolicyType::Random`].
pub fn build(policy: PolicyType, seed: u64) -> Box<dyn ReplacementPolicy> {
    match policy {
        PolicyType::Lru => Box::new(LruPolicy),
        PolicyType::Fifo => Box::new(FifoPolicy),
        PolicyType::Random => Box::new(RandomPolicy::new(seed)),
    }
}
