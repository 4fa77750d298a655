//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the oldest cache line in a set, regardless of how recently
//! it was accessed. Lines are stamped only when filled, so the smallest stamp
//! in a set marks the line that was brought in first.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - hit refresh: none
//!   - `get_victim()`: O(W) where W is the number of ways
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict frequently-used lines)

use super::{CacheLine, ReplacementPolicy, oldest_way};

/// FIFO Policy. Stateless; insertion order lives in the line stamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    fn refreshes_on_hit(&self) -> bool {
        false
    }

    /// Returns the way filled earliest.
    fn get_victim(&mut self, set: &[CacheLine]) -> usize {
        oldest_way(set)
    }
}
