//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the cache line that has not been accessed for the longest time.
//! Every hit restamps the line from the cache's recency counter, so the smallest
//! stamp in a set always belongs to the least recently used line.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - hit refresh: O(1)
//!   - `get_victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** one stamp per line, held by the line itself
//! - **Best Case:** Working sets that fit in a set, with good temporal locality
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::{CacheLine, ReplacementPolicy, oldest_way};

/// LRU Policy. Stateless; recency lives in the line stamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    fn refreshes_on_hit(&self) -> bool {
        true
    }

    /// Returns the way with the oldest stamp (least recently used).
    fn get_victim(&mut self, set: &[CacheLine]) -> usize {
        oldest_way(set)
    }
}
