//! Random Replacement Policy.
//!
//! This policy evicts a random cache line from the set. It uses a xorshift
//! generator owned by the policy instance, so two caches built with the same
//! seed make the same choices and never influence each other.

use super::{CacheLine, ReplacementPolicy};

/// Seed substituted for zero, which would lock xorshift at zero forever.
const FALLBACK_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Random Policy state.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    /// Internal state for the pseudo-random number generator.
    state: u64,
}

impl RandomPolicy {
    /// Creates a new Random policy instance.
    ///
    /// # Arguments
    ///
    /// * `seed` - Initial generator state. Zero is replaced by a fixed non-zero constant.
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the generator and returns the next value.
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl ReplacementPolicy for RandomPolicy {
    fn refreshes_on_hit(&self) -> bool {
        false
    }

    /// Generates a pseudo-random number and maps it to a valid way index.
    fn get_victim(&mut self, set: &[CacheLine]) -> usize {
        (self.next_u64() % set.len() as u64) as usize
    }
}
