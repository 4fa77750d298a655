//! Read miss classification (the "three Cs").
//!
//! The capacity rule is the simple one: a miss counts as a
//! capacity miss only when every line of this cache is already valid. It is
//! not measured against a fully associative cache of the same size.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a read missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissKind {
    /// The block had never been read before.
    Compulsory,
    /// Every line in the cache was valid at the time of the miss.
    Capacity,
    /// Neither of the above: the block was seen before and free lines remained elsewhere.
    Conflict,
}

impl fmt::Display for MissKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Compulsory => "compulsory",
            Self::Capacity => "capacity",
            Self::Conflict => "conflict",
        };
        f.pad(name)
    }
}

/// Classifies a read miss.
///
/// Must be called before the missing block is installed, with the fill count
/// as it stood at the moment of the miss.
///
/// # Arguments
///
/// * `first_access` - Whether this was the first read of the block from the backing store.
/// * `blocks_filled` - Number of valid lines across the whole cache.
/// * `total_lines` - `sets * ways`.
pub const fn classify_miss(first_access: bool, blocks_filled: usize, total_lines: usize) -> MissKind {
    if first_access {
        MissKind::Compulsory
    } else if blocks_filled == total_lines {
        MissKind::Capacity
    } else {
        MissKind::Conflict
    }
}

/// Result of a single read as seen by the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadOutcome {
    /// The block was resident.
    Hit,
    /// The block was fetched from the backing store.
    Miss(MissKind),
}

impl ReadOutcome {
    /// Whether the read hit.
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}
