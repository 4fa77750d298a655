//! Cache line storage.

/// One line of a set: a block's worth of words plus the bookkeeping needed to
/// find it (tag, validity) and to pick it as a victim (recency stamp).
///
/// Lines are created invalid and are never freed, only refilled in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheLine {
    /// Whether the line currently holds a block.
    pub valid: bool,
    /// Tag of the block held by the line.
    pub tag: u64,
    /// Value of the cache's recency counter when the line was last stamped.
    pub stamp: u64,
    /// The block's words.
    pub data: Vec<f64>,
}

impl CacheLine {
    /// Creates an invalid line able to hold `block_words` words.
    pub fn new(block_words: usize) -> Self {
        Self {
            valid: false,
            tag: 0,
            stamp: 0,
            data: vec![0.0; block_words],
        }
    }

    /// Creates a valid line holding `data` under `tag`, stamped with `stamp`.
    pub const fn filled(tag: u64, stamp: u64, data: Vec<f64>) -> Self {
        Self {
            valid: true,
            tag,
            stamp,
            data,
        }
    }

    /// Returns the line to its freshly constructed, invalid state.
    pub fn clear(&mut self) {
        self.valid = false;
        self.tag = 0;
        self.stamp = 0;
        self.data.fill(0.0);
    }

    /// Whether the line is valid and holds the block tagged `tag`.
    #[inline]
    pub const fn holds(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }
}
