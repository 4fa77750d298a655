//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** The baseline cache (an AMD Opteron L1 data cache) and memory size.
//! 2. **Structures:** Cache and memory configuration, deserializable from JSON.
//! 3. **Enums:** Associativity and replacement policy, parseable from CLI text.
//! 4. **Geometry:** The validated `(sets, ways, block_words)` triple derived from a config.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built from CLI flags
//! with `Config::with_cache`; use `Config::default()` for the baseline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::addr::{DecodedAddr, WordAddr};
use crate::common::constants::{MEMORY_WORDS, WORD_BYTES};
use crate::common::error::{SimError, SimResult};

/// Default configuration constants for the simulator.
///
/// These values describe the L1 data cache of an AMD Opteron, which is what
/// the cache analyzer compares everything else against.
mod defaults {
    /// Default cache capacity in bytes (64 KiB).
    pub const CACHE_SIZE: usize = 64 * 1024;

    /// Default block size in bytes (64 bytes = 8 doubles).
    pub const BLOCK_BYTES: usize = 64;

    /// Default associativity (2-way set-associative).
    pub const WAYS: usize = 2;

    /// Default seed for the random replacement generator.
    pub const RANDOM_SEED: u64 = 123_456_789;
}

/// How many lines each set holds.
///
/// Resolved exactly once into a `(sets, ways)` pair by [`Geometry::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAssociativity", into = "RawAssociativity")]
pub enum Associativity {
    /// One line per set.
    DirectMapped,
    /// A single set holding every line of the cache.
    FullyAssociative,
    /// `n` lines per set.
    NWay(usize),
}

impl Default for Associativity {
    fn default() -> Self {
        Self::NWay(defaults::WAYS)
    }
}

impl FromStr for Associativity {
    type Err = SimError;

    /// Parses `d`, `f`, or a positive way count (names like `direct-mapped` and
    /// `2-way` are accepted too).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        match text.as_str() {
            "d" | "direct" | "direct-mapped" | "directmapped" => Ok(Self::DirectMapped),
            "f" | "full" | "fully-associative" | "fullyassociative" => {
                Ok(Self::FullyAssociative)
            }
            _ => {
                let digits = text.strip_suffix("-way").unwrap_or(&text);
                match digits.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(Self::NWay(n)),
                    _ => Err(SimError::Parse {
                        what: "associativity",
                        input: s.to_owned(),
                    }),
                }
            }
        }
    }
}

impl fmt::Display for Associativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectMapped => f.pad("direct-mapped"),
            Self::FullyAssociative => f.pad("fully-associative"),
            Self::NWay(n) => f.pad(&format!("{n}-way")),
        }
    }
}

/// Wire form of [`Associativity`]: either a bare way count or a name.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawAssociativity {
    Ways(usize),
    Name(String),
}

impl TryFrom<RawAssociativity> for Associativity {
    type Error = SimError;

    fn try_from(raw: RawAssociativity) -> Result<Self, Self::Error> {
        match raw {
            RawAssociativity::Ways(0) => Err(SimError::Parse {
                what: "associativity",
                input: "0".to_owned(),
            }),
            RawAssociativity::Ways(n) => Ok(Self::NWay(n)),
            RawAssociativity::Name(name) => name.parse(),
        }
    }
}

impl From<Associativity> for RawAssociativity {
    fn from(assoc: Associativity) -> Self {
        match assoc {
            Associativity::DirectMapped => Self::Name("DirectMapped".to_owned()),
            Associativity::FullyAssociative => Self::Name("FullyAssociative".to_owned()),
            Associativity::NWay(n) => Self::Ways(n),
        }
    }
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which cache line to evict
/// when a new block must be installed in a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line whose last access is oldest; hits refresh recency.
    #[default]
    #[serde(alias = "Lru", alias = "lru", alias = "l")]
    Lru,
    /// First In First Out replacement policy.
    ///
    /// Evicts the line that was filled earliest; hits do not matter.
    #[serde(alias = "Fifo", alias = "fifo", alias = "f")]
    Fifo,
    /// Random replacement policy.
    ///
    /// Evicts a uniformly chosen line from the set.
    #[serde(alias = "Random", alias = "random", alias = "r")]
    Random,
}

impl FromStr for ReplacementPolicy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "lru" => Ok(Self::Lru),
            "f" | "fifo" => Ok(Self::Fifo),
            "r" | "random" => Ok(Self::Random),
            _ => Err(SimError::Parse {
                what: "replacement policy",
                input: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lru => "LRU",
            Self::Fifo => "FIFO",
            Self::Random => "RANDOM",
        };
        f.pad(name)
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use cachesim_core::config::{Associativity, Config};
///
/// let config = Config::default();
/// assert_eq!(config.cache.size_bytes, 65536);
/// assert_eq!(config.cache.associativity, Associativity::NWay(2));
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use cachesim_core::config::{Associativity, Config, ReplacementPolicy};
///
/// let json = r#"{
///     "cache": {
///         "size_bytes": 32768,
///         "associativity": "f",
///         "block_bytes": 32,
///         "policy": "FIFO"
///     },
///     "memory": { "words": 65536 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cache.associativity, Associativity::FullyAssociative);
/// assert_eq!(config.cache.policy, ReplacementPolicy::Fifo);
/// assert_eq!(config.geometry().unwrap().ways, 1024);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Cache geometry and replacement configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Backing store configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Builds a configuration for the given cache parameters and default memory.
    pub fn with_cache(
        size_bytes: usize,
        associativity: Associativity,
        block_bytes: usize,
        policy: ReplacementPolicy,
    ) -> Self {
        Self {
            cache: CacheConfig {
                size_bytes,
                associativity,
                block_bytes,
                policy,
                ..CacheConfig::default()
            },
            memory: MemoryConfig::default(),
        }
    }

    /// Parses a configuration from a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Json`] if the document is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the cache section and resolves it into a [`Geometry`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if the cache parameters do not describe a valid cache.
    pub fn geometry(&self) -> SimResult<Geometry> {
        Geometry::new(
            self.cache.size_bytes,
            self.cache.associativity,
            self.cache.block_bytes,
            self.cache.policy,
        )
    }
}

/// Cache configuration.
///
/// Describes capacity, associativity, block size, and replacement policy of
/// the single data cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Total cache capacity in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Lines per set
    #[serde(default)]
    pub associativity: Associativity,

    /// Block (line) size in bytes; a multiple of the 8-byte word
    #[serde(default = "CacheConfig::default_block")]
    pub block_bytes: usize,

    /// Victim selection for full sets
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Seed for the random replacement generator
    #[serde(default = "CacheConfig::default_seed")]
    pub seed: u64,
}

impl CacheConfig {
    /// Returns the default cache capacity in bytes.
    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default block size in bytes.
    fn default_block() -> usize {
        defaults::BLOCK_BYTES
    }

    /// Returns the default random replacement seed.
    fn default_seed() -> u64 {
        defaults::RANDOM_SEED
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            associativity: Associativity::default(),
            block_bytes: defaults::BLOCK_BYTES,
            policy: ReplacementPolicy::default(),
            seed: defaults::RANDOM_SEED,
        }
    }
}

/// Backing store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Number of words in the backing store; must be a multiple of the block size in words
    #[serde(default = "MemoryConfig::default_words")]
    pub words: usize,
}

impl MemoryConfig {
    /// Returns the default backing store size in words.
    fn default_words() -> usize {
        MEMORY_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            words: MEMORY_WORDS,
        }
    }
}

/// Validated cache geometry.
///
/// Invariant: `sets * ways * block_words * WORD_BYTES` equals the configured
/// capacity and every factor is at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    /// Words per block.
    pub block_words: usize,
    /// Lines per set.
    pub ways: usize,
    /// Number of sets.
    pub sets: usize,
    /// Victim selection for full sets.
    pub policy: ReplacementPolicy,
}

impl Geometry {
    /// Resolves capacity, associativity and block size into a geometry.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] when the block is not a positive
    /// multiple of the word size, when the capacity is not a positive multiple
    /// of the block size, or when the way count does not divide the line count.
    pub fn new(
        size_bytes: usize,
        associativity: Associativity,
        block_bytes: usize,
        policy: ReplacementPolicy,
    ) -> SimResult<Self> {
        if block_bytes == 0 || block_bytes % WORD_BYTES != 0 {
            return Err(SimError::Configuration(format!(
                "block size {block_bytes} B is not a positive multiple of the {WORD_BYTES} B word"
            )));
        }
        if size_bytes == 0 || size_bytes % block_bytes != 0 {
            return Err(SimError::Configuration(format!(
                "cache size {size_bytes} B is not a positive multiple of the {block_bytes} B block"
            )));
        }
        let lines = size_bytes / block_bytes;
        let ways = match associativity {
            Associativity::DirectMapped => 1,
            Associativity::FullyAssociative => lines,
            Associativity::NWay(n) => n,
        };
        if ways == 0 || lines % ways != 0 {
            return Err(SimError::Configuration(format!(
                "{ways} ways do not evenly divide {lines} lines"
            )));
        }
        Ok(Self {
            block_words: block_bytes / WORD_BYTES,
            ways,
            sets: lines / ways,
            policy,
        })
    }

    /// Splits a word address into tag, set, offset and block.
    #[inline]
    pub const fn decode(&self, addr: WordAddr) -> DecodedAddr {
        addr.decompose(self.block_words, self.sets)
    }

    /// Total number of lines in the cache (`sets * ways`).
    pub const fn total_lines(&self) -> usize {
        self.sets * self.ways
    }

    /// Block size in bytes.
    pub const fn block_bytes(&self) -> usize {
        self.block_words * WORD_BYTES
    }

    /// Cache capacity in bytes.
    pub const fn size_bytes(&self) -> usize {
        self.total_lines() * self.block_bytes()
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} KiB, {} sets x {} ways, {} B blocks, {}",
            self.size_bytes() / 1024,
            self.sets,
            self.ways,
            self.block_bytes(),
            self.policy
        )
    }
}
