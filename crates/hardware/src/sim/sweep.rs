//! Configuration sweeps.
//!
//! A sweep runs a workload on a fresh [`Emulator`] for each configuration in a
//! family and collects the final counters. The canned suites vary one cache
//! parameter at a time around the default 64 KiB, 2-way, 64 B block, LRU cache.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use super::emulator::Emulator;
use super::workloads::Workload;
use crate::common::error::{SimError, SimResult};
use crate::config::{Associativity, CacheConfig, Config, ReplacementPolicy};
use crate::stats::SimStats;

/// One row of a sweep: what ran, on which cache, and the resulting counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepPoint {
    /// Kernel that was run.
    pub workload: Workload,
    /// Cache it was run against.
    pub cache: CacheConfig,
    /// Counters at the end of the run.
    pub stats: SimStats,
}

impl fmt::Display for SweepPoint {
    /// Formats as `workload size_kb associativity block_bytes policy | counters`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<13} {:>4} KiB {:>17} {:>4} B {:<6} | {}",
            self.workload,
            self.cache.size_bytes / 1024,
            self.cache.associativity,
            self.cache.block_bytes,
            self.cache.policy,
            self.stats
        )
    }
}

/// Runs `workload` once per configuration, each on its own emulator.
///
/// # Errors
///
/// Stops at the first configuration or workload error.
pub fn run(workload: Workload, configs: &[Config]) -> SimResult<Vec<SweepPoint>> {
    configs
        .iter()
        .map(|config| run_one(workload, config))
        .collect()
}

/// Runs one workload on a fresh emulator built from `config`.
///
/// # Errors
///
/// Returns the configuration error, or the first error raised by the workload.
pub fn run_one(workload: Workload, config: &Config) -> SimResult<SweepPoint> {
    let mut emu = Emulator::new(config)?;
    workload.run(&mut emu)?;
    let point = SweepPoint {
        workload,
        cache: config.cache.clone(),
        stats: emu.stats(),
    };
    info!(%workload, geometry = %emu.geometry(), stats = %point.stats, "workload finished");
    Ok(point)
}

/// The default configuration with one edit applied to its cache section.
fn config_with(edit: impl FnOnce(&mut CacheConfig)) -> Config {
    let mut config = Config::default();
    edit(&mut config.cache);
    config
}

/// The families of configurations the analyzer compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suite {
    /// Direct-mapped, 2/4/8/16-way and fully associative.
    Associativity,
    /// LRU, FIFO and Random on the 2-way cache.
    Policy,
    /// 16, 32, 64 and 128 byte blocks.
    BlockSize,
    /// 4 KiB through 128 KiB.
    CacheSize,
    /// Naive, interchanged and blocked matrix multiply on the default cache.
    Loops,
}

impl Suite {
    /// Every suite, in report order.
    pub const ALL: [Self; 5] = [
        Self::Associativity,
        Self::Policy,
        Self::BlockSize,
        Self::CacheSize,
        Self::Loops,
    ];

    /// The `(workload, configuration)` pairs this suite runs.
    ///
    /// `workload` is ignored by [`Suite::Loops`], which always compares the
    /// three matrix multiply variants.
    pub fn points(self, workload: Workload) -> Vec<(Workload, Config)> {
        match self {
            Self::Associativity => [
                Associativity::DirectMapped,
                Associativity::NWay(2),
                Associativity::NWay(4),
                Associativity::NWay(8),
                Associativity::NWay(16),
                Associativity::FullyAssociative,
            ]
            .into_iter()
            .map(|assoc| (workload, config_with(|c| c.associativity = assoc)))
            .collect(),
            Self::Policy => [
                ReplacementPolicy::Lru,
                ReplacementPolicy::Fifo,
                ReplacementPolicy::Random,
            ]
            .into_iter()
            .map(|policy| (workload, config_with(|c| c.policy = policy)))
            .collect(),
            Self::BlockSize => [16, 32, 64, 128]
                .into_iter()
                .map(|bytes| (workload, config_with(|c| c.block_bytes = bytes)))
                .collect(),
            Self::CacheSize => [4, 8, 16, 32, 64, 128]
                .into_iter()
                .map(|kib| (workload, config_with(|c| c.size_bytes = kib * 1024)))
                .collect(),
            Self::Loops => [
                Workload::Matmul,
                Workload::MatmulInterchanged,
                Workload::MatmulBlocked,
            ]
            .into_iter()
            .map(|w| (w, Config::default()))
            .collect(),
        }
    }

    /// Runs every point of the suite.
    ///
    /// # Errors
    ///
    /// Stops at the first configuration or workload error.
    pub fn run(self, workload: Workload) -> SimResult<Vec<SweepPoint>> {
        self.points(workload)
            .iter()
            .map(|(w, config)| run_one(*w, config))
            .collect()
    }

    /// Short name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Associativity => "assoc",
            Self::Policy => "policy",
            Self::BlockSize => "block",
            Self::CacheSize => "size",
            Self::Loops => "loops",
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Suite {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|suite| suite.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SimError::Parse {
                what: "sweep suite",
                input: s.to_owned(),
            })
    }
}
