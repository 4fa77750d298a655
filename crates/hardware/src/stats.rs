//! Simulation statistics collection and reporting.
//!
//! This module tracks the counters the cache analyzer compares. It provides:
//! 1. **Cache counters:** Read/write hits, write misses, and read misses split by kind.
//! 2. **Snapshots:** A copyable `SimStats` combining cache counters with the instruction count.
//! 3. **Reporting:** A sectioned text report and a one-line summary row.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::units::cache::MissKind;

/// Counters owned by the data cache.
///
/// Every field only grows during a run; [`CacheSim::reset`](crate::core::units::cache::CacheSim::reset)
/// is the only thing that zeroes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Reads that found their block resident.
    pub read_hits: u64,
    /// Writes that found their block resident.
    pub write_hits: u64,
    /// Writes whose block had to be allocated.
    pub write_misses: u64,
    /// Read misses on blocks never read before.
    pub compulsory_misses: u64,
    /// Read misses while every line was valid.
    pub capacity_misses: u64,
    /// Remaining read misses.
    pub conflict_misses: u64,
    /// Valid lines across the whole cache.
    pub blocks_filled: usize,
}

impl CacheStats {
    /// Counts one classified read miss.
    pub const fn record_miss(&mut self, kind: MissKind) {
        match kind {
            MissKind::Compulsory => self.compulsory_misses += 1,
            MissKind::Capacity => self.capacity_misses += 1,
            MissKind::Conflict => self.conflict_misses += 1,
        }
    }

    /// Total read misses of every kind.
    pub const fn read_misses(&self) -> u64 {
        self.compulsory_misses + self.capacity_misses + self.conflict_misses
    }
}

/// Snapshot of every counter the simulator exposes.
///
/// Taken with [`Emulator::stats`](crate::sim::Emulator::stats); serializable for JSON reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimStats {
    /// Loads, stores, adds and multiplies issued.
    pub instructions: u64,
    /// Reads that hit.
    pub read_hits: u64,
    /// Writes that hit.
    pub write_hits: u64,
    /// Writes that missed.
    pub write_misses: u64,
    /// Read misses on never-read blocks.
    pub compulsory_misses: u64,
    /// Read misses with the cache full.
    pub capacity_misses: u64,
    /// Other read misses.
    pub conflict_misses: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"reads"`, `"writes"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "reads", "writes"];

/// Column header matching the [`fmt::Display`] row of [`SimStats`].
pub const SUMMARY_HEADER: &str =
    "instructions read_hits compulsory capacity conflict write_hits write_misses";

/// Percentage of `part` in `total`, or zero when nothing was counted.
const fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

impl SimStats {
    /// Combines the instruction count with the cache's counters.
    pub const fn from_parts(instructions: u64, cache: &CacheStats) -> Self {
        Self {
            instructions,
            read_hits: cache.read_hits,
            write_hits: cache.write_hits,
            write_misses: cache.write_misses,
            compulsory_misses: cache.compulsory_misses,
            capacity_misses: cache.capacity_misses,
            conflict_misses: cache.conflict_misses,
        }
    }

    /// Total read misses of every kind.
    pub const fn read_misses(&self) -> u64 {
        self.compulsory_misses + self.capacity_misses + self.conflict_misses
    }

    /// Total reads issued.
    pub const fn reads(&self) -> u64 {
        self.read_hits + self.read_misses()
    }

    /// Total writes issued.
    pub const fn writes(&self) -> u64 {
        self.write_hits + self.write_misses
    }

    /// Read miss rate as a percentage of reads.
    pub const fn read_miss_rate(&self) -> f64 {
        percent(self.read_misses(), self.reads())
    }

    /// Write miss rate as a percentage of writes.
    pub const fn write_miss_rate(&self) -> f64 {
        percent(self.write_misses, self.writes())
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"reads"` or
    /// `"writes"`. Pass an empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[&str]) {
        let want = |name: &str| sections.is_empty() || sections.contains(&name);

        println!("==========================================================");
        if want("summary") {
            println!("SUMMARY");
            println!("  sim.instructions       {}", self.instructions);
            println!("  mem.reads              {}", self.reads());
            println!("  mem.writes             {}", self.writes());
            println!(
                "  mem.miss_rate          {:.2}%",
                percent(
                    self.read_misses() + self.write_misses,
                    self.reads() + self.writes()
                )
            );
            println!("----------------------------------------------------------");
        }
        if want("reads") {
            let misses = self.read_misses();
            println!("READS");
            println!("  read.hits              {}", self.read_hits);
            println!("  read.misses            {}", misses);
            println!(
                "  read.compulsory        {} ({:.2}%)",
                self.compulsory_misses,
                percent(self.compulsory_misses, misses)
            );
            println!(
                "  read.capacity          {} ({:.2}%)",
                self.capacity_misses,
                percent(self.capacity_misses, misses)
            );
            println!(
                "  read.conflict          {} ({:.2}%)",
                self.conflict_misses,
                percent(self.conflict_misses, misses)
            );
            println!("  read.miss_rate         {:.2}%", self.read_miss_rate());
            println!("----------------------------------------------------------");
        }
        if want("writes") {
            println!("WRITES");
            println!("  write.hits             {}", self.write_hits);
            println!("  write.misses           {}", self.write_misses);
            println!("  write.miss_rate        {:.2}%", self.write_miss_rate());
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}

impl fmt::Display for SimStats {
    /// Formats the counters as one row, in [`SUMMARY_HEADER`] order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.instructions,
            self.read_hits,
            self.compulsory_misses,
            self.capacity_misses,
            self.conflict_misses,
            self.write_hits,
            self.write_misses
        )
    }
}
