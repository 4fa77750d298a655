//! Functional data cache simulator library.
//!
//! This crate models a single set-associative data cache in front of a flat,
//! word-addressed memory, with the following:
//! 1. **Common:** Word addresses, constants, access types and the error type.
//! 2. **Configuration:** Cache geometry, associativity and replacement policy.
//! 3. **Core:** The cache itself, its replacement policies and 3C miss classification.
//! 4. **Memory:** The backing store with per-block first-read tracking.
//! 5. **Simulation:** The instruction-counting front end, benchmark kernels and sweeps.
//! 6. **Statistics:** Hit/miss counters and reporting.

/// Common types and constants (addresses, access types, errors).
pub mod common;
/// Simulator configuration (defaults, enums, geometry).
pub mod config;
/// Data cache and replacement policies.
pub mod core;
/// Front end, workloads and configuration sweeps.
pub mod sim;
/// Backing store.
pub mod soc;
/// Statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The data cache; construct with `CacheSim::new`.
pub use crate::core::units::cache::CacheSim;
/// Instruction-counting front end; construct with `Emulator::new` or `Emulator::configure`.
pub use crate::sim::Emulator;
