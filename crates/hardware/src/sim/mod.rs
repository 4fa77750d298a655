//! Simulation front end, benchmark workloads and configuration sweeps.
//!
//! Provides the instruction-counting emulator that drives the data cache,
//! the kernels used to compare cache configurations, and helpers that run a
//! kernel across a family of configurations.

/// Instruction-counting front end.
pub mod emulator;

/// Configuration sweeps over cache parameters.
pub mod sweep;

/// Benchmark kernels (dot product and matrix multiply variants).
pub mod workloads;

pub use emulator::Emulator;
pub use sweep::{Suite, SweepPoint};
pub use workloads::Workload;
