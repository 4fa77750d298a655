//! Core-side components.
//!
//! This module contains the units that sit between the instruction front end
//! and main memory. The only unit modeled is the data cache.

/// Functional units (the data cache and its replacement policies).
pub mod units;
