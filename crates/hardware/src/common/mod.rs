//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Address Types:** The word address and its tag/set/offset decomposition.
//! 2. **Constants:** Word size and default memory dimensions.
//! 3. **Memory Access:** Classification of block transfers (read or write-allocate).
//! 4. **Error Handling:** The simulator error type and result alias.

/// Word address and decomposed address definitions.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types for configuration and memory bounds failures.
pub mod error;

pub use addr::{DecodedAddr, WordAddr};
pub use constants::WORD_BYTES;
pub use data::AccessType;
pub use error::{SimError, SimResult};
