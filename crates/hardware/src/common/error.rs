//! Simulator error definitions.
//!
//! This module defines the error taxonomy for the simulator. It provides:
//! 1. **Configuration Errors:** Geometry that cannot be resolved into positive integers.
//! 2. **Bounds Errors:** Addresses that fall outside the modeled backing store.
//! 3. **Input Errors:** Unparseable associativity or policy names and malformed JSON.
//!
//! None of these are recoverable inside the simulator; they are surfaced to the
//! caller immediately.

use thiserror::Error;

/// Errors raised while configuring or driving the simulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// The requested geometry violates `sets * ways * block_words * 8 == size_bytes`
    /// with all factors positive.
    #[error("invalid cache configuration: {0}")]
    Configuration(String),

    /// A word address resolved to a block beyond the end of the backing store.
    #[error("block {block} is out of range (backing store holds {blocks} blocks)")]
    OutOfRange {
        /// Block address that was requested.
        block: u64,
        /// Number of blocks in the backing store.
        blocks: u64,
    },

    /// A textual associativity or replacement policy could not be parsed.
    #[error("cannot parse {what} from {input:?}")]
    Parse {
        /// Kind of value being parsed.
        what: &'static str,
        /// Offending input text.
        input: String,
    },

    /// A JSON configuration document failed to deserialize.
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used by fallible simulator operations.
pub type SimResult<T> = Result<T, SimError>;
