//! Memory side of the simulated system.
//!
//! This module organizes the components below the cache: the word-addressed
//! backing store that every block is fetched from and written through to.

/// Backing store implementation.
pub mod memory;

pub use memory::BackingStore;
