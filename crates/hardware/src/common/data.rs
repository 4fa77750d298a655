//! Memory Access Types.
//!
//! This module defines the classification of block transfers between the cache
//! and the backing store. The distinction matters for the following:
//! 1. **Miss Classification:** Only reads consume a block's first-access flag.
//! 2. **Write Allocation:** Write misses pull the block in without marking it read.

/// Type of block transfer from the backing store.
///
/// Used to decide whether fetching a block counts as the first read of it
/// for compulsory-miss detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Data read access.
    ///
    /// Occurs on a load miss. Sets the block's "previously read" flag and
    /// reports whether this was the first read.
    Read,

    /// Data write access.
    ///
    /// Occurs on a store miss (write-allocate fetch). Leaves the block's
    /// "previously read" flag untouched.
    Write,
}
