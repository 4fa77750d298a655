//! Main Memory Model.
//!
//! This module implements the memory behind the data cache. It provides:
//! 1. **Backing Store:** Block-granular storage for every word the workload can address.
//! 2. **First-Access Tracking:** Per-block flags that drive compulsory-miss detection.

/// Word array with per-block first-read flags.
pub mod backing;

pub use self::backing::BackingStore;
