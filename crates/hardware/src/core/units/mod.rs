//! Functional units.
//!
//! This module contains the data cache: a set-associative, write-through cache
//! with pluggable replacement policies and miss classification.

/// Set-associative data cache with replacement policies.
pub mod cache;
