//! # Backing Store Tests
//!
//! Verifies seeding, bounds checks, block transfers and the per-block
//! first-read flag that drives compulsory miss classification.

use cachesim_core::common::data::AccessType;
use cachesim_core::common::error::SimError;
use cachesim_core::soc::BackingStore;

#[test]
fn block_count_and_size() {
    let store = BackingStore::new(1024, 8).unwrap();
    assert_eq!(store.blocks(), 128);
    assert_eq!(store.block_words(), 8);
}

#[test]
fn first_read_reported_once() {
    let mut store = BackingStore::new(64, 4).unwrap();
    assert!(!store.was_read(2));
    let (data, first) = store.read_block(2, AccessType::Read).unwrap();
    assert_eq!(data, &[8.0, 9.0, 10.0, 11.0]);
    assert!(first);
    assert!(store.was_read(2));
    let (_, first) = store.read_block(2, AccessType::Read).unwrap();
    assert!(!first);
}

#[test]
fn write_block_leaves_flag_alone() {
    let mut store = BackingStore::new(64, 4).unwrap();
    store.write_block(1, &[1.5, 2.5, 3.5, 4.5]).unwrap();
    assert_eq!(store.block(1).unwrap(), &[1.5, 2.5, 3.5, 4.5]);
    assert!(!store.was_read(1));
    let (data, first) = store.read_block(1, AccessType::Read).unwrap();
    assert_eq!(data, &[1.5, 2.5, 3.5, 4.5]);
    assert!(first);
}

#[test]
fn clear_read_flags_keeps_data() {
    let mut store = BackingStore::new(16, 2).unwrap();
    store.write_block(0, &[7.0, 7.0]).unwrap();
    let _ = store.read_block(0, AccessType::Read).unwrap();
    store.clear_read_flags();
    assert!(!store.was_read(0));
    let (data, first) = store.read_block(0, AccessType::Read).unwrap();
    assert_eq!(data, &[7.0, 7.0]);
    assert!(first);
}

#[test]
fn out_of_range_block_rejected() {
    let mut store = BackingStore::new(16, 2).unwrap();
    let err = store.read_block(8, AccessType::Read).unwrap_err();
    assert!(matches!(err, SimError::OutOfRange { block: 8, blocks: 8 }));
    assert!(store.write_block(8, &[0.0, 0.0]).is_err());
    assert!(store.block(100).is_err());
    assert!(!store.was_read(100));
}
