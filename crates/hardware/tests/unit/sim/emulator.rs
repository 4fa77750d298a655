//! # Emulator Tests
//!
//! Verifies instruction counting, the stats snapshot and reset behavior of the
//! front end.

use cachesim_core::Emulator;
use cachesim_core::common::addr::WordAddr;
use cachesim_core::common::error::SimError;
use cachesim_core::config::{Associativity, ReplacementPolicy};
use cachesim_core::stats::SimStats;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::small_config;

fn small_emulator() -> Emulator {
    Emulator::new(&small_config(
        1024,
        Associativity::NWay(2),
        32,
        ReplacementPolicy::Lru,
    ))
    .unwrap()
}

#[test]
fn every_operation_is_one_instruction() {
    let mut emu = small_emulator();
    let x = emu.load(WordAddr(3)).unwrap();
    let y = emu.multiply(x, 2.0);
    let z = emu.add(y, 1.0);
    emu.store(WordAddr(4), z).unwrap();

    assert_eq!(z, 7.0);
    assert_eq!(emu.instructions(), 4);
}

#[test]
fn arithmetic_does_not_touch_cache() {
    let mut emu = small_emulator();
    let _ = emu.add(1.0, 2.0);
    let _ = emu.multiply(3.0, 4.0);
    let stats = emu.stats();
    assert_eq!(stats.instructions, 2);
    assert_eq!(stats.reads() + stats.writes(), 0);
}

#[test]
fn stats_snapshot_matches_cache() {
    let mut emu = small_emulator();
    for a in 0..20 {
        let _ = emu.load(WordAddr(a)).unwrap();
    }
    emu.store(WordAddr(0), 1.0).unwrap();
    assert_eq!(
        emu.stats(),
        SimStats::from_parts(emu.instructions(), emu.cache().stats())
    );
}

#[test]
fn reset_zeroes_counters_and_keeps_memory() {
    let mut emu = small_emulator();
    emu.store(WordAddr(10), 2.5).unwrap();
    let _ = emu.load(WordAddr(0)).unwrap();
    emu.reset();

    assert_eq!(emu.instructions(), 0);
    assert_eq!(emu.stats(), SimStats::default());
    assert_eq!(emu.load(WordAddr(10)).unwrap(), 2.5);
    assert_eq!(emu.stats().compulsory_misses, 1);
}

#[test]
fn configure_uses_given_geometry() {
    let emu = Emulator::configure(
        4096,
        Associativity::FullyAssociative,
        16,
        ReplacementPolicy::Fifo,
    )
    .unwrap();
    let g = emu.geometry();
    assert_eq!((g.sets, g.ways, g.block_words), (1, 256, 2));
    assert_eq!(g.policy, ReplacementPolicy::Fifo);
}

#[test]
fn configure_rejects_bad_geometry() {
    let err = Emulator::configure(1000, Associativity::NWay(2), 64, ReplacementPolicy::Lru)
        .unwrap_err();
    assert!(matches!(err, SimError::Configuration(_)));
}

#[test]
fn load_beyond_memory_fails() {
    let mut emu = small_emulator();
    assert!(matches!(
        emu.load(WordAddr(1 << 30)),
        Err(SimError::OutOfRange { .. })
    ));
}

proptest! {
    /// A stored value is what the next load of that word returns, whatever
    /// happened to the cache in between.
    #[test]
    fn store_then_load_returns_value(
        addr in 0u64..4096,
        value in -1.0e6f64..1.0e6,
        noise in prop::collection::vec(0u64..4096, 0..32),
    ) {
        let mut emu = small_emulator();
        emu.store(WordAddr(addr), value).unwrap();
        for a in noise {
            let _ = emu.load(WordAddr(a)).unwrap();
        }
        prop_assert_eq!(emu.load(WordAddr(addr)).unwrap(), value);
    }
}
