//! # Workload Tests
//!
//! Verifies instruction counts, numeric results and cache behavior of the
//! benchmark kernels. Most tests use small problem sizes over a small backing
//! store; the default-size checks pin the headline instruction counts.

use cachesim_core::common::addr::WordAddr;
use cachesim_core::config::{Associativity, Config, ReplacementPolicy};
use cachesim_core::sim::Workload;
use cachesim_core::sim::workloads::{
    DOT_PRODUCT_LEN, dot_product, matmul, matmul_blocked, matmul_interchanged,
};
use cachesim_core::{Emulator, common::error::SimError};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::small_config;

fn default_cache_small_memory() -> Emulator {
    Emulator::new(&small_config(
        64 * 1024,
        Associativity::NWay(2),
        64,
        ReplacementPolicy::Lru,
    ))
    .unwrap()
}

/// Loads the `n x n` result matrix `C` back out of the emulator.
fn result_matrix(emu: &mut Emulator, n: u64) -> Vec<f64> {
    (0..n * n)
        .map(|i| emu.load(WordAddr(2 * n * n + i)).unwrap())
        .collect()
}

/// `A * B` computed directly from the seeded memory contents.
fn expected_product(n: u64) -> Vec<f64> {
    let a = |i: u64, k: u64| ((i * n + k) % 100) as f64;
    let b = |k: u64, j: u64| ((n * n + k * n + j) % 100) as f64;
    let mut c = Vec::new();
    for i in 0..n {
        for j in 0..n {
            c.push((0..n).map(|k| a(i, k) * b(k, j)).sum());
        }
    }
    c
}

// ══════════════════════════════════════════════════════════
// 1. Dot product
// ══════════════════════════════════════════════════════════

#[test]
fn dot_product_small() {
    let mut emu = default_cache_small_memory();
    let r = dot_product(&mut emu, 10).unwrap();

    // x[i] = i, y[i] = 10 + i
    assert_eq!(r, 735.0);
    let stats = emu.stats();
    assert_eq!(stats.instructions, 41);
    assert_eq!(stats.read_hits, 17);
    assert_eq!(stats.compulsory_misses, 3);
    assert_eq!(stats.write_hits, 1);
    assert_eq!(stats.write_misses, 0);
    assert_eq!(emu.load(WordAddr(20)).unwrap(), 735.0);
}

#[test]
fn dot_product_default_size() {
    let mut emu = Emulator::new(&Config::default()).unwrap();
    Workload::DotProduct.run(&mut emu).unwrap();
    assert_eq!(emu.instructions(), 4 * DOT_PRODUCT_LEN + 1);
    assert_eq!(emu.instructions(), 40_001);
    assert_eq!(emu.stats().compulsory_misses, 2 * DOT_PRODUCT_LEN / 8);
}

// ══════════════════════════════════════════════════════════
// 2. Matrix multiply
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(2)]
#[case(4)]
#[case(7)]
fn matmul_instruction_count(#[case] n: u64) {
    let mut naive = default_cache_small_memory();
    matmul(&mut naive, n).unwrap();
    assert_eq!(naive.instructions(), n * n * (4 * n + 1));

    let mut interchanged = default_cache_small_memory();
    matmul_interchanged(&mut interchanged, n).unwrap();
    assert_eq!(interchanged.instructions(), n * n * (4 * n + 1));
}

#[test]
fn matmul_variants_agree_with_direct_product() {
    let n = 6;
    let expected = expected_product(n);

    let mut naive = default_cache_small_memory();
    matmul(&mut naive, n).unwrap();
    assert_eq!(result_matrix(&mut naive, n), expected);

    let mut interchanged = default_cache_small_memory();
    matmul_interchanged(&mut interchanged, n).unwrap();
    assert_eq!(result_matrix(&mut interchanged, n), expected);
}

#[rstest]
#[case(4, 2)]
#[case(5, 2)]
#[case(6, 6)]
#[case(6, 4)]
fn blocked_matches_direct_product(#[case] n: u64, #[case] b: u64) {
    let mut emu = default_cache_small_memory();
    matmul_blocked(&mut emu, n, b).unwrap();
    assert_eq!(result_matrix(&mut emu, n), expected_product(n));
}

/// Counters only cover the tiled loops, not zeroing `C`.
#[test]
fn blocked_counts_after_reset() {
    let mut emu = default_cache_small_memory();
    matmul_blocked(&mut emu, 4, 2).unwrap();
    // n^2 * (n / b) * (4b + 3)
    assert_eq!(emu.instructions(), 16 * 2 * 11);
    assert_eq!(emu.stats().write_misses, 0, "every store follows a load of the same word");
}

#[test]
fn blocked_default_size() {
    let mut emu = Emulator::new(&Config::default()).unwrap();
    Workload::MatmulBlocked.run(&mut emu).unwrap();
    assert_eq!(emu.instructions(), 4_300_000);
}

#[test]
fn blocked_rejects_zero_factor() {
    let mut emu = default_cache_small_memory();
    assert!(matches!(
        matmul_blocked(&mut emu, 4, 0),
        Err(SimError::Configuration(_))
    ));
}

/// Interchanging the loops walks `B` by row within a column sweep of `C`,
/// which changes the miss mix on a tiny cache but not the work done.
#[test]
fn interchange_changes_misses_not_work() {
    let config = small_config(256, Associativity::DirectMapped, 32, ReplacementPolicy::Lru);
    let mut naive = Emulator::new(&config).unwrap();
    let mut interchanged = Emulator::new(&config).unwrap();
    matmul(&mut naive, 8).unwrap();
    matmul_interchanged(&mut interchanged, 8).unwrap();

    let (a, b) = (naive.stats(), interchanged.stats());
    assert_eq!(a.instructions, b.instructions);
    assert_eq!(a.reads(), b.reads());
    assert_eq!(a.compulsory_misses, b.compulsory_misses);
    assert_ne!(a, b);
}

#[test]
fn repeated_runs_are_identical() {
    let config = small_config(1024, Associativity::NWay(4), 32, ReplacementPolicy::Random);
    let run = || {
        let mut emu = Emulator::new(&config).unwrap();
        matmul(&mut emu, 8).unwrap();
        emu.stats()
    };
    assert_eq!(run(), run());
}

// ══════════════════════════════════════════════════════════
// 3. Names
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("dot", Workload::DotProduct)]
#[case("mxm", Workload::Matmul)]
#[case("mxm-loop", Workload::MatmulInterchanged)]
#[case("MXM-BLOCKING", Workload::MatmulBlocked)]
fn workload_from_str(#[case] text: &str, #[case] expected: Workload) {
    assert_eq!(text.parse::<Workload>().unwrap(), expected);
}

#[test]
fn workload_names_round_trip() {
    for w in Workload::ALL {
        assert_eq!(w.to_string().parse::<Workload>().unwrap(), w);
    }
    assert!("qsort".parse::<Workload>().is_err());
}
