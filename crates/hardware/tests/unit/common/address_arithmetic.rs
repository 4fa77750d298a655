//! # Address Arithmetic Tests
//!
//! Verifies construction of [`WordAddr`] values and their decomposition into
//! tag, set, offset and block for a given geometry.

use cachesim_core::common::addr::{DecodedAddr, WordAddr};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

#[test]
fn word_addr_new_and_val() {
    let addr = WordAddr::new(0x1234);
    assert_eq!(addr.val(), 0x1234);
    assert_eq!(WordAddr::from(0x1234), addr);
}

#[test]
fn word_addr_display_is_hex() {
    assert_eq!(WordAddr(255).to_string(), "word 0xff");
}

/// Two-word blocks, two sets: the layout of the small direct-mapped fixture.
#[rstest]
#[case(0, 0, 0, 0, 0)]
#[case(1, 0, 0, 1, 0)]
#[case(2, 0, 1, 0, 1)]
#[case(4, 1, 0, 0, 2)]
#[case(5, 1, 0, 1, 2)]
#[case(7, 1, 1, 1, 3)]
fn decompose_small_geometry(
    #[case] addr: u64,
    #[case] tag: u64,
    #[case] set: usize,
    #[case] offset: usize,
    #[case] block: u64,
) {
    assert_eq!(
        WordAddr(addr).decompose(2, 2),
        DecodedAddr {
            tag,
            set,
            offset,
            block
        }
    );
}

/// With a single set the tag is the block number.
#[test]
fn decompose_single_set_tag_is_block() {
    let decoded = WordAddr(1000).decompose(8, 1);
    assert_eq!(decoded.set, 0);
    assert_eq!(decoded.tag, decoded.block);
    assert_eq!(decoded.block, 125);
}

proptest! {
    /// The three fields always reassemble into the original address.
    #[test]
    fn decompose_reassembles(
        addr in 0u64..1 << 40,
        block_words in 1usize..64,
        sets in 1usize..1024,
    ) {
        let d = WordAddr(addr).decompose(block_words, sets);
        let (bw, s) = (block_words as u64, sets as u64);
        prop_assert!(d.offset < block_words);
        prop_assert!(d.set < sets);
        prop_assert_eq!(d.block, addr / bw);
        prop_assert_eq!(d.tag * s * bw + d.set as u64 * bw + d.offset as u64, addr);
    }
}

/// Four-word blocks, two sets.
#[rstest]
#[case(0, (0, 0, 0))]
#[case(4, (0, 1, 0))]
#[case(8, (1, 0, 0))]
#[case(11, (1, 0, 3))]
fn decompose_four_word_blocks(#[case] addr: u64, #[case] expected: (u64, usize, usize)) {
    let d = WordAddr(addr).decompose(4, 2);
    assert_eq!((d.tag, d.set, d.offset), expected);
}
