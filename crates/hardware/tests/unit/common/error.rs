//! # Error Tests
//!
//! Verifies the rendered messages of [`SimError`] and the JSON conversion.

use cachesim_core::common::error::SimError;

#[test]
fn out_of_range_message_names_block_and_size() {
    let err = SimError::OutOfRange {
        block: 9,
        blocks: 8,
    };
    assert_eq!(
        err.to_string(),
        "block 9 is out of range (backing store holds 8 blocks)"
    );
}

#[test]
fn parse_error_quotes_input() {
    let err = SimError::Parse {
        what: "associativity",
        input: "sideways".to_owned(),
    };
    assert_eq!(err.to_string(), "cannot parse associativity from \"sideways\"");
}

#[test]
fn configuration_error_prefix() {
    let err = SimError::Configuration("bad".to_owned());
    assert_eq!(err.to_string(), "invalid cache configuration: bad");
}

#[test]
fn json_error_converts() {
    let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
    let err: SimError = json_err.into();
    assert!(matches!(err, SimError::Json(_)));
    assert!(err.to_string().starts_with("malformed configuration"));
}
