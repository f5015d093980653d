//! Property tests for the pure row and type-string transformations.

use proptest::prelude::*;
use schemasnap_core::normalize::{extract_length, lowercase_keys, strip_length};
use schemasnap_core::Row;
use serde_json::json;

proptest! {
    #[test]
    fn strip_length_returns_prefix_before_first_paren(
        base in "[a-z]{1,10}",
        size in 0u32..100_000u32,
    ) {
        let raw = format!("{base}({size})");
        prop_assert_eq!(strip_length(&raw), base.as_str());
    }

    #[test]
    fn extract_length_reads_a_single_parenthesized_size(
        base in "[a-z]{1,10}",
        size in 0u64..1_000_000u64,
    ) {
        let raw = format!("{base}({size})");
        prop_assert_eq!(extract_length(&raw), size);
    }

    // Short inputs keep the expected value computable without saturation.
    #[test]
    fn extract_length_concatenates_every_digit(raw in "[a-z0-9(),' ]{0,18}") {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        let expected = if digits.is_empty() {
            0
        } else {
            digits.parse::<u64>().unwrap()
        };
        prop_assert_eq!(extract_length(&raw), expected);
    }

    #[test]
    fn types_without_digits_have_zero_length(base in "[a-z]{1,12}") {
        prop_assert_eq!(extract_length(&base), 0);
        prop_assert_eq!(strip_length(&base), base.as_str());
    }

    #[test]
    fn lowercase_keys_is_idempotent(
        keys in prop::collection::vec("[A-Za-z_]{1,10}", 0..8),
    ) {
        let row: Row = keys
            .iter()
            .map(|key| (key.clone(), json!(1)))
            .collect();
        let once = lowercase_keys(row);
        let twice = lowercase_keys(once.clone());
        prop_assert_eq!(once, twice);
    }
}
