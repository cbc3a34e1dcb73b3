//! Property-based tests for the search id route codec.
//!
//! Route ids are the minimal big-endian bytes of the id in URL-safe base64
//! without padding; these tests check that shape for arbitrary ids and that
//! decoding recovers the id.

use proptest::prelude::*;
use rstest::rstest;

use tickerlens::services::search_codec::{decode_search_id, encode_search_id, search_href};
use tickerlens::types::errors::CodecError;

fn minimal_len(id: u64) -> usize {
    let bits = 64 - id.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn encoded_ids_are_url_safe_and_minimal(id in any::<u64>()) {
        let encoded = encode_search_id(id);

        prop_assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        let bytes = minimal_len(id);
        prop_assert_eq!(encoded.len(), (bytes * 4).div_ceil(3));
        prop_assert_eq!(decode_search_id(&encoded), Ok(id));
        prop_assert_eq!(search_href(id), format!("/search/{}", encoded));
    }
}

#[rstest]
#[case(0, "AA")]
#[case(1, "AQ")]
#[case(61, "PQ")]
#[case(255, "_w")]
#[case(256, "AQA")]
#[case(300, "ASw")]
#[case(u64::MAX, "__________8")]
fn test_known_encodings(#[case] id: u64, #[case] encoded: &str) {
    assert_eq!(encode_search_id(id), encoded);
    assert_eq!(decode_search_id(encoded), Ok(id));
}

#[test]
fn test_leading_zero_bytes_still_decode() {
    assert_eq!(decode_search_id("AAE"), Ok(1));
}

#[rstest]
#[case("")]
#[case("   ")]
fn test_empty_input(#[case] encoded: &str) {
    assert_eq!(decode_search_id(encoded), Err(CodecError::Empty));
}

#[test]
fn test_invalid_alphabet() {
    assert!(matches!(decode_search_id("a+b/"), Err(CodecError::InvalidEncoding(_))));
    assert!(matches!(decode_search_id("PQ=="), Err(CodecError::InvalidEncoding(_))));
}

#[test]
fn test_more_than_eight_bytes_is_too_large() {
    // nine 0x01 bytes
    assert_eq!(decode_search_id("AQEBAQEBAQEB"), Err(CodecError::TooLarge(9)));
}
