//! Property-based tests for northern
//!
//! These tests verify invariants that must hold for all inputs:
//! - SIC normalization is idempotent
//! - Normalization never panics and never emits empty segments
//! - Token order is preserved
//!
//! Run with: cargo test --test property_tests

use proptest::prelude::*;

// ============================================================================
// SIC CODE NORMALIZATION TESTS
// ============================================================================

mod sic_tests {
    use super::*;
    use northern::tools::{normalize_sic_codes, SicCodes};

    fn token() -> impl Strategy<Value = String> {
        "[0-9]{4,5}"
    }

    fn padded_token() -> impl Strategy<Value = String> {
        ("[ \t]{0,3}", "[0-9]{0,5}", "[ \t]{0,3}").prop_map(|(l, t, r)| format!("{}{}{}", l, t, r))
    }

    /// List elements that may carry their own separators and blank segments
    fn messy_element() -> impl Strategy<Value = String> {
        "[0-9 ,\t]{0,12}"
    }

    proptest! {
        /// Invariant: normalize_sic_codes never panics on any string input
        #[test]
        fn never_panics(s in ".*") {
            let _ = normalize_sic_codes(&SicCodes::Scalar(s));
        }

        /// Invariant: Normalizing a normalized scalar is a no-op
        #[test]
        fn idempotent_scalar(s in "\\PC{0,100}") {
            let once = normalize_sic_codes(&SicCodes::Scalar(s));
            let twice = normalize_sic_codes(&SicCodes::Scalar(once.clone()));
            prop_assert_eq!(once, twice);
        }

        /// Invariant: Normalizing a normalized sequence is a no-op
        #[test]
        fn idempotent_sequence(items in prop::collection::vec(padded_token(), 0..8)) {
            let once = normalize_sic_codes(&SicCodes::Sequence(items));
            let twice = normalize_sic_codes(&SicCodes::Scalar(once.clone()));
            prop_assert_eq!(once, twice);
        }

        /// Invariant: No empty segments and no boundary whitespace per code
        #[test]
        fn no_empty_segments(s in "[0-9 ,\t]{0,60}") {
            let normalized = normalize_sic_codes(&SicCodes::Scalar(s));
            if !normalized.is_empty() {
                for code in normalized.split(',') {
                    prop_assert!(!code.is_empty());
                    prop_assert_eq!(code, code.trim());
                }
            }
        }

        /// Invariant: Lists with comma-laden elements still normalize to clean codes
        #[test]
        fn sequence_elements_clean(items in prop::collection::vec(messy_element(), 0..8)) {
            let normalized = normalize_sic_codes(&SicCodes::Sequence(items));
            if !normalized.is_empty() {
                for code in normalized.split(',') {
                    prop_assert!(!code.is_empty());
                    prop_assert_eq!(code, code.trim());
                }
            }
            let twice = normalize_sic_codes(&SicCodes::Scalar(normalized.clone()));
            prop_assert_eq!(normalized, twice);
        }

        /// Invariant: Comma-laden lists agree with their comma-joined form
        #[test]
        fn messy_sequence_matches_scalar(items in prop::collection::vec(messy_element(), 0..8)) {
            let joined = items.join(",");
            prop_assert_eq!(
                normalize_sic_codes(&SicCodes::Sequence(items)),
                normalize_sic_codes(&SicCodes::Scalar(joined))
            );
        }

        /// Invariant: A list and its comma-joined form normalize identically
        #[test]
        fn sequence_matches_scalar(items in prop::collection::vec(padded_token(), 0..8)) {
            let joined = items.join(",");
            prop_assert_eq!(
                normalize_sic_codes(&SicCodes::Sequence(items)),
                normalize_sic_codes(&SicCodes::Scalar(joined))
            );
        }

        /// Invariant: Clean codes survive in their original order
        #[test]
        fn preserves_order(codes in prop::collection::vec(token(), 1..8)) {
            let normalized = normalize_sic_codes(&SicCodes::Sequence(codes.clone()));
            let parts: Vec<&str> = normalized.split(',').collect();
            prop_assert_eq!(parts, codes.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }

    #[test]
    fn absent_is_empty() {
        assert_eq!(normalize_sic_codes(&SicCodes::Absent), "");
    }
}

// ============================================================================
// SEARCH PARAMETER TESTS
// ============================================================================

mod search_params_tests {
    use super::*;
    use northern::tools::SearchParams;
    use serde_json::json;

    proptest! {
        /// Invariant: sic_codes is either absent or non-empty, never ""
        #[test]
        fn sic_codes_never_empty(s in "[0-9 ,]{0,40}") {
            let params = SearchParams::from_args(&json!({"location": "Leeds", "sic_codes": s})).unwrap();
            prop_assert!(params.sic_codes.as_deref() != Some(""));
            let has_key = params.query_pairs().iter().any(|(k, _)| *k == "sic_codes");
            prop_assert_eq!(has_key, params.sic_codes.is_some());
        }

        /// Invariant: Location is always trimmed
        #[test]
        fn location_trimmed(s in "\\PC{0,40}") {
            let params = SearchParams::from_args(&json!({"location": s})).unwrap();
            prop_assert_eq!(params.location.as_str(), params.location.trim());
        }

        /// Invariant: Any integer size passes through unchanged
        #[test]
        fn integer_size_passthrough(size in any::<i64>()) {
            let params = SearchParams::from_args(&json!({"location": "York", "size": size})).unwrap();
            prop_assert_eq!(params.size, size);
        }
    }
}
