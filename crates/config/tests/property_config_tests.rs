//! Property-based tests for configuration value parsing.
//!
//! # Invariants
//! - Log format parsing ignores ASCII case.
//! - Anything other than `text` or `json` is rejected with the offending value.

use dashlens_config::LogFormat;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn log_format_parse_ignores_case(upper in proptest::collection::vec(any::<bool>(), 4)) {
        let mixed: String = "json"
            .chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect();
        prop_assert_eq!(mixed.parse::<LogFormat>(), Ok(LogFormat::Json));
    }

    #[test]
    fn unknown_log_formats_are_rejected(value in "[a-z]{1,10}") {
        prop_assume!(value != "text" && value != "json");
        let err = value.parse::<LogFormat>().unwrap_err();
        prop_assert!(err.contains(&value));
    }
}
