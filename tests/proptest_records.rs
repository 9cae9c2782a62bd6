//! Property-based tests for the line parser and the validator.
//!
//! Ensures neither panics on arbitrary input and that well-formed lines
//! always map to the first two tokens.

use datapackage_tools::pipeline::records::{parse_line, tokenize};
use datapackage_tools::DocumentValidator;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn parse_line_doesnt_panic(s in "\\PC{0,200}") {
        let _ = parse_line(&s);
    }

    #[test]
    fn parse_line_takes_first_two_tokens(
        hash in "[0-9a-f]{1,64}",
        name in "[A-Za-z0-9_./-]{1,40}",
        rest in prop::collection::vec("[a-z]{1,8}", 0..4),
        sep in "[ \t]{1,3}",
    ) {
        let mut line = format!("{hash}{sep}{name}");
        for token in &rest {
            line.push(' ');
            line.push_str(token);
        }
        let record = parse_line(&line).unwrap();
        prop_assert_eq!(record.hash_value, hash.as_str());
        prop_assert_eq!(record.name, name.as_str());
    }

    #[test]
    fn short_lines_report_token_count(token in "[^\\s]{1,20}", pad in "[ \t]{0,4}") {
        let line = format!("{pad}{token}{pad}");
        prop_assert_eq!(tokenize(&line).len(), 1);
        prop_assert!(parse_line(&line).is_err());
    }

    #[test]
    fn validate_str_doesnt_panic(s in "\\PC{0,500}") {
        let result = DocumentValidator::new(false).validate_str("<fuzz>", &s);
        // Arbitrary text never forms a complete document
        prop_assert!(!result.is_valid);
    }

    #[test]
    fn validate_json_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"\{"@graph": \[[^\]]{0,200}\]\}"#).unwrap()
    ) {
        let _ = DocumentValidator::new(true).validate_str("<fuzz>", &s);
    }
}
