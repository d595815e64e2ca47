#![allow(clippy::unwrap_used, clippy::expect_used)]

use forumsearch_core::rules::{escape_markup, validate, ValidationRules};
use forumsearch_core::{RequestFields, SearchError};
use proptest::prelude::*;

const REQUIRED: [&str; 3] = ["searchid", "do", "query"];

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9<>&\"' ]{1,24}".prop_filter("needs non-blank content", |s| !s.trim().is_empty())
}

proptest! {
    #[test]
    fn missing_required_field_is_named(
        missing in 0usize..3,
        values in proptest::collection::vec(arb_text(), 3),
    ) {
        // Given: a request with every required field except one
        let mut request = RequestFields::new();
        for (i, name) in REQUIRED.iter().enumerate() {
            if i != missing {
                request.insert(*name, values[i].clone());
            }
        }

        // When: validated against the default table
        let err = validate(request, &ValidationRules::default()).unwrap_err();

        // Then: the error names the missing field
        prop_assert_eq!(err, SearchError::MissingField { field: REQUIRED[missing].to_string() });
    }

    #[test]
    fn sanitized_fields_carry_no_raw_markup(query in arb_text()) {
        let request: RequestFields = [
            ("searchid", "1".to_string()),
            ("do", "process".to_string()),
            ("query", query.clone()),
        ]
        .into_iter()
        .collect();

        let validated = validate(request, &ValidationRules::default()).unwrap();
        let sanitized = validated.get_text("query").unwrap();

        prop_assert!(!sanitized.contains(|c: char| matches!(c, '<' | '>' | '"' | '\'')));
        prop_assert_eq!(sanitized, escape_markup(query.trim()));
    }

    #[test]
    fn escaping_twice_differs_from_once_when_markup_present(s in "[a-z]{0,8}[<>&\"'][a-z]{0,8}") {
        let once = escape_markup(&s);
        prop_assert_ne!(escape_markup(&once), once);
    }
}
