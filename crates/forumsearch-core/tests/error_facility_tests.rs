#![allow(clippy::unwrap_used, clippy::expect_used)]

use forumsearch_core::errors::{ExError, ExErrorKind, SearchError};

#[test]
fn test_validation_errors_carry_field() {
    let ex: ExError = SearchError::InvalidType {
        field: "do".to_string(),
    }
    .into();

    assert_eq!(ex.kind(), ExErrorKind::InvalidType);
    assert_eq!(ex.code(), "ERR_INVALID_TYPE");
    assert_eq!(ex.field(), Some("do"));
    assert_eq!(ex.op(), Some("validate"));
}

#[test]
fn test_not_writable_carries_path() {
    let ex: ExError = SearchError::NotWritable {
        path: "/var/www/search_log.txt".to_string(),
    }
    .into();

    assert_eq!(ex.kind(), ExErrorKind::NotWritable);
    assert_eq!(ex.path(), Some("/var/www/search_log.txt"));
    assert!(ex.message().contains("not writable"));
}

#[test]
fn test_store_errors_hidden_from_public_message_by_default() {
    let err = SearchError::Execution {
        message: "no such table: vb_post".to_string(),
    };

    assert_eq!(err.public_message(false), "search could not be completed");
    assert_eq!(err.public_message(true), "query failed: no such table: vb_post");

    let err = SearchError::Connection {
        message: "unable to open database file".to_string(),
    };
    assert!(!err.public_message(false).contains("database file"));
}

#[test]
fn test_request_errors_always_public() {
    let err = SearchError::MissingField {
        field: "searchid".to_string(),
    };
    assert_eq!(err.public_message(false), "missing field: searchid");
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::MissingField, "ERR_MISSING_FIELD"),
        (ExErrorKind::InvalidType, "ERR_INVALID_TYPE"),
        (ExErrorKind::UnexpectedField, "ERR_UNEXPECTED_FIELD"),
        (ExErrorKind::UnrecognizedRequest, "ERR_UNRECOGNIZED_REQUEST"),
        (ExErrorKind::Connection, "ERR_CONNECTION"),
        (ExErrorKind::Execution, "ERR_EXECUTION"),
        (ExErrorKind::NotWritable, "ERR_NOT_WRITABLE"),
        (ExErrorKind::Io, "ERR_IO"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}
