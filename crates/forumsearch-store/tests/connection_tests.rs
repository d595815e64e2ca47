#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use forumsearch_core::config::StoreConfig;
use forumsearch_core::errors::SearchError;
use forumsearch_core::planner::QueryPlan;
use forumsearch_core::types::Sensitive;
use forumsearch_store::{ensure_connection, execute};
use std::fs;
use tempfile::TempDir;

fn store_config(dsn: String) -> StoreConfig {
    StoreConfig {
        dsn,
        ..StoreConfig::default()
    }
}

#[test]
fn test_ensure_connection_opens_existing_database() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("forum.db");
    common::create_forum_db(&db_path);

    let conn = ensure_connection(&store_config(db_path.display().to_string())).unwrap();
    let rows = execute(&QueryPlan::BySearchId("43".to_string()), &conn).unwrap();

    assert_eq!(rows.len(), 1);
}

#[test]
fn test_ensure_connection_accepts_sqlite_scheme_and_credentials() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("forum.db");
    common::create_forum_db(&db_path);

    let config = StoreConfig {
        dsn: format!("sqlite://{}", db_path.display()),
        user: Some("forum".to_string()),
        password: Some(Sensitive::new("123456".to_string())),
    };

    assert!(ensure_connection(&config).is_ok());
}

#[test]
fn test_missing_database_is_connection_error() {
    // Given: a path with no database
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("absent.db");

    // When: connecting
    let err = ensure_connection(&store_config(db_path.display().to_string()))
        .err()
        .unwrap();

    // Then: a Connection error, and the file was not created
    assert!(matches!(err, SearchError::Connection { .. }));
    assert!(!db_path.exists());
}

#[test]
fn test_non_database_file_is_connection_error() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("notes.db");
    fs::write(&db_path, "this is not a sqlite database, just some text padding it out").unwrap();

    let err = ensure_connection(&store_config(db_path.display().to_string()))
        .err()
        .unwrap();

    assert!(matches!(err, SearchError::Connection { .. }));
}

#[test]
fn test_connection_is_read_only() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("forum.db");
    common::create_forum_db(&db_path);

    let conn = ensure_connection(&store_config(db_path.display().to_string())).unwrap();
    let result = conn
        .as_connection()
        .execute("DELETE FROM vb_post", []);

    assert!(result.is_err());
}
