//! Store-specific error helpers
//!
//! Map driver and filesystem errors onto `SearchError` at the boundary.

use forumsearch_core::errors::SearchError;
use std::path::Path;

/// Connection could not be opened or probed
pub fn connection_error(err: rusqlite::Error) -> SearchError {
    SearchError::Connection {
        message: err.to_string(),
    }
}

/// Prepare, bind, step or column read failed
pub fn from_rusqlite(err: rusqlite::Error) -> SearchError {
    SearchError::Execution {
        message: err.to_string(),
    }
}

/// Search log open/write failed
pub fn io_error(step: &str, path: &Path, err: std::io::Error) -> SearchError {
    SearchError::Io {
        message: format!("cannot {} {}: {}", step, path.display(), err),
    }
}

pub fn not_writable(path: &Path) -> SearchError {
    SearchError::NotWritable {
        path: path.display().to_string(),
    }
}
