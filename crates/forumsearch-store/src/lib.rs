//! forumsearch store - SQLite access and the search log
//!
//! Provides:
//! - Connection acquisition from a DSN (`ensure_connection`)
//! - The `ParameterizedStore` seam and its rusqlite implementation
//! - The query executor for a `QueryPlan`
//! - Append-only search log

pub mod db;
pub mod errors;
pub mod executor;
pub mod search_log;

pub use db::{ensure_connection, ParameterizedStore, SqliteConnection};
pub use executor::execute;
pub use search_log::{log_search, log_search_with, AppendOpener, FsAppendOpener};
