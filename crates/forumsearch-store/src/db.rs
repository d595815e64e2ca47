//! Database connection management
//!
//! One connection per request: opened read-only, probed once, owned by the
//! caller for the request and dropped afterwards.

use crate::errors::{connection_error, from_rusqlite};
use forumsearch_core::config::StoreConfig;
use forumsearch_core::errors::Result;
use forumsearch_core::model::{ResultRow, RowValue};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};

/// A store that runs a fixed template with exactly one bound parameter
pub trait ParameterizedStore {
    /// Run `template`, binding `param` to its single positional placeholder
    ///
    /// # Errors
    /// `SearchError::Execution` on any prepare/bind/step failure
    fn query(&self, template: &str, param: &str) -> Result<Vec<ResultRow>>;
}

/// Request-scoped SQLite connection
pub struct SqliteConnection {
    conn: Connection,
}

impl SqliteConnection {
    /// Wrap an already open connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn as_connection(&self) -> &Connection {
        &self.conn
    }
}

impl ParameterizedStore for SqliteConnection {
    fn query(&self, template: &str, param: &str) -> Result<Vec<ResultRow>> {
        query_rows(&self.conn, template, param)
    }
}

impl ParameterizedStore for Connection {
    fn query(&self, template: &str, param: &str) -> Result<Vec<ResultRow>> {
        query_rows(self, template, param)
    }
}

/// Open and probe a connection for `config`
///
/// SQLite has no credentials; `user`/`password` are accepted and ignored.
///
/// # Errors
/// `SearchError::Connection` if the database is missing, unreadable or not
/// a SQLite file
pub fn ensure_connection(config: &StoreConfig) -> Result<SqliteConnection> {
    let target = resolve_dsn(&config.dsn);
    if config.user.is_some() || config.password.is_some() {
        tracing::debug!(
            user = config.user.as_deref().unwrap_or_default(),
            "sqlite store ignores credentials"
        );
    }

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(target, flags).map_err(connection_error)?;

    // Opening is lazy; touch the schema so a bad file fails here
    conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
        row.get::<_, i64>(0)
    })
    .map_err(connection_error)?;

    Ok(SqliteConnection::from_connection(conn))
}

/// Strip a `sqlite://` / `sqlite:` scheme; `file:` URIs pass through
fn resolve_dsn(dsn: &str) -> &str {
    let dsn = dsn.trim();
    dsn.strip_prefix("sqlite://")
        .or_else(|| dsn.strip_prefix("sqlite:"))
        .unwrap_or(dsn)
}

fn query_rows(conn: &Connection, template: &str, param: &str) -> Result<Vec<ResultRow>> {
    let mut stmt = conn.prepare(template).map_err(from_rusqlite)?;
    let names: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();

    let mut rows = stmt.query([param]).map_err(from_rusqlite)?;
    let mut out = Vec::new();
    while let Some(row) = rows.next().map_err(from_rusqlite)? {
        let mut result = ResultRow::new();
        for (idx, name) in names.iter().enumerate() {
            let value = match row.get_ref(idx).map_err(from_rusqlite)? {
                ValueRef::Null => RowValue::Null,
                ValueRef::Integer(n) => RowValue::Integer(n),
                ValueRef::Real(f) => RowValue::Real(f),
                ValueRef::Text(bytes) => RowValue::Text(String::from_utf8_lossy(bytes).into_owned()),
                ValueRef::Blob(bytes) => RowValue::Text(hex::encode(bytes)),
            };
            result.push(name.clone(), value);
        }
        out.push(result);
    }
    Ok(out)
}
