//! Append-only search log
//!
//! One call appends one `text\n` line with a single write. The file must
//! already exist; creating it is an operator decision.

use crate::errors::{io_error, not_writable};
use forumsearch_core::errors::Result;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Opens the log target in append mode
///
/// The returned handle is closed when dropped.
pub trait AppendOpener {
    type Handle: Write;

    fn open_append(&self, path: &Path) -> io::Result<Self::Handle>;
}

/// Opens real files, append-only, without creating them
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAppendOpener;

impl AppendOpener for FsAppendOpener {
    type Handle = File;

    fn open_append(&self, path: &Path) -> io::Result<File> {
        OpenOptions::new().append(true).open(path)
    }
}

/// Append `text` as one line to the log at `path`
///
/// # Errors
/// * `NotWritable` - `path` is missing, not a regular file, read-only, or
///   the process is denied write access; nothing is written
/// * `Io` - open, write or flush failed for any other reason
pub fn log_search(text: &str, path: &Path) -> Result<()> {
    log_search_with(text, path, &FsAppendOpener)
}

/// `log_search` with an injected opener
pub fn log_search_with<O>(text: &str, path: &Path, opener: &O) -> Result<()>
where
    O: AppendOpener + ?Sized,
{
    ensure_writable(path)?;

    // Ownership and ACLs are only decided by the open itself
    let mut handle = opener.open_append(path).map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => not_writable(path),
        _ => io_error("open", path, e),
    })?;

    let mut line = String::with_capacity(text.len() + 1);
    line.push_str(text);
    line.push('\n');

    handle
        .write_all(line.as_bytes())
        .and_then(|()| handle.flush())
        .map_err(|e| io_error("write to", path, e))
}

fn ensure_writable(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() && !meta.permissions().readonly() => Ok(()),
        _ => Err(not_writable(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forumsearch_core::errors::SearchError;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_not_writable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.txt");

        let err = log_search("cats", &path).unwrap_err();
        assert!(matches!(err, SearchError::NotWritable { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_directory_is_not_writable() {
        let dir = TempDir::new().unwrap();
        let err = log_search("cats", dir.path()).unwrap_err();
        assert!(matches!(err, SearchError::NotWritable { .. }));
    }
}
