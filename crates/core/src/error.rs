//! Session store error types

use std::path::PathBuf;

/// Errors from persistent session stores.
///
/// Only the strict read/write entry points surface these; the `SessionStore`
/// trait itself degrades gracefully so a corrupt session file reads as
/// logged-out rather than failing every request.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read session file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write session file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid session file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
