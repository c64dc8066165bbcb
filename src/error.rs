//! Error types for playlist operations

use std::path::PathBuf;

/// Failures the store absorbs and reports as diagnostics
#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    #[error("Row {row} out of range (playlist has {len} entries)")]
    InvalidIndex { row: usize, len: usize },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unrecognized save file header: {0}")]
    BadHeader(String),

    #[error("Malformed save file data: {0}")]
    Malformed(String),
}

impl PlaylistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for fallible playlist internals
pub type Result<T> = std::result::Result<T, PlaylistError>;
