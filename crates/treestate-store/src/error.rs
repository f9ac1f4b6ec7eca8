//! Snapshot store errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing a snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The snapshot file could not be opened.
    #[error("Failed to open snapshot {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing or renaming the snapshot file failed.
    #[error("Failed to write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The encoded document could not be written to its sink.
    #[error("Failed to write snapshot: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not match the record layout,
    /// including unknown entry kinds and a missing format version.
    #[error("Malformed snapshot: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// The document was written by an incompatible format version.
    #[error("Unsupported snapshot format {found} (expected {expected})")]
    UnsupportedFormat { found: u64, expected: u32 },

    /// The same path is recorded twice.
    #[error("Duplicate path in snapshot: {path}")]
    DuplicatePath { path: PathBuf },

    /// A file record carries an out-of-range modification time.
    #[error("Invalid modification time for {path}")]
    InvalidModTime { path: PathBuf },

    /// The snapshot could not be encoded.
    #[error("Failed to serialize snapshot: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}
