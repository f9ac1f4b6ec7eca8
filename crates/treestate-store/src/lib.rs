//! Snapshot persistence for treestate.
//!
//! A snapshot is stored as one pretty-printed JSON document holding a format
//! version, the scan root, the scan time and the ordered entry records. Every
//! record carries an explicit `kind` tag:
//!
//! ```json
//! {
//!  "format": 1,
//!  "root": "src",
//!  "created_at": "2024-05-01T12:00:00Z",
//!  "entries": [
//!   { "kind": "directory", "path": "src" },
//!   { "kind": "file", "path": "src/main.rs", "mtime": { "secs": 1714564800, "nanos": 0 } }
//!  ]
//! }
//! ```
//!
//! Writes go to a temporary file next to the destination which is then
//! renamed into place, so a reader never sees a half-written snapshot.

mod error;
mod store;

pub use error::StoreError;
pub use store::{FORMAT_VERSION, from_reader, read_snapshot, to_writer, write_snapshot};
