//! Snapshot comparison for treestate.
//!
//! Compares a baseline snapshot with the entries of a fresh scan and reports
//! what is new or modified, in the order of the fresh scan:
//!
//! - a path missing from the baseline is **new**, reported for files and
//!   links only; a new directory shows up through its contents
//! - a file whose modification time differs from the baseline is
//!   **modified**, whichever direction the time moved
//! - directories and links present in the baseline are never reported
//!
//! Removed paths are not reported.
//!
//! ```rust
//! use treestate_core::{Entry, ModTime, Snapshot};
//! use treestate_diff::diff;
//!
//! let baseline = Snapshot::new("/a", vec![
//!     Entry::directory("/a"),
//!     Entry::file("/a/x.txt", ModTime::new(1, 0)),
//! ]);
//! let current = vec![
//!     Entry::directory("/a"),
//!     Entry::file("/a/new.txt", ModTime::new(5, 0)),
//!     Entry::file("/a/x.txt", ModTime::new(2, 0)),
//! ];
//!
//! let changes = diff(&baseline, &current);
//! let paths: Vec<_> = changes.iter().map(|c| c.path.to_str().unwrap()).collect();
//! assert_eq!(paths, ["/a/new.txt", "/a/x.txt"]);
//! ```

mod differ;

pub use differ::{BaselineIndex, Change, ChangeKind, diff};
