//! Tree scanning engine for treestate.
//!
//! Walks a directory tree depth-first in pre-order and produces one typed
//! [`Entry`] per path. Children are visited in lexicographic name order so
//! two scans of an unchanged tree yield identical entry sequences.
//!
//! # Example
//!
//! ```rust,no_run
//! use treestate_scan::{ScanConfig, Scanner};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let outcome = Scanner::new().scan(&config).unwrap();
//!
//! println!("{} entries", outcome.snapshot.len());
//! for warning in &outcome.warnings {
//!     eprintln!("skipped {}: {}", warning.path.display(), warning.message);
//! }
//! ```
//!
//! # Streaming
//!
//! [`Scanner::walk`] returns a lazy iterator instead of a collected snapshot:
//!
//! ```rust,no_run
//! use treestate_scan::{ScanConfig, Scanner};
//!
//! let mut walker = Scanner::new().walk(&ScanConfig::new(".")).unwrap();
//! for entry in walker.by_ref() {
//!     println!("{}", entry.unwrap().path().display());
//! }
//! println!("{} skipped", walker.warnings().len());
//! ```

mod scanner;
mod stats;
mod walker;

pub use scanner::{ScanOutcome, Scanner};
pub use stats::ScanStats;
pub use walker::TreeWalker;

// Re-export core types for convenience
pub use treestate_core::{
    Entry, EntryKind, ErrorPolicy, ModTime, ScanConfig, ScanError, ScanWarning, Snapshot,
    WarningKind,
};
