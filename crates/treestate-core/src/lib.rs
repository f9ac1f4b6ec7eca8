//! Core types for treestate.
//!
//! This crate provides the data model shared by the scanner, the snapshot
//! store and the differ: typed tree entries, snapshots, scan configuration
//! and the scan error types.

mod config;
mod entry;
mod error;
mod snapshot;

pub use config::{ErrorPolicy, ScanConfig, ScanConfigBuilder, ScanConfigBuilderError};
pub use entry::{Entry, EntryKind, ModTime};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use snapshot::Snapshot;
