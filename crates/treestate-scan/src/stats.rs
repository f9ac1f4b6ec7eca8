//! Scan statistics.

use treestate_core::EntryKind;

/// Summary statistics for a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Number of directories emitted.
    pub directories: u64,
    /// Number of symbolic links emitted.
    pub links: u64,
    /// Number of files emitted.
    pub files: u64,
    /// Entries skipped because they could not be read.
    pub skipped: u64,
    /// Entries left out by ignore patterns or the hidden-file filter.
    pub ignored: u64,
    /// Maximum depth reached (root is 0).
    pub max_depth: u32,
}

impl ScanStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an emitted entry.
    pub fn record(&mut self, kind: EntryKind, depth: u32) {
        match kind {
            EntryKind::Directory => self.directories += 1,
            EntryKind::Link => self.links += 1,
            EntryKind::File => self.files += 1,
        }
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record an entry that could not be read.
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Record an entry filtered out by configuration.
    pub fn record_ignored(&mut self) {
        self.ignored += 1;
    }

    /// Total entries emitted.
    pub fn total_entries(&self) -> u64 {
        self.directories + self.links + self.files
    }
}
