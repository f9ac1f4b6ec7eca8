//! Collecting scanner.

use std::time::{Duration, Instant};

use tracing::info;

use treestate_core::{ScanConfig, ScanError, ScanWarning, Snapshot};

use crate::stats::ScanStats;
use crate::walker::TreeWalker;

/// Result of a completed scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Entries in traversal order.
    pub snapshot: Snapshot,
    /// Summary statistics.
    pub stats: ScanStats,
    /// Entries that were skipped under [`ErrorPolicy::Skip`](treestate_core::ErrorPolicy::Skip).
    pub warnings: Vec<ScanWarning>,
    /// Wall time of the scan.
    pub duration: Duration,
}

impl ScanOutcome {
    /// True when no entry had to be skipped.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Sequential tree scanner.
#[derive(Debug, Default, Clone, Copy)]
pub struct Scanner;

impl Scanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Start a lazy walk of the configured tree.
    pub fn walk(&self, config: &ScanConfig) -> Result<TreeWalker, ScanError> {
        TreeWalker::new(config)
    }

    /// Walk the whole tree and collect it into a snapshot.
    pub fn scan(&self, config: &ScanConfig) -> Result<ScanOutcome, ScanError> {
        let start = Instant::now();
        let mut walker = self.walk(config)?;
        let entries = walker.by_ref().collect::<Result<Vec<_>, _>>()?;
        let (stats, warnings) = walker.into_parts();
        let duration = start.elapsed();

        info!(
            root = %config.root.display(),
            entries = stats.total_entries(),
            skipped = stats.skipped,
            elapsed = ?duration,
            "scan finished"
        );

        Ok(ScanOutcome {
            snapshot: Snapshot::new(&config.root, entries),
            stats,
            warnings,
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use treestate_core::{EntryKind, ErrorPolicy};

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("dir1")).unwrap();
        fs::create_dir(root.join("dir2")).unwrap();
        fs::create_dir(root.join("dir1/subdir")).unwrap();

        fs::write(root.join("file1.txt"), "hello").unwrap();
        fs::write(root.join("dir1/file2.txt"), "world world world").unwrap();
        fs::write(root.join("dir1/subdir/file3.txt"), "test").unwrap();
        fs::write(root.join("dir2/file4.txt"), "another file here").unwrap();

        temp
    }

    #[test]
    fn test_basic_scan() {
        let temp = create_test_tree();
        let outcome = Scanner::new().scan(&ScanConfig::new(temp.path())).unwrap();

        assert_eq!(outcome.stats.files, 4);
        assert_eq!(outcome.stats.directories, 4);
        assert_eq!(outcome.stats.max_depth, 3);
        assert!(outcome.is_complete());
        assert_eq!(outcome.snapshot.root, temp.path());
        assert_eq!(outcome.snapshot.entries[0].kind(), EntryKind::Directory);
        assert_eq!(outcome.snapshot.entries[0].path(), temp.path());
    }

    #[test]
    fn test_consecutive_scans_identical() {
        let temp = create_test_tree();
        let config = ScanConfig::new(temp.path());
        let scanner = Scanner::new();

        let first = scanner.scan(&config).unwrap();
        let second = scanner.scan(&config).unwrap();
        assert_eq!(first.snapshot.entries, second.snapshot.entries);
    }

    #[test]
    fn test_ignore_patterns() {
        let temp = create_test_tree();
        let config = ScanConfig::builder()
            .root(temp.path())
            .ignore_patterns(vec!["dir2".to_string()])
            .build()
            .unwrap();

        let outcome = Scanner::new().scan(&config).unwrap();
        assert!(
            !outcome
                .snapshot
                .iter()
                .any(|e| e.path().starts_with(temp.path().join("dir2")))
        );
        assert_eq!(outcome.stats.ignored, 1);
    }

    #[test]
    fn test_abort_policy_on_missing_root() {
        let temp = TempDir::new().unwrap();
        let config = ScanConfig::builder()
            .root(temp.path().join("missing"))
            .error_policy(ErrorPolicy::Abort)
            .build()
            .unwrap();

        let result = Scanner::new().scan(&config);
        assert!(matches!(result, Err(ScanError::NotFound { .. })));
    }
}
