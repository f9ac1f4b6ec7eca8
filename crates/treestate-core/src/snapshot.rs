//! Snapshot container.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// Ordered entries of a tree at one point in time.
///
/// Entries are kept in traversal order (root first, pre-order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Root path that was scanned.
    pub root: PathBuf,

    /// When the scan was taken.
    pub created_at: DateTime<Utc>,

    /// Entries in traversal order.
    pub entries: Vec<Entry>,
}

impl Snapshot {
    /// Create a snapshot taken now.
    pub fn new(root: impl Into<PathBuf>, entries: Vec<Entry>) -> Self {
        Self {
            root: root.into(),
            created_at: Utc::now(),
            entries,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the snapshot has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in traversal order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterate over entries in traversal order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Find the entry recorded for a path.
    pub fn find(&self, path: impl AsRef<Path>) -> Option<&Entry> {
        let path = path.as_ref();
        self.entries.iter().find(|e| e.path() == path)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ModTime;

    fn sample() -> Snapshot {
        Snapshot::new(
            "/a",
            vec![
                Entry::directory("/a"),
                Entry::link("/a/l"),
                Entry::file("/a/x.txt", ModTime::new(1, 0)),
                Entry::file("/a/y.txt", ModTime::new(2, 0)),
            ],
        )
    }

    #[test]
    fn test_snapshot_find() {
        let snapshot = sample();
        assert_eq!(
            snapshot.find("/a/y.txt").and_then(Entry::mtime),
            Some(ModTime::new(2, 0))
        );
        assert!(snapshot.find("/a/missing").is_none());
    }

    #[test]
    fn test_snapshot_iteration_order() {
        let snapshot = sample();
        let paths: Vec<_> = snapshot.iter().map(|e| e.path().to_path_buf()).collect();
        assert_eq!(paths[0], PathBuf::from("/a"));
        assert_eq!(paths[3], PathBuf::from("/a/y.txt"));
        assert_eq!(snapshot.len(), 4);
        assert!(!snapshot.is_empty());
    }
}
