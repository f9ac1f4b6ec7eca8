//! Baseline lookup and change classification.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, trace};

use treestate_core::{Entry, EntryKind, ModTime, Snapshot};

/// Why a path is reported.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChangeKind {
    /// The path is not in the baseline.
    New,
    /// The file's modification time differs from the baseline.
    Modified,
}

/// A reported path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Path of the current entry.
    pub path: PathBuf,
    /// New or modified.
    pub change: ChangeKind,
    /// Kind of the current entry.
    pub kind: EntryKind,
}

/// What the baseline recorded for a path.
#[derive(Debug, Clone, Copy)]
enum Recorded {
    /// A directory or link; carries nothing to compare.
    Present,
    /// A file with its modification time.
    File(ModTime),
}

/// Baseline entries keyed by path.
#[derive(Debug, Default)]
pub struct BaselineIndex<'a> {
    recorded: HashMap<&'a Path, Recorded>,
}

impl<'a> BaselineIndex<'a> {
    /// Index a baseline snapshot.
    pub fn new(baseline: &'a Snapshot) -> Self {
        Self::from_entries(baseline)
    }

    /// Index any sequence of baseline entries.
    pub fn from_entries(entries: impl IntoIterator<Item = &'a Entry>) -> Self {
        let recorded = entries
            .into_iter()
            .map(|entry| {
                let value = match entry.mtime() {
                    Some(mtime) => Recorded::File(mtime),
                    None => Recorded::Present,
                };
                (entry.path(), value)
            })
            .collect();
        Self { recorded }
    }

    /// Number of indexed paths.
    pub fn len(&self) -> usize {
        self.recorded.len()
    }

    /// Check if the baseline is empty.
    pub fn is_empty(&self) -> bool {
        self.recorded.is_empty()
    }

    /// Decide whether one current entry is reported.
    ///
    /// Only the current kind is considered: a path that used to be a
    /// directory and is now a file counts as modified, while a former file
    /// that is now a directory or link is not reported.
    pub fn classify(&self, entry: &Entry) -> Option<Change> {
        let change = match (self.recorded.get(entry.path()), entry) {
            (None, Entry::Directory { .. }) => None,
            (None, _) => Some(ChangeKind::New),
            (Some(Recorded::File(before)), Entry::File { mtime, .. }) if before == mtime => None,
            (Some(_), Entry::File { .. }) => Some(ChangeKind::Modified),
            (Some(_), _) => None,
        }?;

        debug!(path = %entry.path().display(), %change, kind = %entry.kind(), "changed");
        Some(Change {
            path: entry.path().to_path_buf(),
            change,
            kind: entry.kind(),
        })
    }

    /// Classify every current entry, keeping traversal order.
    pub fn changes<'b>(&self, current: impl IntoIterator<Item = &'b Entry>) -> Vec<Change> {
        let changes: Vec<Change> = current
            .into_iter()
            .filter_map(|entry| self.classify(entry))
            .collect();
        trace!(baseline = self.len(), changes = changes.len(), "compared");
        changes
    }
}

/// Report new and modified entries of `current` relative to `baseline`.
pub fn diff(baseline: &Snapshot, current: &[Entry]) -> Vec<Change> {
    BaselineIndex::new(baseline).changes(current)
}
