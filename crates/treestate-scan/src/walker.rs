//! Lazy pre-order tree walker.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use itertools::Itertools;
use tracing::{debug, warn};

use treestate_core::{Entry, ErrorPolicy, ScanConfig, ScanError, ScanWarning};

use crate::stats::ScanStats;

/// A path waiting to be visited.
struct Pending {
    path: PathBuf,
    depth: u32,
}

/// Iterator over the entries of a tree, root first, in pre-order.
///
/// Each directory is listed when it is visited; its children are sorted by
/// name and fully walked one after another. Symbolic links are never
/// followed.
///
/// Failures below the root follow the configured [`ErrorPolicy`]: with
/// `Skip` the entry is dropped and a [`ScanWarning`] recorded, with `Abort`
/// the error is yielded and the walker ends. Failures on the root are always
/// yielded.
pub struct TreeWalker {
    config: ScanConfig,
    ignore: GlobSet,
    stack: Vec<Pending>,
    stats: ScanStats,
    warnings: Vec<ScanWarning>,
    finished: bool,
}

impl TreeWalker {
    /// Create a walker for the configured root. Nothing is read until the
    /// first call to `next`.
    pub fn new(config: &ScanConfig) -> Result<Self, ScanError> {
        let ignore = config.ignore_set()?;
        Ok(Self {
            stack: vec![Pending {
                path: config.root.clone(),
                depth: 0,
            }],
            config: config.clone(),
            ignore,
            stats: ScanStats::new(),
            warnings: Vec::new(),
            finished: false,
        })
    }

    /// Statistics gathered so far.
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// Warnings for entries skipped so far.
    pub fn warnings(&self) -> &[ScanWarning] {
        &self.warnings
    }

    /// Consume the walker, returning its statistics and warnings.
    pub fn into_parts(self) -> (ScanStats, Vec<ScanWarning>) {
        (self.stats, self.warnings)
    }

    fn is_fatal(&self, depth: u32) -> bool {
        depth == 0 || self.config.error_policy == ErrorPolicy::Abort
    }

    fn skip(&mut self, error: &ScanError, listing: bool) {
        let warning = ScanWarning::from_error(error, listing);
        warn!(path = %warning.path.display(), "skipping entry: {}", warning.message);
        self.stats.record_skipped();
        self.warnings.push(warning);
    }

    /// Classify one path, queueing its children if it is a directory.
    fn visit(&mut self, path: PathBuf, depth: u32) -> Result<Entry, ScanError> {
        if path.to_str().is_none() {
            return Err(ScanError::InvalidPath { path });
        }

        let metadata = fs::symlink_metadata(&path).map_err(|e| ScanError::io(&path, e))?;
        let file_type = metadata.file_type();

        if file_type.is_symlink() {
            return Ok(Entry::link(path));
        }

        if file_type.is_dir() {
            match self.list_children(&path, depth) {
                Ok(children) => self.stack.extend(children.into_iter().rev()),
                Err(err) if self.is_fatal(depth) => return Err(err),
                Err(err) => self.skip(&err, true),
            }
            return Ok(Entry::directory(path));
        }

        let modified = metadata.modified().map_err(|e| ScanError::io(&path, e))?;
        Ok(Entry::file(path, modified))
    }

    /// List a directory's children in name order, after filtering.
    fn list_children(&mut self, dir: &Path, depth: u32) -> Result<Vec<Pending>, ScanError> {
        let child_depth = depth + 1;
        if self.config.exceeds_depth(child_depth) {
            return Ok(Vec::new());
        }

        let names = fs::read_dir(dir)
            .map_err(|e| ScanError::io(dir, e))?
            .map(|item| item.map(|e| e.file_name()))
            .collect::<Result<Vec<OsString>, _>>()
            .map_err(|e| ScanError::io(dir, e))?;

        let total = names.len();
        let children: Vec<Pending> = names
            .into_iter()
            .filter(|name| !self.is_filtered(name))
            .sorted()
            .map(|name| Pending {
                path: dir.join(name),
                depth: child_depth,
            })
            .collect();

        let ignored = total - children.len();
        for _ in 0..ignored {
            self.stats.record_ignored();
        }
        debug!(
            path = %dir.display(),
            children = children.len(),
            ignored,
            "listed directory"
        );

        Ok(children)
    }

    fn is_filtered(&self, name: &OsString) -> bool {
        self.config.should_skip_hidden(&name.to_string_lossy())
            || self.ignore.is_match(Path::new(name))
    }
}

impl Iterator for TreeWalker {
    type Item = Result<Entry, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let Some(Pending { path, depth }) = self.stack.pop() else {
                self.finished = true;
                break;
            };

            match self.visit(path, depth) {
                Ok(entry) => {
                    self.stats.record(entry.kind(), depth);
                    return Some(Ok(entry));
                }
                Err(err) if self.is_fatal(depth) => {
                    self.finished = true;
                    return Some(Err(err));
                }
                Err(err) => self.skip(&err, false),
            }
        }
        None
    }
}

impl std::iter::FusedIterator for TreeWalker {}
