//! Tree entry types.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// File modification time at filesystem-native precision.
///
/// Stored as whole seconds relative to the Unix epoch plus a non-negative
/// nanosecond fraction, so times before the epoch round-trip too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModTime {
    /// Seconds since the Unix epoch (negative before it).
    pub secs: i64,
    /// Nanoseconds past `secs`, always below one second.
    pub nanos: u32,
}

impl ModTime {
    /// Create a modification time from its raw parts.
    pub fn new(secs: i64, nanos: u32) -> Self {
        Self { secs, nanos }
    }

    /// Whether the nanosecond fraction is in range.
    pub fn is_valid(&self) -> bool {
        self.nanos < NANOS_PER_SEC
    }

    /// Convert back to a `SystemTime`, if representable on this platform.
    pub fn to_system_time(self) -> Option<SystemTime> {
        let base = if self.secs >= 0 {
            UNIX_EPOCH.checked_add(Duration::from_secs(self.secs.unsigned_abs()))?
        } else {
            UNIX_EPOCH.checked_sub(Duration::from_secs(self.secs.unsigned_abs()))?
        };
        base.checked_add(Duration::from_nanos(u64::from(self.nanos)))
    }

    /// Convert to a UTC datetime for display.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.secs, self.nanos)
    }
}

impl From<SystemTime> for ModTime {
    fn from(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Self {
                secs: i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
                nanos: after.subsec_nanos(),
            },
            Err(err) => {
                let before = err.duration();
                let mut secs = -i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
                let mut nanos = before.subsec_nanos();
                // Borrow a second so the fraction counts forward from `secs`.
                if nanos > 0 {
                    secs -= 1;
                    nanos = NANOS_PER_SEC - nanos;
                }
                Self { secs, nanos }
            }
        }
    }
}

impl fmt::Display for ModTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true)),
            None => write!(f, "{}.{:09}", self.secs, self.nanos),
        }
    }
}

/// Kind discriminant of an [`Entry`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntryKind {
    /// Directory (not a symbolic link).
    Directory,
    /// Symbolic link, never dereferenced.
    Link,
    /// Anything else: regular files, sockets, FIFOs, devices.
    File,
}

/// One typed record of a tree snapshot.
///
/// The path is the full traversal path from the scan root and is the
/// identity key used for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entry {
    /// A directory.
    Directory { path: PathBuf },
    /// A symbolic link; its target is not recorded.
    Link { path: PathBuf },
    /// A file with its modification time.
    File { path: PathBuf, mtime: ModTime },
}

impl Entry {
    /// Create a directory entry.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::Directory { path: path.into() }
    }

    /// Create a link entry.
    pub fn link(path: impl Into<PathBuf>) -> Self {
        Self::Link { path: path.into() }
    }

    /// Create a file entry.
    pub fn file(path: impl Into<PathBuf>, mtime: impl Into<ModTime>) -> Self {
        Self::File {
            path: path.into(),
            mtime: mtime.into(),
        }
    }

    /// The entry's path.
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory { path } | Self::Link { path } | Self::File { path, .. } => path,
        }
    }

    /// The entry's kind.
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Directory { .. } => EntryKind::Directory,
            Self::Link { .. } => EntryKind::Link,
            Self::File { .. } => EntryKind::File,
        }
    }

    /// Modification time, only present for files.
    pub fn mtime(&self) -> Option<ModTime> {
        match self {
            Self::File { mtime, .. } => Some(*mtime),
            _ => None,
        }
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    /// Check if this is a symbolic link.
    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link { .. })
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }
}
