//! Reading and writing snapshot documents.

use std::collections::HashSet;
use std::fs::{self, File, Permissions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info};

use treestate_core::{Entry, Snapshot};

use crate::error::StoreError;

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct DocumentRef<'a> {
    format: u32,
    root: &'a Path,
    created_at: &'a DateTime<Utc>,
    entries: &'a [Entry],
}

#[derive(Deserialize)]
struct Document {
    root: PathBuf,
    created_at: DateTime<Utc>,
    entries: Vec<Entry>,
}

/// Serialize a snapshot as an indented JSON document.
pub fn to_writer<W: Write>(writer: W, snapshot: &Snapshot) -> Result<(), StoreError> {
    let document = DocumentRef {
        format: FORMAT_VERSION,
        root: &snapshot.root,
        created_at: &snapshot.created_at,
        entries: &snapshot.entries,
    };

    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(b" "));
    document.serialize(&mut serializer).map_err(|e| {
        if e.is_io() {
            StoreError::Io { source: e.into() }
        } else {
            StoreError::Serialize { source: e }
        }
    })?;

    let mut writer = serializer.into_inner();
    writer
        .write_all(b"\n")
        .map_err(|source| StoreError::Io { source })
}

/// Deserialize and validate a snapshot document.
pub fn from_reader<R: Read>(reader: R) -> Result<Snapshot, StoreError> {
    let value: Value =
        serde_json::from_reader(reader).map_err(|source| StoreError::Parse { source })?;

    // Check the version before the records so a newer layout is reported as
    // such instead of as a parse failure.
    let found = value
        .get("format")
        .and_then(Value::as_u64)
        .ok_or_else(|| StoreError::Parse {
            source: serde_json::Error::missing_field("format"),
        })?;
    if found != u64::from(FORMAT_VERSION) {
        return Err(StoreError::UnsupportedFormat {
            found,
            expected: FORMAT_VERSION,
        });
    }

    let document: Document =
        serde_json::from_value(value).map_err(|source| StoreError::Parse { source })?;
    validate(&document.entries)?;

    Ok(Snapshot {
        root: document.root,
        created_at: document.created_at,
        entries: document.entries,
    })
}

fn validate(entries: &[Entry]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.path()) {
            return Err(StoreError::DuplicatePath {
                path: entry.path().to_path_buf(),
            });
        }
        if entry.mtime().is_some_and(|mtime| !mtime.is_valid()) {
            return Err(StoreError::InvalidModTime {
                path: entry.path().to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Create the temporary file a snapshot is written to.
///
/// A new snapshot gets the usual `0o666` minus umask. When the destination
/// already exists its permissions are returned so they can be copied onto
/// the replacement.
fn create_temp(dir: &Path, destination: &Path) -> io::Result<(NamedTempFile, Option<Permissions>)> {
    let existing = fs::metadata(destination).ok().map(|meta| meta.permissions());

    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(Permissions::from_mode(0o666));
    }

    Ok((builder.tempfile_in(dir)?, existing))
}

/// Write a snapshot to `destination`, replacing it atomically.
///
/// The document is written to a temporary file in the same directory and
/// renamed over the destination once fully flushed. On any failure the
/// temporary file is removed and the destination is left untouched. An
/// existing destination keeps its permissions.
pub fn write_snapshot(destination: impl AsRef<Path>, snapshot: &Snapshot) -> Result<(), StoreError> {
    let destination = destination.as_ref();
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let write_err = |source| StoreError::Write {
        path: destination.to_path_buf(),
        source,
    };

    let (mut temp, existing) = create_temp(dir, destination).map_err(write_err)?;
    debug!(temp = %temp.path().display(), "writing snapshot");

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        to_writer(&mut writer, snapshot).map_err(|e| match e {
            StoreError::Io { source } => write_err(source),
            other => other,
        })?;
        writer.flush().map_err(write_err)?;
    }
    if let Some(permissions) = existing {
        temp.as_file().set_permissions(permissions).map_err(write_err)?;
    }
    temp.as_file().sync_all().map_err(write_err)?;
    temp.persist(destination).map_err(|e| write_err(e.error))?;

    info!(
        path = %destination.display(),
        entries = snapshot.len(),
        "snapshot written"
    );
    Ok(())
}

/// Read a snapshot previously written by [`write_snapshot`].
pub fn read_snapshot(source: impl AsRef<Path>) -> Result<Snapshot, StoreError> {
    let source = source.as_ref();
    let file = File::open(source).map_err(|e| StoreError::Open {
        path: source.to_path_buf(),
        source: e,
    })?;

    let snapshot = from_reader(BufReader::new(file))?;
    debug!(
        path = %source.display(),
        entries = snapshot.len(),
        "snapshot read"
    );
    Ok(snapshot)
}
