//! Error types for scanning operations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during scanning.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found, or vanished between listing and stat.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Path cannot be recorded in a snapshot (not valid UTF-8).
    #[error("Path is not valid UTF-8: {path}")]
    InvalidPath { path: PathBuf },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// The path the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PermissionDenied { path }
            | Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::InvalidPath { path } => Some(path),
            Self::InvalidConfig { .. } => None,
        }
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// Entry disappeared between listing and stat.
    Vanished,
    /// Error reading a directory listing.
    ReadError,
    /// Error reading metadata.
    MetadataError,
    /// Path is not valid UTF-8.
    InvalidPath,
}

/// Non-fatal warning for an entry skipped during a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a warning from a skipped scan error.
    ///
    /// `listing` marks errors raised while reading a directory's children
    /// rather than while stating a single entry. Any listing failure is a
    /// [`WarningKind::ReadError`].
    pub fn from_error(error: &ScanError, listing: bool) -> Self {
        let path = error.path().map(Path::to_path_buf).unwrap_or_default();
        let kind = match error {
            ScanError::InvalidPath { .. } => WarningKind::InvalidPath,
            _ if listing => WarningKind::ReadError,
            ScanError::PermissionDenied { .. } => WarningKind::PermissionDenied,
            ScanError::NotFound { .. } => WarningKind::Vanished,
            _ => WarningKind::MetadataError,
        };
        Self {
            message: error.to_string(),
            path,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_io() {
        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ScanError::PermissionDenied { .. }));
        assert_eq!(err.path(), Some(Path::new("/test/path")));
    }

    #[test]
    fn test_scan_error_io_other() {
        let err = ScanError::io("/x", std::io::Error::other("boom"));
        assert!(matches!(err, ScanError::Io { .. }));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_warning_from_error() {
        let vanished = ScanError::io(
            "/gone",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let warning = ScanWarning::from_error(&vanished, false);
        assert_eq!(warning.kind, WarningKind::Vanished);
        assert_eq!(warning.path, PathBuf::from("/gone"));

        let unreadable = ScanError::io("/dir", std::io::Error::other("eio"));
        assert_eq!(
            ScanWarning::from_error(&unreadable, true).kind,
            WarningKind::ReadError
        );
        assert_eq!(
            ScanWarning::from_error(&unreadable, false).kind,
            WarningKind::MetadataError
        );

        let denied = ScanError::io(
            "/locked",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            ScanWarning::from_error(&denied, true).kind,
            WarningKind::ReadError
        );
        assert_eq!(
            ScanWarning::from_error(&denied, false).kind,
            WarningKind::PermissionDenied
        );
    }
}
