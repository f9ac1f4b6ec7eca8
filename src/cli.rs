//! Command-line surface.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use treestate_core::{ErrorPolicy, ScanConfig, ScanConfigBuilderError};

#[derive(Parser)]
#[command(
    name = "treestate",
    version,
    about = "Snapshot a directory tree and report what changed since",
    long_about = "treestate records every directory, link and file (with its modification \
                  time) below a path, and later lists the files and links that are new \
                  or modified compared to that record.",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Logging verbosity on stderr
    #[arg(short, long, global = true, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    #[command(flatten)]
    pub scan: ScanOptions,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scan a tree and write its snapshot
    Scan {
        /// Directory (or file) to scan
        path: PathBuf,

        /// Snapshot file to write
        state_file: PathBuf,
    },

    /// Print files and links that are new or modified since a snapshot
    Updates {
        /// Snapshot written by an earlier `scan`
        baseline: PathBuf,

        /// Tree to rescan and compare
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,

        /// Also write the fresh scan to this snapshot file
        #[arg(long, value_name = "STATE_FILE")]
        save: Option<PathBuf>,
    },
}

/// Options that shape the traversal.
#[derive(Args, Debug, Clone)]
pub struct ScanOptions {
    /// Abort on the first unreadable entry instead of skipping it
    #[arg(long, global = true)]
    pub strict: bool,

    /// Skip entries whose name matches this glob (repeatable)
    #[arg(long = "ignore", value_name = "GLOB", global = true)]
    pub ignore_patterns: Vec<String>,

    /// Skip hidden entries (names starting with '.')
    #[arg(long, global = true)]
    pub no_hidden: bool,

    /// Do not descend below this depth (the scanned path is depth 0)
    #[arg(long, value_name = "N", global = true)]
    pub max_depth: Option<u32>,
}

impl ScanOptions {
    /// Build the scan configuration for a root path.
    pub fn to_config(&self, root: &Path) -> Result<ScanConfig, ScanConfigBuilderError> {
        let error_policy = if self.strict {
            ErrorPolicy::Abort
        } else {
            ErrorPolicy::Skip
        };

        ScanConfig::builder()
            .root(root)
            .error_policy(error_policy)
            .ignore_patterns(self.ignore_patterns.clone())
            .include_hidden(!self.no_hidden)
            .max_depth(self.max_depth)
            .build()
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// One path per line
    #[default]
    Text,
    /// JSON array of changes
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan() {
        let cli = Cli::try_parse_from(["treestate", "scan", "src", "state.json"]).unwrap();
        match cli.command {
            Command::Scan { path, state_file } => {
                assert_eq!(path, PathBuf::from("src"));
                assert_eq!(state_file, PathBuf::from("state.json"));
            }
            Command::Updates { .. } => panic!("expected scan"),
        }
        assert!(!cli.scan.strict);
    }

    #[test]
    fn test_parse_updates_with_options() {
        let cli = Cli::try_parse_from([
            "treestate",
            "updates",
            "state.json",
            "src",
            "--strict",
            "--ignore",
            "*.log",
            "--ignore",
            "target",
            "--format",
            "json",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Command::Updates {
                format: OutputFormat::Json,
                ..
            }
        ));
        let config = cli.scan.to_config(Path::new("src")).unwrap();
        assert_eq!(config.error_policy, ErrorPolicy::Abort);
        assert_eq!(config.ignore_patterns, vec!["*.log", "target"]);
    }

    #[test]
    fn test_wrong_argument_count_rejected() {
        assert!(Cli::try_parse_from(["treestate", "scan", "src"]).is_err());
        assert!(Cli::try_parse_from(["treestate", "updates", "a", "b", "c"]).is_err());
        assert!(Cli::try_parse_from(["treestate", "bogus"]).is_err());
        assert!(Cli::try_parse_from(["treestate"]).is_err());
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(LogLevel::Warn.to_tracing_level(), Some(tracing::Level::WARN));
        assert!(LogLevel::Silent.to_tracing_level().is_none());
    }
}
