//! treestate - record a directory tree and report what changed since.
//!
//! Usage:
//!   treestate scan <PATH> <STATE_FILE>        Write a snapshot of PATH
//!   treestate updates <BASELINE> <PATH>       List new or modified entries
//!   treestate --help                          Show help

mod cli;

use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Context, Result};

use treestate_core::{ScanConfig, ScanWarning, Snapshot};
use treestate_diff::BaselineIndex;
use treestate_scan::Scanner;
use treestate_store::{read_snapshot, write_snapshot};

use cli::{Cli, Command, LogLevel, OutputFormat};

/// Exit status for a malformed command line.
const EXIT_USAGE: u8 = 2;

/// Exit status when the scan finished but skipped entries.
const EXIT_PARTIAL: u8 = 3;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            // Usage goes to stdout with the usage exit status.
            print!("{}", err.render());
            return Ok(ExitCode::from(EXIT_USAGE));
        }
        Err(err) => err.exit(),
    };
    setup_tracing(cli.log_level);

    let warnings = match &cli.command {
        Command::Scan { path, state_file } => {
            let config = cli.scan.to_config(path).context("Invalid scan options")?;
            run_scan(&config, state_file)?
        }
        Command::Updates {
            baseline,
            path,
            format,
            save,
        } => {
            let config = cli.scan.to_config(path).context("Invalid scan options")?;
            run_updates(baseline, &config, *format, save.as_deref())?
        }
    };

    if warnings.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }

    eprintln!(
        "scan incomplete: {} entr{} skipped (first: {}: {})",
        warnings.len(),
        if warnings.len() == 1 { "y" } else { "ies" },
        warnings[0].path.display(),
        warnings[0].message
    );
    Ok(ExitCode::from(EXIT_PARTIAL))
}

fn setup_tracing(level: LogLevel) {
    let Some(level) = level.to_tracing_level() else {
        return;
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .without_time()
        .compact()
        .init();
}

/// Scan a tree and write its snapshot.
fn run_scan(config: &ScanConfig, state_file: &Path) -> Result<Vec<ScanWarning>> {
    let outcome = Scanner::new()
        .scan(config)
        .with_context(|| format!("Scan of {} failed", config.root.display()))?;

    write_snapshot(state_file, &outcome.snapshot)
        .with_context(|| format!("Failed to save snapshot {}", state_file.display()))?;

    Ok(outcome.warnings)
}

/// Rescan a tree and print every entry that is new or modified relative to
/// the baseline, as the walk reaches it.
fn run_updates(
    baseline: &Path,
    config: &ScanConfig,
    format: OutputFormat,
    save: Option<&Path>,
) -> Result<Vec<ScanWarning>> {
    let snapshot = read_snapshot(baseline)
        .with_context(|| format!("Failed to read baseline snapshot {}", baseline.display()))?;
    let index = BaselineIndex::new(&snapshot);

    let mut walker = Scanner::new()
        .walk(config)
        .with_context(|| format!("Scan of {} failed", config.root.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut changes = Vec::new();
    let mut scanned = Vec::new();

    for entry in walker.by_ref() {
        let entry = entry.with_context(|| format!("Scan of {} failed", config.root.display()))?;

        if let Some(change) = index.classify(&entry) {
            match format {
                OutputFormat::Text => writeln!(out, "{}", change.path.display())?,
                OutputFormat::Json => changes.push(change),
            }
        }
        if save.is_some() {
            scanned.push(entry);
        }
    }

    if let OutputFormat::Json = format {
        serde_json::to_writer_pretty(&mut out, &changes)?;
        writeln!(out)?;
    }
    out.flush()?;

    if let Some(state_file) = save {
        write_snapshot(state_file, &Snapshot::new(&config.root, scanned))
            .with_context(|| format!("Failed to save snapshot {}", state_file.display()))?;
    }

    let (_, warnings) = walker.into_parts();
    Ok(warnings)
}
