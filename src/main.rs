//! Main entry point for the runvol CLI application.
//!
//! Extracts a `.vol` archive into a directory, or writes a report of its
//! entries when a log destination is given.

use anyhow::{Context, Result};
use clap::Parser;
use log::{Level, LevelFilter, Log, Metadata, Record, info};
use std::sync::Arc;

use runvol::vol::{ExtractSummary, FsDestination, RunMode, open_report_sink};
use runvol::{Cli, LocalFileReader, VolExtractor};

/// Writes log records to stderr, keeping stdout free for reports.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            Level::Info => eprintln!("{}", record.args()),
            level => eprintln!("{}: {}", level.as_str().to_lowercase(), record.args()),
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(level: LevelFilter) {
    // Only fails if a logger is already installed
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Application entry point.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let reader = LocalFileReader::new(&cli.file)
        .with_context(|| format!("file can't be opened: {}", cli.file.display()))?;
    let extractor = VolExtractor::new(Arc::new(reader));

    match cli.mode() {
        RunMode::Report => {
            let report_path = cli.report_path();
            let mut report = open_report_sink(report_path.map(|p| p.as_path()))
                .await
                .with_context(|| match report_path {
                    Some(path) => format!("log can't be opened for writing: {}", path.display()),
                    None => "stdout can't be opened for writing".to_string(),
                })?;
            extractor.report(&mut report).await?;
        }
        RunMode::Extract => {
            let destination = FsDestination::new(cli.output_dir()).overwrite(!cli.never_overwrite);
            let summary = extractor.extract_all(&destination).await?;
            log_summary(&summary);
        }
    }

    Ok(())
}

fn log_summary(summary: &ExtractSummary) {
    info!(
        "{} directories, {} files ({})",
        summary.directories,
        summary.files,
        format_size(summary.bytes)
    );
    if summary.skipped > 0 {
        info!("{} existing files kept", summary.skipped);
    }
}

/// Format a byte size into a human-readable string.
///
/// ```ignore
/// assert_eq!(format_size(500), "500 bytes");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
