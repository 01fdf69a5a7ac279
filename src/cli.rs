use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

use crate::vol::RunMode;

#[derive(Parser, Debug)]
#[command(name = "runvol")]
#[command(version)]
#[command(about = "Extractor for Driver's Education '98/'99 .vol archives", long_about = None)]
#[command(after_help = "Examples:\n  \
  runvol DATA.VOL                extract everything into the current directory\n  \
  runvol DATA.VOL log.txt        describe every entry in log.txt, extract nothing\n  \
  runvol -l DATA.VOL             describe every entry on stdout\n  \
  runvol -d out -n DATA.VOL      extract into out/, keeping existing files")]
pub struct Cli {
    /// .vol archive path
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write an entry report here instead of extracting ("-" for stdout)
    #[arg(value_name = "LOG")]
    pub log: Option<PathBuf>,

    /// Report entries on stdout instead of extracting
    #[arg(short = 'l')]
    pub list: bool,

    /// Extract files into exdir
    #[arg(short = 'd', value_name = "DIR")]
    pub extract_dir: Option<PathBuf>,

    /// Never overwrite existing files
    #[arg(short = 'n')]
    pub never_overwrite: bool,

    /// Show each decoded entry
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn mode(&self) -> RunMode {
        if self.list || self.log.is_some() {
            RunMode::Report
        } else {
            RunMode::Extract
        }
    }

    /// Report file, or `None` for stdout.
    pub fn report_path(&self) -> Option<&PathBuf> {
        self.log.as_ref().filter(|p| p.as_os_str() != "-")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.extract_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.is_very_quiet() {
            LevelFilter::Error
        } else if self.is_quiet() {
            LevelFilter::Warn
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
