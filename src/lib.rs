//! # runvol
//!
//! An extractor for the `.vol` archives of Sierra's Driver's Education '98
//! and '99.
//!
//! These containers are a flat entry table of files and directories with
//! no checksums or end markers. This library decodes the table defensively,
//! recreates the directory tree, and copies each file's bytes out. Damaged
//! tables are read up to the first bad entry rather than rejected outright.
//!
//! ## Features
//!
//! - Extract a `.vol` archive to a directory
//! - Dump every entry's raw fields as a text report
//! - Refuse PVOL archives, which share the extension but not the layout
//! - Refuse entry names that would escape the output directory
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use runvol::{FsDestination, LocalFileReader, VolExtractor};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let reader = Arc::new(LocalFileReader::new(Path::new("DATA.VOL"))?);
//!     let extractor = VolExtractor::new(reader);
//!
//!     // List all entries in the archive
//!     let table = extractor.list_entries().await?;
//!     for entry in &table.entries {
//!         println!("{}", entry.display_name());
//!     }
//!
//!     // Or write them out
//!     let summary = extractor.extract_all(&FsDestination::new("out")).await?;
//!     println!("{} files", summary.files);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod io;
pub mod vol;

pub use cli::Cli;
pub use error::{DecodeStop, SourceError, VolError, VolResult};
pub use io::{ByteSource, LocalFileReader, MemoryReader, ReadAt};
pub use vol::{Entry, EntryKind, FsDestination, VolExtractor};
