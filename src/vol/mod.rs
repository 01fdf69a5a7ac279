//! `.vol` archive parsing and extraction.
//!
//! The `.vol` containers of Driver's Education '98 and '99 hold a directory
//! tree as a flat table of file and directory entries. This is unrelated to
//! the PVOL format that shares the extension; those files are refused.
//!
//! ## Architecture
//!
//! - [`structures`]: entries, the header, and the entry-to-action mapping
//! - [`parser`]: decoding the entry table from a [`ByteSource`](crate::io::ByteSource)
//! - [`extractor`]: writing files and directories, one interleaved pass
//! - [`report`]: the text dump used instead of extraction
//!
//! ## Limitations
//!
//! - Read only
//! - The name listing after the entry table is not read

pub mod cp1252;
pub mod extractor;
pub mod parser;
pub mod report;
pub mod structures;

#[cfg(test)]
mod test_support;

pub use extractor::{Destination, ExtractSummary, FsDestination, VolExtractor, WriteOutcome, extract};
pub use parser::{TableReader, VolTable, decode_entry, read_header, read_table};
pub use report::{ReportWriter, open_report_sink};
pub use structures::*;
