//! Human-readable dump of an entry table.
//!
//! ```text
//! offset:      0x00001A2C
//! count:       0x00000003
//!
//! kind:        0x00000080 (file)
//! flag:        0x00000001
//! length:      0x00000004
//! offset:      0x00000000
//! marker a:    0xFFFFFFFF
//! marker b:    0x00000002
//! name length: 0x0008
//! name:        "horn.wav"
//! ```

use std::io;
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::DecodeStop;

use super::structures::{Entry, TableHeader};

/// Format the table location lines.
pub fn format_header(header: &TableHeader) -> String {
    format!(
        "offset:      0x{:08X}\ncount:       0x{:08X}\n",
        header.table_offset, header.entry_count
    )
}

/// Format one entry as a labeled block, preceded by a blank line.
pub fn format_entry(entry: &Entry) -> String {
    format!(
        "\nkind:        0x{:08X} ({})\n\
         flag:        0x{:08X}\n\
         length:      0x{:08X}\n\
         offset:      0x{:08X}\n\
         marker a:    0x{:08X}\n\
         marker b:    0x{:08X}\n\
         name length: 0x{:04X}\n\
         name:        \"{}\"\n",
        entry.kind.as_u32(),
        entry.kind.label(),
        entry.flag,
        entry.data_length,
        entry.data_offset,
        entry.marker_a,
        entry.marker_b,
        entry.name_length(),
        entry.display_name()
    )
}

/// Writes report text to any async sink.
pub struct ReportWriter<W> {
    out: W,
}

impl<W: AsyncWrite + Unpin> ReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub async fn write_header(&mut self, header: &TableHeader) -> io::Result<()> {
        self.out.write_all(format_header(header).as_bytes()).await
    }

    pub async fn write_entry(&mut self, entry: &Entry) -> io::Result<()> {
        self.out.write_all(format_entry(entry).as_bytes()).await
    }

    /// Note that enumeration ended before the declared count.
    pub async fn write_stop(
        &mut self,
        decoded: u32,
        declared: u32,
        stop: &DecodeStop,
    ) -> io::Result<()> {
        let line = format!("\nstopped after {decoded} of {declared} entries: {stop}\n");
        self.out.write_all(line.as_bytes()).await
    }

    pub async fn finish(&mut self) -> io::Result<()> {
        self.out.flush().await
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Boxed sink used by the command line: a log file or stdout.
pub type ReportSink = Box<dyn AsyncWrite + Unpin + Send>;

/// Open the report destination; `None` means stdout.
pub async fn open_report_sink(path: Option<&Path>) -> io::Result<ReportWriter<ReportSink>> {
    let sink: ReportSink = match path {
        Some(path) => Box::new(tokio::fs::File::create(path).await?),
        None => Box::new(tokio::io::stdout()),
    };
    Ok(ReportWriter::new(sink))
}
