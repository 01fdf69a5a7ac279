use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{DecodeStop, VolError, VolResult};
use crate::io::{ByteSource, ReadAt};

use super::parser::{TableReader, VolTable, read_table};
use super::report::ReportWriter;
use super::structures::{Action, FileAction, RunMode, classify, enclosed_path};

/// Result of writing one file to a [`Destination`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The file already existed and overwriting is disabled.
    Skipped,
}

/// Where extracted directories and files end up.
///
/// Paths handed to a destination are relative and already checked by
/// [`enclosed_path`].
#[async_trait]
pub trait Destination: Send + Sync {
    /// Create a directory. Must succeed if it already exists.
    async fn create_directory(&self, path: &Path) -> io::Result<()>;

    /// Create `path` and write `data` to it.
    async fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<WriteOutcome>;
}

/// A directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FsDestination {
    root: PathBuf,
    overwrite: bool,
}

impl FsDestination {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            overwrite: true,
        }
    }

    /// Whether existing files are replaced. Defaults to `true`.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl Destination for FsDestination {
    async fn create_directory(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(self.root.join(path)).await
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<WriteOutcome> {
        let output_path = self.root.join(path);

        if !self.overwrite && fs::try_exists(&output_path).await? {
            return Ok(WriteOutcome::Skipped);
        }

        // Normally created by an earlier directory entry already
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(&output_path).await?;
        file.write_all(data).await?;
        file.flush().await?;

        Ok(WriteOutcome::Written)
    }
}

/// Copy one file's bytes out of the container.
///
/// The source cursor is restored before returning, whether or not the
/// extraction succeeded, so table enumeration can continue from it. The
/// data range is checked against the stream size before anything is
/// allocated.
pub async fn extract<R: ReadAt>(
    source: &mut ByteSource<R>,
    action: &FileAction,
    destination: &dyn Destination,
) -> VolResult<WriteOutcome> {
    let path = enclosed_path(&action.name)?;
    if path.as_os_str().is_empty() {
        // `.`, `a\..` and the like name the output root itself
        return Err(VolError::UnsafePath(action.name.clone()));
    }

    let resume_at = source.position();
    let data = read_range(source, action.offset, action.length).await;
    source.seek(resume_at)?;

    Ok(destination.write_file(&path, &data?).await?)
}

async fn read_range<R: ReadAt>(
    source: &mut ByteSource<R>,
    offset: u64,
    length: u32,
) -> VolResult<Vec<u8>> {
    source.seek(offset)?;
    Ok(source.read_exact(u64::from(length)).await?)
}

/// Totals for one pass over a container.
#[derive(Debug, Default)]
pub struct ExtractSummary {
    /// Entries the table declared.
    pub declared: u32,
    /// Entries actually decoded.
    pub decoded: u32,
    pub directories: usize,
    pub files: usize,
    pub bytes: u64,
    /// Files left alone because they already existed.
    pub skipped: usize,
    /// Entries that called for no action.
    pub ignored: usize,
    /// Why enumeration ended early, if it did.
    pub stop: Option<DecodeStop>,
}

/// High level API over a `.vol` container.
pub struct VolExtractor<R: ReadAt> {
    reader: Arc<R>,
}

impl<R: ReadAt> VolExtractor<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self { reader }
    }

    fn source(&self) -> ByteSource<R> {
        ByteSource::new(Arc::clone(&self.reader))
    }

    /// Decode the whole entry table without acting on it.
    pub async fn list_entries(&self) -> VolResult<VolTable> {
        read_table(self.source()).await
    }

    /// Create every directory and write every file into `destination`.
    ///
    /// Files are extracted as their entries are decoded, so directory entries
    /// earlier in the table have already been created by then.
    pub async fn extract_all(&self, destination: &dyn Destination) -> Result<ExtractSummary> {
        self.pass::<tokio::io::Sink>(RunMode::Extract, Some(destination), None)
            .await
    }

    /// Describe every entry to `report`; nothing is written to disk.
    pub async fn report<W: AsyncWrite + Unpin + Send>(
        &self,
        report: &mut ReportWriter<W>,
    ) -> Result<ExtractSummary> {
        self.pass(RunMode::Report, None, Some(report)).await
    }

    async fn pass<W: AsyncWrite + Unpin + Send>(
        &self,
        mode: RunMode,
        destination: Option<&dyn Destination>,
        mut report: Option<&mut ReportWriter<W>>,
    ) -> Result<ExtractSummary> {
        let mut table = TableReader::open(self.source()).await?;
        let header = table.header();

        if let Some(report) = report.as_deref_mut() {
            report.write_header(&header).await?;
        }

        let mut summary = ExtractSummary {
            declared: header.entry_count,
            ..Default::default()
        };

        while let Some(entry) = table.next_entry().await? {
            if let Some(report) = report.as_deref_mut() {
                report.write_entry(&entry).await?;
            }

            let action = classify(&entry, mode);
            let dest = match (&action, destination) {
                (Action::Ignore, _) | (_, None) => {
                    summary.ignored += 1;
                    continue;
                }
                (_, Some(dest)) => dest,
            };

            match action {
                Action::CreateDirectory { name } => {
                    let path = enclosed_path(&name)?;
                    if path.as_os_str().is_empty() {
                        summary.ignored += 1;
                        continue;
                    }
                    info!("    creating: {name}");
                    dest.create_directory(&path)
                        .await
                        .with_context(|| format!("failed to create directory {name}"))?;
                    summary.directories += 1;
                }
                Action::ExtractFile(file) => {
                    let outcome = extract(table.source_mut(), &file, dest)
                        .await
                        .with_context(|| format!("failed to extract {}", file.name))?;
                    match outcome {
                        WriteOutcome::Written => {
                            info!("  extracting: {}", file.name);
                            summary.files += 1;
                            summary.bytes += u64::from(file.length);
                        }
                        WriteOutcome::Skipped => {
                            warn!("Skipping: {} (file exists)", file.name);
                            summary.skipped += 1;
                        }
                    }
                }
                Action::Ignore => {}
            }
        }

        summary.decoded = table.decoded();
        if let Some(stop) = table.stop() {
            if let Some(report) = report.as_deref_mut() {
                report.write_stop(summary.decoded, header.entry_count, stop).await?;
            }
        }
        if let Some(report) = report {
            report.finish().await?;
        }
        summary.stop = table.into_stop();

        Ok(summary)
    }
}
