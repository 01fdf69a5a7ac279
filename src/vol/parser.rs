//! Entry table parser.
//!
//! ## Container layout
//!
//! ```text
//! offset 0:        u32 table_offset
//! at table_offset: u32 entry_count
//!                  Entry[entry_count], packed
//! Entry:           u32 kind, u32 flag, u32 data_length, u32 data_offset,
//!                  u32 marker_a, u32 marker_b, u16 name_length,
//!                  u8 name[name_length]
//! ```
//!
//! The table has no checksum and no end marker. A record that runs off the
//! end of the stream, or claims an absurd name length, ends enumeration;
//! everything decoded before it is kept. A second listing of the names
//! follows the table and is not read.

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, warn};
use std::io::Cursor;

use crate::error::{DecodeStop, SourceError, VolError, VolResult};
use crate::io::{ByteSource, ReadAt};

use super::structures::*;

/// Decode one entry at the source's cursor.
///
/// Only advances the cursor sequentially. On a stop the cursor position is
/// unspecified and the source should not be decoded from again.
pub async fn decode_entry<R: ReadAt>(source: &mut ByteSource<R>) -> Result<Entry, DecodeStop> {
    let mut prefix = [0u8; ENTRY_PREFIX_SIZE];
    source.read_into(&mut prefix).await?;

    let mut cursor = Cursor::new(&prefix[..]);
    let kind = cursor.read_u32::<LittleEndian>().map_err(DecodeStop::Io)?;
    let flag = cursor.read_u32::<LittleEndian>().map_err(DecodeStop::Io)?;
    let data_length = cursor.read_u32::<LittleEndian>().map_err(DecodeStop::Io)?;
    let data_offset = cursor.read_u32::<LittleEndian>().map_err(DecodeStop::Io)?;
    let marker_a = cursor.read_u32::<LittleEndian>().map_err(DecodeStop::Io)?;
    let marker_b = cursor.read_u32::<LittleEndian>().map_err(DecodeStop::Io)?;
    let name_length = cursor.read_u16::<LittleEndian>().map_err(DecodeStop::Io)?;

    if name_length > MAX_NAME_LENGTH {
        return Err(DecodeStop::NameTooLong(name_length));
    }

    // read_exact checks the remaining stream before allocating
    let name = source.read_exact(u64::from(name_length)).await?;

    Ok(Entry {
        kind: EntryKind::from_u32(kind),
        flag,
        data_length,
        data_offset,
        marker_a,
        marker_b,
        name,
    })
}

/// Read the table location and entry count, leaving the cursor on the
/// first entry.
///
/// The PVOL check happens before any read past the first four bytes.
pub async fn read_header<R: ReadAt>(source: &mut ByteSource<R>) -> VolResult<TableHeader> {
    source.seek(0)?;
    let table_offset = source.read_u32_le().await.map_err(VolError::BadHeader)?;

    if table_offset == PVOL_TAG {
        return Err(VolError::UnsupportedFormat);
    }

    source
        .seek(u64::from(table_offset))
        .map_err(VolError::BadHeader)?;
    let entry_count = match source.read_u32_le().await {
        Ok(count) => count,
        Err(SourceError::Io(e)) => return Err(VolError::Io(e)),
        Err(e) => return Err(VolError::BadHeader(e)),
    };

    debug!("table at 0x{table_offset:08X} declares {entry_count} entries");

    Ok(TableHeader {
        table_offset,
        entry_count,
    })
}

/// Streams entries from the table one at a time.
///
/// The reader owns the enumeration cursor. Callers that need to read other
/// parts of the container between entries (see
/// [`extract`](super::extract)) borrow it via [`source_mut`](Self::source_mut)
/// and must put the cursor back where they found it.
pub struct TableReader<R: ReadAt> {
    source: ByteSource<R>,
    header: TableHeader,
    decoded: u32,
    stop: Option<DecodeStop>,
}

impl<R: ReadAt> TableReader<R> {
    /// Read the header and position on the first entry.
    pub async fn open(mut source: ByteSource<R>) -> VolResult<Self> {
        let header = read_header(&mut source).await?;
        Ok(Self {
            source,
            header,
            decoded: 0,
            stop: None,
        })
    }

    pub fn header(&self) -> TableHeader {
        self.header
    }

    /// Entries successfully decoded so far.
    pub fn decoded(&self) -> u32 {
        self.decoded
    }

    /// Why enumeration ended early, if it did.
    pub fn stop(&self) -> Option<&DecodeStop> {
        self.stop.as_ref()
    }

    /// Consume the reader, keeping only the stop reason.
    pub fn into_stop(self) -> Option<DecodeStop> {
        self.stop
    }

    pub fn source_mut(&mut self) -> &mut ByteSource<R> {
        &mut self.source
    }

    /// Upper bound for pre-allocating entry storage.
    ///
    /// Every entry takes at least [`ENTRY_PREFIX_SIZE`] bytes, so a corrupt
    /// count cannot demand more slots than the stream could hold.
    pub fn capacity_hint(&self) -> usize {
        let pending = u64::from(self.header.entry_count - self.decoded);
        let fits = self.source.remaining() / ENTRY_PREFIX_SIZE as u64;
        usize::try_from(pending.min(fits)).unwrap_or(0)
    }

    /// Decode the next entry.
    ///
    /// Returns `Ok(None)` once all declared entries were read or a graceful
    /// decode stop occurred. Read failures that are not truncation are
    /// returned as errors.
    pub async fn next_entry(&mut self) -> VolResult<Option<Entry>> {
        if self.stop.is_some() || self.decoded >= self.header.entry_count {
            return Ok(None);
        }

        match decode_entry(&mut self.source).await {
            Ok(entry) => {
                self.decoded += 1;
                debug!(
                    "entry {}: {} {:?} ({} bytes at 0x{:08X})",
                    self.decoded,
                    entry.kind.label(),
                    entry.display_name(),
                    entry.data_length,
                    entry.data_offset
                );
                Ok(Some(entry))
            }
            Err(DecodeStop::Io(e)) => Err(VolError::Io(e)),
            Err(stop) => {
                warn!(
                    "stopping after {} of {} entries: {stop}",
                    self.decoded, self.header.entry_count
                );
                self.stop = Some(stop);
                Ok(None)
            }
        }
    }
}

/// Entries of a container, decoded in table order.
#[derive(Debug)]
pub struct VolTable {
    pub header: TableHeader,
    pub entries: Vec<Entry>,
    /// Set when enumeration ended before `entry_count` entries.
    pub stop: Option<DecodeStop>,
}

/// Read the whole entry table.
///
/// A truncated or malformed entry ends the table early but is not an
/// error: the entries before it are returned and `stop` says why.
pub async fn read_table<R: ReadAt>(source: ByteSource<R>) -> VolResult<VolTable> {
    let mut reader = TableReader::open(source).await?;
    let mut entries = Vec::with_capacity(reader.capacity_hint());

    while let Some(entry) = reader.next_entry().await? {
        entries.push(entry);
    }

    Ok(VolTable {
        header: reader.header,
        entries,
        stop: reader.stop,
    })
}
