//! Error types for reading `.vol` containers.
//!
//! Three layers of failure exist:
//!
//! - [`SourceError`] comes from the byte source (short reads, bad seeks, I/O).
//! - [`DecodeStop`] ends entry enumeration early without failing the run.
//! - [`VolError`] is fatal for the whole pass.

use std::io;

use thiserror::Error;

/// Failure reported by a [`ByteSource`](crate::io::ByteSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// Fewer bytes remained in the stream than were requested.
    #[error("unexpected end of stream: wanted {wanted} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: u64,
        wanted: u64,
        available: u64,
    },

    /// The requested position lies past the end of the stream.
    #[error("cannot seek to offset {offset}, stream is {size} bytes long")]
    SeekFailed { offset: u64, size: u64 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Reason the entry decoder stopped producing entries.
///
/// `Truncated` and `NameTooLong` are graceful: everything decoded before
/// them is still used. `Io` wraps a genuine read failure and is escalated
/// by the table reader.
#[derive(Debug, Error)]
pub enum DecodeStop {
    #[error("entry record is truncated")]
    Truncated,

    #[error("entry name length {0} exceeds the 4096 byte limit")]
    NameTooLong(u16),

    #[error("read failed while decoding entry: {0}")]
    Io(#[source] io::Error),
}

impl DecodeStop {
    /// Whether enumeration may end cleanly on this stop.
    pub fn is_graceful(&self) -> bool {
        !matches!(self, DecodeStop::Io(_))
    }
}

impl From<SourceError> for DecodeStop {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Truncated { .. } | SourceError::SeekFailed { .. } => DecodeStop::Truncated,
            SourceError::Io(e) => DecodeStop::Io(e),
        }
    }
}

/// Fatal error for a whole read or extraction pass.
#[derive(Debug, Error)]
pub enum VolError {
    /// The container starts with the `PVOL` tag, a different format.
    #[error("this looks like a PVOL file, which is a different .vol format")]
    UnsupportedFormat,

    /// The entry count at the table offset could not be read.
    #[error("incorrect file format: cannot read entry table header")]
    BadHeader(#[source] SourceError),

    #[error(transparent)]
    Source(#[from] SourceError),

    /// An entry name would resolve outside the output directory.
    #[error("refusing unsafe entry path {0:?}")]
    UnsafePath(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type VolResult<T> = Result<T, VolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_truncation_becomes_graceful_stop() {
        let stop = DecodeStop::from(SourceError::Truncated {
            offset: 10,
            wanted: 26,
            available: 3,
        });
        assert!(matches!(stop, DecodeStop::Truncated));
        assert!(stop.is_graceful());
    }

    #[test]
    fn source_io_failure_is_not_graceful() {
        let stop = DecodeStop::from(SourceError::Io(io::Error::other("disk gone")));
        assert!(!stop.is_graceful());
    }
}
