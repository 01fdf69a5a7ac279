use byteorder::{ByteOrder, LittleEndian};
use std::sync::Arc;

use super::ReadAt;
use crate::error::SourceError;

/// A cursor over a [`ReadAt`] reader.
///
/// All multi-byte reads are little-endian. The cursor only advances on a
/// successful read; a short read leaves it where it was.
pub struct ByteSource<R: ReadAt> {
    reader: Arc<R>,
    size: u64,
    pos: u64,
}

impl<R: ReadAt> ByteSource<R> {
    /// Create a cursor at offset 0.
    pub fn new(reader: Arc<R>) -> Self {
        let size = reader.size();
        Self {
            reader,
            size,
            pos: 0,
        }
    }

    /// An independent cursor over the same reader, positioned at 0.
    pub fn fork(&self) -> Self {
        Self::new(Arc::clone(&self.reader))
    }

    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Bytes between the cursor and the end of the stream.
    pub fn remaining(&self) -> u64 {
        self.size.saturating_sub(self.pos)
    }

    /// Move the cursor to an absolute offset.
    ///
    /// Seeking exactly to the end is allowed; seeking past it is not.
    pub fn seek(&mut self, offset: u64) -> Result<(), SourceError> {
        if offset > self.size {
            return Err(SourceError::SeekFailed {
                offset,
                size: self.size,
            });
        }
        self.pos = offset;
        Ok(())
    }

    /// Fill `buf` completely from the cursor, or fail with `Truncated`.
    pub async fn read_into(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        let wanted = buf.len() as u64;
        if wanted > self.remaining() {
            return Err(self.truncated(wanted));
        }

        let mut filled = 0;
        while filled < buf.len() {
            let n = self
                .reader
                .read_at(self.pos + filled as u64, &mut buf[filled..])
                .await?;
            if n == 0 {
                // The reader shrank underneath us
                return Err(SourceError::Truncated {
                    offset: self.pos,
                    wanted,
                    available: filled as u64,
                });
            }
            filled += n;
        }

        self.pos += wanted;
        Ok(())
    }

    /// Read exactly `n` bytes into a new buffer.
    ///
    /// `n` is checked against the remaining stream before anything is
    /// allocated.
    pub async fn read_exact(&mut self, n: u64) -> Result<Vec<u8>, SourceError> {
        if n > self.remaining() {
            return Err(self.truncated(n));
        }
        let len = usize::try_from(n).map_err(|_| self.truncated(n))?;
        let mut buf = vec![0u8; len];
        self.read_into(&mut buf).await?;
        Ok(buf)
    }

    pub async fn read_u16_le(&mut self) -> Result<u16, SourceError> {
        let mut buf = [0u8; 2];
        self.read_into(&mut buf).await?;
        Ok(LittleEndian::read_u16(&buf))
    }

    pub async fn read_u32_le(&mut self) -> Result<u32, SourceError> {
        let mut buf = [0u8; 4];
        self.read_into(&mut buf).await?;
        Ok(LittleEndian::read_u32(&buf))
    }

    fn truncated(&self, wanted: u64) -> SourceError {
        SourceError::Truncated {
            offset: self.pos,
            wanted,
            available: self.remaining(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryReader;

    fn source(bytes: &[u8]) -> ByteSource<MemoryReader> {
        ByteSource::new(Arc::new(MemoryReader::new(bytes.to_vec())))
    }

    #[tokio::test]
    async fn reads_little_endian_integers() {
        let mut src = source(&[0x78, 0x56, 0x34, 0x12, 0xCD, 0xAB]);
        assert_eq!(src.read_u32_le().await.unwrap(), 0x1234_5678);
        assert_eq!(src.read_u16_le().await.unwrap(), 0xABCD);
        assert_eq!(src.position(), 6);
        assert_eq!(src.remaining(), 0);
    }

    #[tokio::test]
    async fn short_read_leaves_cursor_in_place() {
        let mut src = source(&[1, 2, 3]);
        src.seek(1).unwrap();
        let err = src.read_exact(5).await.unwrap_err();
        match err {
            SourceError::Truncated {
                offset,
                wanted,
                available,
            } => {
                assert_eq!((offset, wanted, available), (1, 5, 2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(src.position(), 1);
        assert_eq!(src.read_exact(2).await.unwrap(), vec![2, 3]);
    }

    #[tokio::test]
    async fn seek_past_end_fails() {
        let mut src = source(&[0; 8]);
        assert!(src.seek(8).is_ok());
        assert!(matches!(
            src.seek(9),
            Err(SourceError::SeekFailed { offset: 9, size: 8 })
        ));
        assert_eq!(src.position(), 8);
    }

    #[tokio::test]
    async fn forked_cursor_is_independent() {
        let mut src = source(&[9, 8, 7, 6]);
        src.seek(2).unwrap();
        let mut other = src.fork();
        assert_eq!(other.read_exact(1).await.unwrap(), vec![9]);
        assert_eq!(src.position(), 2);
    }
}
