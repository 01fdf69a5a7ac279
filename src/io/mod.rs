//! Byte-level access to a `.vol` container.
//!
//! [`ReadAt`] is the positional read primitive; it has no cursor of its own,
//! so any number of [`ByteSource`] cursors can share one reader.

mod local;
mod memory;
mod source;

pub use local::LocalFileReader;
pub use memory::MemoryReader;
pub use source::ByteSource;

use async_trait::async_trait;
use std::io;

/// Trait for random access reading from a data source
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer.
    ///
    /// May return fewer bytes than requested; `Ok(0)` means end of data.
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;
}
