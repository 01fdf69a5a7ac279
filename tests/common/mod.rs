#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Assembles a `.vol` container: file data first, then the entry table.
#[derive(Default)]
pub struct VolBuilder {
    data: Vec<u8>,
    records: Vec<u8>,
    count: u32,
}

impl VolBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(self, name: &str) -> Self {
        self.entry(0x10, 0, 0, 0, name.as_bytes())
    }

    pub fn file(self, name: &str, contents: &[u8]) -> Self {
        self.file_raw(name.as_bytes(), contents)
    }

    /// A file whose stored name is not plain ASCII.
    pub fn file_raw(mut self, name: &[u8], contents: &[u8]) -> Self {
        let offset = self.data.len() as u32;
        self.data.extend_from_slice(contents);
        self.entry(0x80, 1, contents.len() as u32, offset, name)
    }

    pub fn entry(mut self, kind: u32, flag: u32, length: u32, offset: u32, name: &[u8]) -> Self {
        for field in [kind, flag, length, offset, u32::MAX, self.count] {
            self.records.extend_from_slice(&field.to_le_bytes());
        }
        self.records
            .extend_from_slice(&(name.len() as u16).to_le_bytes());
        self.records.extend_from_slice(name);
        self.count += 1;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let table_offset = (4 + self.data.len()) as u32;
        let mut out = table_offset.to_le_bytes().to_vec();
        out.extend_from_slice(&self.data);
        out.extend_from_slice(&self.count.to_le_bytes());
        out.extend_from_slice(&self.records);
        out
    }

    pub fn write_to(self, path: &Path) -> PathBuf {
        std::fs::write(path, self.build()).expect("write container");
        path.to_path_buf()
    }
}

/// The layout of a small game archive.
pub fn sample() -> VolBuilder {
    VolBuilder::new()
        .dir(".")
        .dir("art")
        .file("art\\title.bmp", b"BM\x00\x01title")
        .dir("art\\signs")
        .file("art\\signs\\stop.bmp", b"BM\x00\x02stop")
        .file("intro.txt", b"Buckle up.\r\n")
}
