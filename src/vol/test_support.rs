//! Builds synthetic containers for tests.

/// Assembles a container: file data first, then the entry table.
///
/// `data_offset` values are written relative to byte 4, the way the
/// format stores them.
#[derive(Default)]
pub(crate) struct VolBuilder {
    data: Vec<u8>,
    records: Vec<u8>,
    count: u32,
}

impl VolBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn dir(self, name: &str) -> Self {
        self.raw_entry(0x10, 0, 0, 0, 0, u32::MAX, name.as_bytes())
    }

    pub(crate) fn file(mut self, name: &str, contents: &[u8]) -> Self {
        let data_offset = self.data.len() as u32;
        self.data.extend_from_slice(contents);
        let length = contents.len() as u32;
        self.raw_entry(0x80, 1, length, data_offset, u32::MAX, 0, name.as_bytes())
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn raw_entry(
        self,
        kind: u32,
        flag: u32,
        length: u32,
        offset: u32,
        marker_a: u32,
        marker_b: u32,
        name: &[u8],
    ) -> Self {
        let name_length = name.len() as u16;
        self.raw_entry_with_length(kind, flag, length, offset, marker_a, marker_b, name_length, name)
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn raw_entry_with_length(
        mut self,
        kind: u32,
        flag: u32,
        length: u32,
        offset: u32,
        marker_a: u32,
        marker_b: u32,
        name_length: u16,
        name: &[u8],
    ) -> Self {
        for field in [kind, flag, length, offset, marker_a, marker_b] {
            self.records.extend_from_slice(&field.to_le_bytes());
        }
        self.records.extend_from_slice(&name_length.to_le_bytes());
        self.records.extend_from_slice(name);
        self.count += 1;
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let table_offset = (4 + self.data.len()) as u32;
        let mut out = table_offset.to_le_bytes().to_vec();
        out.extend_from_slice(&self.data);
        out.extend_from_slice(&self.count.to_le_bytes());
        out.extend_from_slice(&self.records);
        out
    }
}
