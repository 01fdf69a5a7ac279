use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use crate::error::{VolError, VolResult};

use super::cp1252;

/// First four bytes of a PVOL container, read as a little-endian `u32`.
pub const PVOL_TAG: u32 = 0x4C4F_5650;

/// Size of the fixed part of an entry record.
pub const ENTRY_PREFIX_SIZE: usize = 26;

/// Longest entry name accepted before the table is treated as corrupt.
pub const MAX_NAME_LENGTH: u16 = 4096;

/// Distance between an entry's `data_offset` and the absolute file position.
pub const DATA_OFFSET_BIAS: u64 = 4;

/// Entry type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Unknown(u32),
}

impl EntryKind {
    pub const FILE_TAG: u32 = 0x80;
    pub const DIR_TAG: u32 = 0x10;

    pub fn from_u32(value: u32) -> Self {
        match value {
            Self::FILE_TAG => EntryKind::File,
            Self::DIR_TAG => EntryKind::Directory,
            _ => EntryKind::Unknown(value),
        }
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            EntryKind::File => Self::FILE_TAG,
            EntryKind::Directory => Self::DIR_TAG,
            EntryKind::Unknown(v) => *v,
        }
    }

    /// Short label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "dir",
            EntryKind::Unknown(_) => "???",
        }
    }
}

/// Location of the entry table, read from the container's first bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableHeader {
    pub table_offset: u32,
    pub entry_count: u32,
}

/// One decoded record of the entry table.
///
/// `flag`, `marker_a` and `marker_b` carry no meaning for extraction and
/// are kept for reports. Files usually have `flag == 1` and directories
/// `flag == 0`; the markers hold item counts or `0xFFFFFFFF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub flag: u32,
    pub data_length: u32,
    pub data_offset: u32,
    pub marker_a: u32,
    pub marker_b: u32,
    /// Raw name bytes, exactly as stored. Not NUL terminated.
    pub name: Vec<u8>,
}

impl Entry {
    pub fn name_length(&self) -> u16 {
        // decode_entry never produces names longer than MAX_NAME_LENGTH
        u16::try_from(self.name.len()).unwrap_or(u16::MAX)
    }

    /// The name decoded from Windows-1252, the encoding the games used.
    pub fn display_name(&self) -> Cow<'_, str> {
        cp1252::decode(&self.name)
    }

    /// The container's own root entry, named `.`.
    pub fn is_self_reference(&self) -> bool {
        self.name.as_slice() == b"."
    }

    /// Absolute position of the file contents in the container.
    pub fn data_start(&self) -> u64 {
        u64::from(self.data_offset) + DATA_OFFSET_BIAS
    }
}

/// How a pass treats the entries it decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Create directories and write files.
    #[default]
    Extract,
    /// Only describe entries; touch nothing on disk.
    Report,
}

/// A file entry resolved to a byte range of the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAction {
    pub name: String,
    pub offset: u64,
    pub length: u32,
}

/// What to do with one decoded entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateDirectory { name: String },
    ExtractFile(FileAction),
    Ignore,
}

/// Map an entry to the action it calls for.
///
/// Depends only on the entry and the mode. The `.` self reference never
/// produces a directory action, wherever it appears in the table.
pub fn classify(entry: &Entry, mode: RunMode) -> Action {
    if mode == RunMode::Report {
        return Action::Ignore;
    }

    match entry.kind {
        EntryKind::Directory if entry.is_self_reference() => Action::Ignore,
        EntryKind::Directory => Action::CreateDirectory {
            name: entry.display_name().into_owned(),
        },
        EntryKind::File => Action::ExtractFile(FileAction {
            name: entry.display_name().into_owned(),
            offset: entry.data_start(),
            length: entry.data_length,
        }),
        EntryKind::Unknown(_) => Action::Ignore,
    }
}

/// Turn an archived name into a path relative to the output directory.
///
/// Archived names use `\` separators (and occasionally `/`). Names that are
/// absolute, carry a drive prefix, contain NUL, or climb above the output
/// root are refused.
pub fn enclosed_path(name: &str) -> VolResult<PathBuf> {
    let unsafe_path = || VolError::UnsafePath(name.to_string());

    if name.contains('\0') || name.starts_with(['\\', '/']) {
        return Err(unsafe_path());
    }

    let mut out = PathBuf::new();
    let mut depth = 0usize;
    for part in name.split(['\\', '/']) {
        match part {
            "" | "." => {}
            ".." => {
                depth = depth.checked_sub(1).ok_or_else(unsafe_path)?;
                out.pop();
            }
            _ => {
                // `C:` or anything the host would read as a root
                let mut components = Path::new(part).components();
                match (components.next(), components.next()) {
                    (Some(Component::Normal(_)), None) => {}
                    _ => return Err(unsafe_path()),
                }
                if part.contains(':') {
                    return Err(unsafe_path());
                }
                out.push(part);
                depth += 1;
            }
        }
    }
    Ok(out)
}
