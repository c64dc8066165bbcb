//! Save file constants and header layout

use binrw::binrw;

/// Magic bytes at the start of every save file
pub const MAGIC: &[u8; 4] = b"PLST";

/// Current format version
pub const FORMAT_VERSION: u16 = 1;

/// Upper bound on UTF-16 units in one text field
///
/// Anything larger is treated as corruption rather than allocated.
pub const MAX_TEXT_UNITS: u32 = 1 << 20;

/// File header: magic, version, record count (all big-endian)
#[binrw]
#[brw(big, magic = b"PLST")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub version: u16,
    pub record_count: u32,
}

impl FileHeader {
    pub fn new(record_count: u32) -> Self {
        Self {
            version: FORMAT_VERSION,
            record_count,
        }
    }

    /// Size of the header in bytes
    pub const SIZE: usize = 4 + 2 + 4;
}
