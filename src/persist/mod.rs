//! Save file persistence
//!
//! A save file is a small header (magic, version, record count) followed by
//! one record per entry. Every integer is big-endian and text is
//! length-prefixed UTF-16, so files move between platforms unchanged.

mod codec;
mod strings;
mod types;

pub use codec::{decode, encode, read_entries, write_entries, ReadOutcome, WireEntry};
pub use strings::{decode_text, encode_text, WireText};
pub use types::{FileHeader, FORMAT_VERSION, MAGIC, MAX_TEXT_UNITS};

use crate::error::{PlaylistError, Result};
use crate::model::PlaylistEntry;
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::Path;

/// Read a save file
///
/// Returns `Ok(None)` when the file does not exist. The file is opened and
/// closed within this call.
pub fn read_file(path: &Path) -> Result<Option<ReadOutcome>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(PlaylistError::io(path, e)),
    };

    let mut reader = BufReader::new(file);
    read_entries(&mut reader).map(Some)
}

/// Write entries to a save file, replacing any previous content
pub fn write_file(path: &Path, entries: &[PlaylistEntry]) -> Result<()> {
    let bytes = encode(entries)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| PlaylistError::io(parent, e))?;
        }
    }

    fs::write(path, bytes).map_err(|e| PlaylistError::io(path, e))
}

/// Remove a save file if it exists and is a regular file
///
/// Returns whether a file was removed.
pub fn delete_file(path: &Path) -> Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }

    fs::remove_file(path).map_err(|e| PlaylistError::io(path, e))?;
    Ok(true)
}
