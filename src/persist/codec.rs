//! Record codec: playlist entries to and from the binary stream

use super::strings::{decode_text, encode_text, WireText};
use super::types::{FileHeader, FORMAT_VERSION};
use crate::error::{PlaylistError, Result};
use crate::model::PlaylistEntry;
use binrw::{binrw, BinRead, BinWrite};
use std::io::{Cursor, Read, Seek, Write};

/// Wire form of one entry: url, title, duration, last position
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireEntry {
    pub url: WireText,
    pub title: WireText,
    pub duration: i64,
    pub last_time: i64,
}

impl WireEntry {
    pub fn from_entry(entry: &PlaylistEntry) -> Result<Self> {
        Ok(Self {
            url: encode_text(&entry.url)?,
            title: encode_text(&entry.title)?,
            duration: entry.duration,
            last_time: entry.last_time,
        })
    }

    pub fn into_entry(self) -> Result<PlaylistEntry> {
        Ok(PlaylistEntry {
            url: decode_text(&self.url)?,
            title: decode_text(&self.title)?,
            duration: self.duration,
            last_time: self.last_time,
        })
    }
}

/// What a read produced
#[derive(Debug, Clone, Default)]
pub struct ReadOutcome {
    /// Entries decoded before the stream ended or went bad
    pub entries: Vec<PlaylistEntry>,

    /// Record count announced by the header
    pub declared: u32,

    /// Why reading stopped early, if it did
    pub stopped_early: Option<String>,
}

impl ReadOutcome {
    pub fn is_complete(&self) -> bool {
        self.stopped_early.is_none()
    }
}

/// Read the header, then records one at a time
///
/// A bad header is an error. A bad record stops the read and keeps every
/// entry decoded before it.
pub fn read_entries<R: Read + Seek>(reader: &mut R) -> Result<ReadOutcome> {
    let header = FileHeader::read(reader).map_err(|e| PlaylistError::BadHeader(e.to_string()))?;
    if header.version != FORMAT_VERSION {
        return Err(PlaylistError::BadHeader(format!(
            "unsupported version {} (expected {})",
            header.version, FORMAT_VERSION
        )));
    }

    let mut outcome = ReadOutcome {
        entries: Vec::new(),
        declared: header.record_count,
        stopped_early: None,
    };

    for index in 0..header.record_count {
        let decoded = WireEntry::read(reader)
            .map_err(|e| PlaylistError::Malformed(e.to_string()))
            .and_then(WireEntry::into_entry);

        match decoded {
            Ok(entry) => outcome.entries.push(entry),
            Err(e) => {
                log::warn!(
                    "Stopped reading at record {} of {}: {}",
                    index,
                    header.record_count,
                    e
                );
                outcome.stopped_early = Some(e.to_string());
                break;
            }
        }
    }

    Ok(outcome)
}

/// Write the header followed by every entry, in order
pub fn write_entries<W: Write + Seek>(writer: &mut W, entries: &[PlaylistEntry]) -> Result<()> {
    let count = u32::try_from(entries.len())
        .map_err(|_| PlaylistError::Malformed(format!("too many entries: {}", entries.len())))?;

    FileHeader::new(count)
        .write(writer)
        .map_err(|e| PlaylistError::Malformed(e.to_string()))?;

    for entry in entries {
        WireEntry::from_entry(entry)?
            .write(writer)
            .map_err(|e| PlaylistError::Malformed(e.to_string()))?;
    }

    Ok(())
}

/// Encode entries into an in-memory buffer
pub fn encode(entries: &[PlaylistEntry]) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    write_entries(&mut cursor, entries)?;
    Ok(cursor.into_inner())
}

/// Decode entries from an in-memory buffer
pub fn decode(bytes: &[u8]) -> Result<ReadOutcome> {
    read_entries(&mut Cursor::new(bytes))
}
