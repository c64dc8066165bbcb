//! Length-prefixed UTF-16 text encoding
//!
//! Text fields are stored as a `u32` count of UTF-16 code units followed by
//! the units themselves, big-endian. Characters outside the BMP take two units
//! (a surrogate pair).

use super::types::MAX_TEXT_UNITS;
use crate::error::{PlaylistError, Result};
use binrw::binrw;

/// Wire form of a text field
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireText {
    #[br(temp, assert(len <= MAX_TEXT_UNITS))]
    #[bw(calc = units.len() as u32)]
    len: u32,

    #[br(count = len)]
    pub units: Vec<u16>,
}

/// Encode a string as UTF-16 code units
pub fn encode_text(s: &str) -> Result<WireText> {
    let units: Vec<u16> = s.encode_utf16().collect();
    if units.len() as u64 > MAX_TEXT_UNITS as u64 {
        return Err(PlaylistError::Malformed(format!(
            "text field too long ({} UTF-16 units)",
            units.len()
        )));
    }
    Ok(WireText { units })
}

/// Decode UTF-16 code units, rejecting unpaired surrogates
pub fn decode_text(text: &WireText) -> Result<String> {
    String::from_utf16(&text.units)
        .map_err(|e| PlaylistError::Malformed(format!("invalid UTF-16 text: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use binrw::{BinRead, BinWrite};
    use std::io::Cursor;

    fn to_bytes(s: &str) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        encode_text(s).unwrap().write(&mut cursor).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(to_bytes(""), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_ascii_is_big_endian_utf16() {
        let bytes = to_bytes("Hi");
        // 2 units, then 'H' = 0x0048, 'i' = 0x0069
        assert_eq!(bytes, vec![0, 0, 0, 2, 0x00, 0x48, 0x00, 0x69]);
    }

    #[test]
    fn test_accented_characters() {
        let bytes = to_bytes("Déjà");
        assert_eq!(&bytes[..4], &[0, 0, 0, 4]);
        // 'é' = 0x00E9
        assert_eq!(&bytes[6..8], &[0x00, 0xE9]);
    }

    #[test]
    fn test_surrogate_pair_counts_two_units() {
        let bytes = to_bytes("🎵");
        assert_eq!(&bytes[..4], &[0, 0, 0, 2]);
        assert_eq!(&bytes[4..6], &[0xD8, 0x3C]);
        assert_eq!(&bytes[6..8], &[0xDF, 0xB5]);
    }

    #[test]
    fn test_read_back() {
        let mut cursor = Cursor::new(to_bytes("file:///music/é.mp3"));
        let text = WireText::read(&mut cursor).unwrap();
        assert_eq!(decode_text(&text).unwrap(), "file:///music/é.mp3");
    }

    #[test]
    fn test_unpaired_surrogate_is_malformed() {
        let text = WireText {
            units: vec![0xD800],
        };
        assert!(matches!(decode_text(&text), Err(PlaylistError::Malformed(_))));
    }

    #[test]
    fn test_oversized_length_rejected() {
        let mut bytes = (MAX_TEXT_UNITS + 1).to_be_bytes().to_vec();
        bytes.extend_from_slice(&[0, 0x41]);
        let mut cursor = Cursor::new(bytes);
        assert!(WireText::read(&mut cursor).is_err());
    }
}
