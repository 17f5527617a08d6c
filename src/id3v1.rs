use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::encoding::Codec;
use crate::error::{TagEncError, TagEncResult};
use crate::metadata::Metadata;

pub const TAG_SIZE: usize = 128;
const TAG_ID: &[u8; 3] = b"TAG";

/// Read the ID3v1 tag at the end of `path`, if there is one.
pub fn read_tag(path: &Path) -> TagEncResult<Option<Metadata>> {
    let mut file = File::open(path).map_err(TagEncError::CantOpenFile)?;
    let len = file.metadata()?.len();
    if len < TAG_SIZE as u64 {
        return Ok(None);
    }

    let mut block = [0u8; TAG_SIZE];
    file.seek(SeekFrom::End(-(TAG_SIZE as i64)))?;
    file.read_exact(&mut block)?;
    Ok(parse_tag(&block))
}

/// Parse a 128-byte ID3v1 block. Text is decoded as Latin-1, which is what
/// most tag editors assume for this format.
///
/// Layout:
///   0..3     "TAG"
///   3..33    title
///   33..63   artist
///   63..93   album
///   93..97   year
///   97..127  comment (v1.1: byte 125 is zero and byte 126 is the track)
///   127      genre
pub fn parse_tag(block: &[u8; TAG_SIZE]) -> Option<Metadata> {
    if &block[0..3] != TAG_ID {
        return None;
    }

    let mut metadata = Metadata::new();
    metadata.set("title", text_field(&block[3..33]));
    metadata.set("artist", text_field(&block[33..63]));
    metadata.set("album", text_field(&block[63..93]));

    let year = text_field(&block[93..97]);
    if !year.is_empty() {
        metadata.set("date", year);
    }

    let comment = &block[97..127];
    if comment[28] == 0 && comment[29] != 0 {
        metadata.set("comment", text_field(&comment[..28]));
        metadata.set("tracknumber", comment[29].to_string());
    } else {
        metadata.set("comment", text_field(comment));
    }

    Some(metadata)
}

fn text_field(raw: &[u8]) -> String {
    // Fields are NUL-terminated or padded with NULs or spaces.
    let raw = match raw.iter().position(|&b| b == 0) {
        Some(nul) => &raw[..nul],
        None => raw,
    };
    let end = raw.iter().rposition(|&b| b != b' ').map_or(0, |i| i + 1);
    Codec::LATIN_1.decode_replacing(&raw[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(title: &[u8], artist: &[u8], album: &[u8], comment: &[u8]) -> [u8; TAG_SIZE] {
        let mut b = [0u8; TAG_SIZE];
        b[0..3].copy_from_slice(TAG_ID);
        b[3..3 + title.len()].copy_from_slice(title);
        b[33..33 + artist.len()].copy_from_slice(artist);
        b[63..63 + album.len()].copy_from_slice(album);
        b[93..97].copy_from_slice(b"2003");
        b[97..97 + comment.len()].copy_from_slice(comment);
        b
    }

    #[test]
    fn test_parse_v1() {
        let b = block(b"Song   ", b"Band", b"\xbf\xee\xbf\xb5", b"hello");
        let m = parse_tag(&b).unwrap();
        assert_eq!(m.get("title"), "Song");
        assert_eq!(m.get("artist"), "Band");
        assert_eq!(m.get("album"), "\u{bf}\u{ee}\u{bf}\u{b5}");
        assert_eq!(m.get("date"), "2003");
        assert_eq!(m.get("comment"), "hello");
        assert!(!m.contains("tracknumber"));
    }

    #[test]
    fn test_parse_v1_1_track() {
        let mut b = block(b"T", b"A", b"B", b"c");
        b[97 + 29] = 7;
        let m = parse_tag(&b).unwrap();
        assert_eq!(m.get("tracknumber"), "7");
        assert_eq!(m.get("comment"), "c");
    }

    #[test]
    fn test_no_tag() {
        assert!(parse_tag(&[0u8; TAG_SIZE]).is_none());
    }
}
