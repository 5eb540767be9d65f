#![doc = r#"
A borrowed, lazily decoded view of a Standard MIDI File.

Only the header is validated up front. Track chunks and their events are
decoded as they are walked, so playing a file never buffers its events.
"#]

mod chunk;
pub use chunk::*;

mod format;
pub use format::*;

mod header;
pub use header::*;

mod meta;
pub use meta::*;

mod timing;
pub use timing::*;

mod track;
pub use track::*;

use crate::reader::{ReadResult, Reader};

#[doc = r#"
An immutable MIDI file held entirely in memory, with a validated header.
"#]
#[derive(Clone, Debug, PartialEq)]
pub struct MidiFile<'a> {
    bytes: &'a [u8],
    header: Header,
}

impl<'a> MidiFile<'a> {
    /// Validates the header of `bytes`. Nothing past the header is read.
    pub fn parse(bytes: &'a [u8]) -> ReadResult<Self> {
        let header = Header::parse(bytes)?;
        Ok(Self { bytes, header })
    }

    /// Returns header info
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The whole file
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Walks the track chunks the header declares, in file order
    pub fn tracks(&self) -> TrackChunks<'a> {
        let mut reader = Reader::from_byte_slice(self.bytes);
        // the header was validated, so these bytes exist
        let _ = reader.skip(HEADER_SIZE);
        TrackChunks::new(reader, self.header.track_count())
    }
}

#[cfg(test)]
fn file_bytes(track_count: u16, chunks: &[(&[u8; 4], &[u8])]) -> alloc::vec::Vec<u8> {
    let mut bytes = alloc::vec::Vec::from(&b"MThd\0\0\0\x06\0\x01"[..]);
    bytes.extend_from_slice(&track_count.to_be_bytes());
    bytes.extend_from_slice(&480u16.to_be_bytes());
    for (magic, body) in chunks {
        bytes.extend_from_slice(&magic[..]);
        bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
        bytes.extend_from_slice(body);
    }
    bytes
}

#[test]
fn walks_declared_tracks() {
    use pretty_assertions::assert_eq;
    let bytes = file_bytes(2, &[(b"MTrk", &[0x00, 0xFF, 0x2F, 0x00]), (b"MTrk", &[])]);
    let file = MidiFile::parse(&bytes).unwrap();
    let tracks: alloc::vec::Vec<_> = file.tracks().map(Result::unwrap).collect();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].offset(), 22);
    assert_eq!(tracks[0].len(), 4);
    assert_eq!(tracks[1].index(), 1);
    assert!(tracks[1].is_empty());
    assert_eq!(tracks[1].events().count(), 0);
}

#[test]
fn corrupt_track_magic_skips_only_that_track() {
    use crate::{ChunkError, ParseError, reader::ReaderErrorKind};
    use pretty_assertions::assert_eq;
    let bytes = file_bytes(
        3,
        &[
            (b"MTrk", &[0x00, 0x90, 60, 100]),
            (b"MTrX", &[0x00, 0x90, 61, 100]),
            (b"MTrk", &[0x00, 0x90, 62, 100]),
        ],
    );
    let file = MidiFile::parse(&bytes).unwrap();
    let mut tracks = file.tracks();
    assert_eq!(tracks.len(), 3);

    assert!(tracks.next().unwrap().is_ok());
    let err = tracks.next().unwrap().unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::InvalidMagic(*b"MTrX")))
    );
    let third = tracks.next().unwrap().unwrap();
    assert_eq!(third.index(), 2);
    assert_eq!(third.data(), &[0x00, 0x90, 62, 100]);
    assert!(tracks.next().is_none());
}

#[test]
fn overlong_track_truncates_the_rest() {
    let mut bytes = file_bytes(3, &[(b"MTrk", &[0x00, 0x90, 60, 100])]);
    // claim 64 bytes for a 4 byte body
    bytes[21] = 64;
    bytes.extend_from_slice(b"MTrk\0\0\0\0");
    let file = MidiFile::parse(&bytes).unwrap();
    let results: alloc::vec::Vec<_> = file.tracks().collect();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.as_ref().unwrap_err().is_out_of_bounds()));
}

#[test]
fn missing_tracks_are_out_of_bounds() {
    let bytes = file_bytes(2, &[(b"MTrk", &[])]);
    let file = MidiFile::parse(&bytes).unwrap();
    let results: alloc::vec::Vec<_> = file.tracks().collect();
    assert!(results[0].is_ok());
    assert!(results[1].as_ref().unwrap_err().is_out_of_bounds());
}
