use crate::{HeaderError, file::FormatType, prelude::*};

/// Magic bytes at the start of every Standard MIDI File
pub const HEADER_MAGIC: [u8; 4] = *b"MThd";

/// The header chunk's declared length is always 6
pub const HEADER_LENGTH: u32 = 6;

/// Size of the header chunk including magic and length
pub const HEADER_SIZE: usize = 14;

#[doc = r#"
The fields of a validated `MThd` header.

The three fields are kept exactly as they appear in the file. Interpreting
the time division is left to [`Timing::from_division`], so a header is
accepted regardless of what these six bytes contain.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    format_type: u16,
    track_count: u16,
    time_division: u16,
}

impl Header {
    /// Create a new header from its raw fields
    pub const fn new(format_type: u16, track_count: u16, time_division: u16) -> Self {
        Self {
            format_type,
            track_count,
            time_division,
        }
    }

    /// Validates the first [`HEADER_SIZE`] bytes of `bytes`.
    ///
    /// # Errors
    /// - out of bounds if `bytes` is shorter than 14 bytes
    /// - [`HeaderError::InvalidMagic`] if the file does not start with `MThd`
    /// - [`HeaderError::InvalidLength`] if the declared length is not 6
    ///
    /// # Example
    /// ```rust
    /// # use midinoid::prelude::*;
    /// let bytes = [b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 2, 0x01, 0xE0];
    /// let header = Header::parse(&bytes).unwrap();
    /// assert_eq!(header.format_type(), 1);
    /// assert_eq!(header.track_count(), 2);
    /// assert_eq!(header.time_division(), 480);
    /// ```
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        Self::read(&mut reader)
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let magic: [u8; 4] = reader.read_exact_size()?;
        if magic != HEADER_MAGIC {
            return Err(ReaderError::parse_error(
                start,
                HeaderError::InvalidMagic(magic).into(),
            ));
        }
        let length = reader.read_u32_be()?;
        if length != HEADER_LENGTH {
            return Err(ReaderError::parse_error(
                start + 4,
                HeaderError::InvalidLength(length).into(),
            ));
        }

        Ok(Self {
            format_type: reader.read_u16_be()?,
            track_count: reader.read_u16_be()?,
            time_division: reader.read_u16_be()?,
        })
    }

    /// The raw format field (0, 1 or 2 in well-formed files)
    pub const fn format_type(&self) -> u16 {
        self.format_type
    }

    /// The format as a known [`FormatType`], if it is one
    pub fn format(&self) -> Option<FormatType> {
        FormatType::try_from(self.format_type).ok()
    }

    /// Number of track chunks the file declares
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }

    /// The raw time division field
    pub const fn time_division(&self) -> u16 {
        self.time_division
    }

    /// Interprets the time division. See [`Timing::from_division`].
    pub fn timing(&self) -> Result<Timing, TimingError> {
        Timing::from_division(self.time_division)
    }
}

#[cfg(test)]
fn header_bytes(magic: &[u8; 4], length: u32, rest: [u8; 6]) -> alloc::vec::Vec<u8> {
    let mut bytes = alloc::vec::Vec::from(&magic[..]);
    bytes.extend_from_slice(&length.to_be_bytes());
    bytes.extend_from_slice(&rest);
    bytes
}

#[test]
fn accepts_any_fields_after_valid_prefix() {
    use pretty_assertions::assert_eq;
    let header = Header::parse(&header_bytes(b"MThd", 6, [0xFF; 6])).unwrap();
    assert_eq!(header, Header::new(0xFFFF, 0xFFFF, 0xFFFF));
    assert_eq!(header.format(), None);

    let header = Header::parse(&header_bytes(b"MThd", 6, [0, 0, 0, 1, 0, 0])).unwrap();
    assert_eq!(header.format(), Some(FormatType::SingleMultiChannel));
    assert_eq!(header.timing(), Err(TimingError::ZeroTicksPerQuarterNote));
}

#[test]
fn rejects_bad_magic() {
    use pretty_assertions::assert_eq;
    let err = Header::parse(&header_bytes(b"MTrk", 6, [0; 6])).unwrap_err();
    assert!(err.is_header_error());
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::ParseError(ParseError::Header(HeaderError::InvalidMagic(*b"MTrk")))
    );
}

#[test]
fn rejects_bad_length() {
    use pretty_assertions::assert_eq;
    for length in [0, 5, 7, 0x0600_0000] {
        let err = Header::parse(&header_bytes(b"MThd", length, [0; 6])).unwrap_err();
        assert_eq!(
            err.error_kind(),
            &ReaderErrorKind::ParseError(ParseError::Header(HeaderError::InvalidLength(length)))
        );
        assert_eq!(err.position(), 4);
    }
}

#[test]
fn short_header_is_out_of_bounds() {
    let bytes = header_bytes(b"MThd", 6, [0; 6]);
    assert!(Header::parse(&bytes[..13]).unwrap_err().is_out_of_bounds());
    assert!(Header::parse(&[]).unwrap_err().is_out_of_bounds());
}
