#![doc = r#"
A bounds-checked cursor over MIDI file bytes.

Every read either returns the requested bytes and advances, or fails with
[`ReaderErrorKind::OutOfBounds`] and leaves the position untouched. Nothing
here ever indexes past the end of the supplied buffer.
"#]

mod error;
pub use error::*;

use crate::ParseError;

/// Reads MIDI data out of a borrowed byte slice
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader positioned at the start of `data`
    pub const fn from_byte_slice(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Returns the offset of the next byte to be read
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Number of bytes left before the end of the buffer
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// True if every byte has been consumed
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the next byte without consuming it
    pub fn peek_u8(&self) -> ReadResult<u8> {
        self.data
            .get(self.position)
            .copied()
            .ok_or(ReaderError::oob(self.position))
    }

    /// Reads one byte
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let byte = self.peek_u8()?;
        self.position += 1;
        Ok(byte)
    }

    /// Reads `len` bytes as a borrowed slice
    pub fn read_slice(&mut self, len: usize) -> ReadResult<&'a [u8]> {
        let end = self
            .position
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(ReaderError::oob(self.position))?;
        let slice = &self.data[self.position..end];
        self.position = end;
        Ok(slice)
    }

    /// Reads exactly `N` bytes into an array
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut bytes = [0; N];
        bytes.copy_from_slice(self.read_slice(N)?);
        Ok(bytes)
    }

    /// Consumes `len` bytes without looking at them
    pub fn skip(&mut self, len: usize) -> ReadResult<()> {
        self.read_slice(len).map(|_| ())
    }

    /// Reads a big-endian `u16`
    pub fn read_u16_be(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Reads a big-endian `u32`
    pub fn read_u32_be(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Reads a variable-length quantity. See [`decode_vlq`].
    pub fn read_vlq(&mut self) -> ReadResult<u32> {
        let (value, next) = decode_vlq(self.data, self.position)?;
        self.position = next;
        Ok(value)
    }
}

/// Decodes a MIDI variable-length quantity starting at `offset`.
///
/// Each byte contributes its low seven bits, most significant group first.
/// Decoding stops at the first byte whose top bit is clear. Returns the value
/// and the offset of the byte following the quantity.
///
/// # Errors
/// - [`ReaderErrorKind::OutOfBounds`] if the buffer ends while the continuation bit is still set
/// - [`ParseError::VlqOverflow`] if the value does not fit in a `u32`
///
/// # Example
/// ```rust
/// # use midinoid::reader::decode_vlq;
/// let bytes = [0x00, 0x83, 0x60, 0x90];
/// assert_eq!(decode_vlq(&bytes, 1).unwrap(), (480, 3));
/// ```
pub fn decode_vlq(buffer: &[u8], offset: usize) -> ReadResult<(u32, usize)> {
    let mut value: u32 = 0;
    let mut position = offset;
    loop {
        let Some(&byte) = buffer.get(position) else {
            return Err(ReaderError::oob(position));
        };
        if value > (u32::MAX >> 7) {
            return Err(ReaderError::parse_error(offset, ParseError::VlqOverflow));
        }
        value = (value << 7) | (byte & 0x7F) as u32;
        position += 1;
        if byte & 0x80 == 0 {
            return Ok((value, position));
        }
    }
}

#[test]
fn decode_known_quantities() {
    use pretty_assertions::assert_eq;
    // values and encodings from the Standard MIDI File 1.0 document
    let cases: [(&[u8], u32); 8] = [
        (&[0x00], 0x00),
        (&[0x40], 0x40),
        (&[0x7F], 0x7F),
        (&[0x81, 0x00], 0x80),
        (&[0xC0, 0x00], 0x2000),
        (&[0xFF, 0x7F], 0x3FFF),
        (&[0x81, 0x80, 0x00], 0x4000),
        (&[0xFF, 0xFF, 0xFF, 0x7F], 0x0FFF_FFFF),
    ];
    for (bytes, expected) in cases {
        assert_eq!(decode_vlq(bytes, 0).unwrap(), (expected, bytes.len()));
    }
}

#[test]
fn decode_stops_at_first_clear_byte() {
    use pretty_assertions::assert_eq;
    let bytes = [0x81, 0x00, 0x81, 0x00];
    assert_eq!(decode_vlq(&bytes, 0).unwrap(), (0x80, 2));
    assert_eq!(decode_vlq(&bytes, 2).unwrap(), (0x80, 4));
}

#[test]
fn decode_truncated_quantity() {
    let err = decode_vlq(&[0x81, 0x80], 0).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 2);

    let err = decode_vlq(&[0x00], 1).unwrap_err();
    assert!(err.is_out_of_bounds());
}

#[test]
fn decode_overflowing_quantity() {
    // five groups of seven set bits is 35 bits
    let err = decode_vlq(&[0xFF, 0xFF, 0xFF, 0xFF, 0x7F], 0).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::ParseError(ParseError::VlqOverflow)
    ));

    // leading zero groups still fit
    let (value, next) = decode_vlq(&[0x80, 0x80, 0x80, 0x80, 0x01], 0).unwrap();
    assert_eq!((value, next), (1, 5));
}

#[test]
fn failed_reads_do_not_advance() {
    let mut reader = Reader::from_byte_slice(&[0x4D, 0x54]);
    assert!(reader.read_u32_be().unwrap_err().is_out_of_bounds());
    assert_eq!(reader.buffer_position(), 0);
    assert_eq!(reader.read_u16_be().unwrap(), 0x4D54);
    assert!(reader.is_empty());
}

#[test]
fn decode_five_byte_quantities() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        decode_vlq(&[0x81, 0x80, 0x80, 0x80, 0x00], 0).unwrap(),
        (0x1000_0000, 5)
    );
    assert_eq!(
        decode_vlq(&[0x8F, 0xFF, 0xFF, 0xFF, 0x7F], 0).unwrap(),
        (u32::MAX, 5)
    );

    // one past u32::MAX
    let err = decode_vlq(&[0x90, 0x80, 0x80, 0x80, 0x00], 0).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::ParseError(ParseError::VlqOverflow)
    );
    assert_eq!(err.position(), 0);
}
