use crate::{
    ChunkError,
    file::TrackEvents,
    reader::{ReadResult, Reader, ReaderError},
};

/// Magic bytes at the start of every track chunk
pub const TRACK_MAGIC: [u8; 4] = *b"MTrk";

#[doc = r#"
The body of one `MTrk` chunk: a byte range inside the file.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackChunk<'a> {
    index: u16,
    offset: usize,
    data: &'a [u8],
}

impl<'a> TrackChunk<'a> {
    /// Zero-based index of the chunk among the header's declared tracks
    pub const fn index(&self) -> u16 {
        self.index
    }

    /// Offset of the chunk body within the file
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The declared length of the chunk body
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a chunk declaring zero bytes
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw chunk body
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// A fresh iterator over this chunk's events
    pub const fn events(&self) -> TrackEvents<'a> {
        TrackEvents::with_base(self.data, self.offset)
    }
}

#[doc = r#"
Walks the track chunks following the header, yielding exactly as many
items as the header declares.

- A chunk whose magic is not `MTrk` yields [`ChunkError::InvalidMagic`]. Its
  declared length is skipped so the next chunk is found.
- A chunk whose declared length runs past the end of the file, or a header
  that cannot be read at all, yields an out of bounds error. Every chunk
  after it does the same, since nothing more can be located.
"#]
#[derive(Debug, Clone)]
pub struct TrackChunks<'a> {
    reader: Reader<'a>,
    declared: u16,
    next_index: u16,
}

impl<'a> TrackChunks<'a> {
    pub(crate) const fn new(reader: Reader<'a>, declared: u16) -> Self {
        Self {
            reader,
            declared,
            next_index: 0,
        }
    }

    fn read_chunk(&mut self, index: u16) -> ReadResult<TrackChunk<'a>> {
        let start = self.reader.buffer_position();
        let (magic, len) = match self.read_chunk_header() {
            Ok(header) => header,
            Err(e) => {
                self.exhaust();
                return Err(e);
            }
        };
        let offset = self.reader.buffer_position();

        if magic != TRACK_MAGIC {
            if self.reader.skip(len).is_err() {
                self.exhaust();
            }
            return Err(ReaderError::parse_error(
                start,
                ChunkError::InvalidMagic(magic).into(),
            ));
        }

        match self.reader.read_slice(len) {
            Ok(data) => Ok(TrackChunk {
                index,
                offset,
                data,
            }),
            Err(e) => {
                self.exhaust();
                Err(e)
            }
        }
    }

    fn read_chunk_header(&mut self) -> ReadResult<([u8; 4], usize)> {
        let magic = self.reader.read_exact_size()?;
        let len = self.reader.read_u32_be()? as usize;
        Ok((magic, len))
    }

    fn exhaust(&mut self) {
        let remaining = self.reader.remaining();
        let _ = self.reader.skip(remaining);
    }
}

impl<'a> Iterator for TrackChunks<'a> {
    type Item = ReadResult<TrackChunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.declared {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;
        Some(self.read_chunk(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.declared - self.next_index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TrackChunks<'_> {}
