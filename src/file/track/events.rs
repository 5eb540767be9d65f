use crate::{
    ChunkError,
    file::{EventKind, MetaEvent, TrackEvent},
    message::{ChannelEvent, ChannelMessage, VoiceStatus},
    reader::{ReadResult, Reader, ReaderError},
};

#[doc = r#"
A forward-only iterator over the events of one track chunk.

Each step decodes a delta time and one event. Iteration ends when the
chunk's bytes are exhausted or after an End of Track meta event. The first
error is yielded once and ends iteration: the rest of the track cannot be
located once a length or delta time is wrong.

Running status is supported: a data byte where a status byte is expected
reuses the previous channel status of this track. Meta, SysEx and system
events cancel running status.

Restarting means building a new iterator from the chunk.

# Example
```rust
# use midinoid::prelude::*;
let data = [0x00, 0x90, 60, 100, 0x60, 60, 0, 0x00, 0xFF, 0x2F, 0x00];
let notes: Vec<_> = TrackEvents::new(&data)
    .filter_map(|event| match event.unwrap().kind() {
        EventKind::Channel(c) => Some(*c.message()),
        _ => None,
    })
    .collect();
assert_eq!(
    notes,
    [
        ChannelMessage::NoteOn { note: Note::MIDDLE_C, velocity: 100 },
        ChannelMessage::NoteOff { note: Note::MIDDLE_C, velocity: 0 },
    ]
);
```
"#]
#[derive(Debug, Clone)]
pub struct TrackEvents<'a> {
    reader: Reader<'a>,
    base: usize,
    running_status: Option<u8>,
    finished: bool,
}

impl<'a> TrackEvents<'a> {
    /// Iterate over the events in `data`, the body of a track chunk
    pub const fn new(data: &'a [u8]) -> Self {
        Self::with_base(data, 0)
    }

    /// Like [`TrackEvents::new`], reporting error positions relative to `base`
    pub(crate) const fn with_base(data: &'a [u8], base: usize) -> Self {
        Self {
            reader: Reader::from_byte_slice(data),
            base,
            running_status: None,
            finished: false,
        }
    }

    /// Offset of the next undecoded byte within the track data
    pub const fn position(&self) -> usize {
        self.reader.buffer_position()
    }

    fn read_event(&mut self) -> ReadResult<TrackEvent> {
        let delta_ticks = self.reader.read_vlq()?;

        let position = self.reader.buffer_position();
        let byte = self.reader.peek_u8()?;
        let status = if byte & 0x80 != 0 {
            self.reader.read_u8()?
        } else {
            self.running_status.ok_or(ReaderError::parse_error(
                position,
                ChunkError::MissingStatus.into(),
            ))?
        };

        let kind = match status {
            0xFF => {
                self.running_status = None;
                let meta_type = self.reader.read_u8()?;
                let len = self.reader.read_vlq()?;
                let payload = self.reader.read_slice(len as usize)?;
                EventKind::Meta(MetaEvent::from_payload(meta_type, payload))
            }
            0xF0 | 0xF7 => {
                self.running_status = None;
                let len = self.reader.read_vlq()?;
                self.reader.skip(len as usize)?;
                EventKind::SysEx { len }
            }
            0xF1..=0xFE => {
                self.running_status = None;
                self.reader.skip(system_data_len(status))?;
                EventKind::System { status }
            }
            _ => {
                let Some(voice) = VoiceStatus::from_status(status) else {
                    return Err(ReaderError::parse_error(
                        position,
                        ChunkError::MissingStatus.into(),
                    ));
                };
                self.running_status = Some(status);
                let data1 = self.reader.read_u8()?;
                let data2 = match voice.data_len() {
                    2 => self.reader.read_u8()?,
                    _ => 0,
                };
                EventKind::Channel(ChannelEvent::new(
                    status & 0x0F,
                    ChannelMessage::new(voice, data1, data2),
                ))
            }
        };

        Ok(TrackEvent::new(delta_ticks, kind))
    }
}

/// Data bytes following a system common status
const fn system_data_len(status: u8) -> usize {
    match status {
        // song position pointer
        0xF2 => 2,
        // time code quarter frame, song select
        0xF1 | 0xF3 => 1,
        _ => 0,
    }
}

impl Iterator for TrackEvents<'_> {
    type Item = ReadResult<TrackEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.reader.is_empty() {
            return None;
        }
        match self.read_event() {
            Ok(event) => {
                self.finished = event.is_end_of_track();
                Some(Ok(event))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e.offset_by(self.base)))
            }
        }
    }
}

impl core::iter::FusedIterator for TrackEvents<'_> {}

#[cfg(test)]
fn collect(data: &[u8]) -> alloc::vec::Vec<ReadResult<TrackEvent>> {
    TrackEvents::new(data).collect()
}

#[test]
fn note_events_and_tempo() {
    use crate::{Note, file::Tempo};
    use pretty_assertions::assert_eq;

    let data = [
        0x00, 0xFF, 0x51, 0x03, 0x0F, 0x42, 0x40, // tempo 1_000_000
        0x00, 0x91, 61, 90, // note on, channel 2
        0x83, 0x60, 0x81, 61, 30, // note off after 480 ticks
    ];
    let events = collect(&data);
    assert_eq!(
        events,
        [
            Ok(TrackEvent::new(
                0,
                EventKind::Meta(MetaEvent::Tempo(Tempo::new(1_000_000)))
            )),
            Ok(TrackEvent::new(
                0,
                EventKind::Channel(ChannelEvent::new(
                    1,
                    ChannelMessage::NoteOn {
                        note: Note::from_databyte_unchecked(61),
                        velocity: 90
                    }
                ))
            )),
            Ok(TrackEvent::new(
                480,
                EventKind::Channel(ChannelEvent::new(
                    1,
                    ChannelMessage::NoteOff {
                        note: Note::from_databyte_unchecked(61),
                        velocity: 30
                    }
                ))
            )),
        ]
    );
}

#[test]
fn running_status_reuses_previous_channel_status() {
    use pretty_assertions::assert_eq;
    let data = [
        0x00, 0x90, 60, 100, // explicit status
        0x10, 62, 100, // running status
        0x10, 0xC0, 5, // program change, one data byte
        0x10, 7, // running program change
        0x10, 0x90, 60, 0,
    ];
    let kinds: alloc::vec::Vec<_> = collect(&data)
        .into_iter()
        .map(|e| *e.unwrap().kind())
        .collect();
    assert_eq!(kinds.len(), 5);
    assert_eq!(
        kinds[1],
        EventKind::Channel(ChannelEvent::new(
            0,
            ChannelMessage::new(VoiceStatus::NoteOn, 62, 100)
        ))
    );
    assert_eq!(
        kinds[3],
        EventKind::Channel(ChannelEvent::new(
            0,
            ChannelMessage::Other {
                status: VoiceStatus::ProgramChange,
                data1: 7,
                data2: 0
            }
        ))
    );
}

#[test]
fn data_byte_without_running_status() {
    use crate::{ParseError, reader::ReaderErrorKind};
    use pretty_assertions::assert_eq;

    // a meta event cancels running status
    let data = [0x00, 0x90, 60, 100, 0x00, 0xFF, 0x01, 0x00, 0x00, 60, 0];
    let events = collect(&data);
    assert_eq!(events.len(), 3);
    let err = events[2].unwrap_err();
    assert_eq!(err.position(), 9);
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::MissingStatus))
    );
}

#[test]
fn skips_sysex_meta_and_system_payloads() {
    use pretty_assertions::assert_eq;
    let data = [
        0x00, 0xF0, 0x03, 0x43, 0x12, 0xF7, // sysex
        0x00, 0xF7, 0x01, 0xF7, // escaped sysex continuation
        0x00, 0xFF, 0x03, 0x02, b'h', b'i', // track name
        0x00, 0xF2, 0x10, 0x20, // song position pointer
        0x00, 0xB0, 64, 127, // sustain pedal
        0x00, 0x90, 60, 100,
    ];
    let kinds: alloc::vec::Vec<_> = collect(&data)
        .into_iter()
        .map(|e| *e.unwrap().kind())
        .collect();
    assert_eq!(kinds[0], EventKind::SysEx { len: 3 });
    assert_eq!(kinds[1], EventKind::SysEx { len: 1 });
    assert_eq!(
        kinds[2],
        EventKind::Meta(MetaEvent::Other {
            meta_type: 0x03,
            len: 2
        })
    );
    assert_eq!(kinds[3], EventKind::System { status: 0xF2 });
    assert!(matches!(
        kinds[4],
        EventKind::Channel(c) if c.message().note().is_none()
    ));
    assert!(matches!(
        kinds[5],
        EventKind::Channel(c) if matches!(c.message(), ChannelMessage::NoteOn { .. })
    ));
}

#[test]
fn end_of_track_stops_iteration() {
    let data = [0x00, 0xFF, 0x2F, 0x00, 0x00, 0x90, 60, 100];
    let events = collect(&data);
    assert_eq!(events.len(), 1);
    assert!(events[0].as_ref().unwrap().is_end_of_track());
}

#[test]
fn truncation_ends_iteration_after_one_error() {
    use pretty_assertions::assert_eq;
    // note on missing its velocity
    let mut events = TrackEvents::with_base(&[0x00, 0x90, 60, 100, 0x00, 0x90, 62], 22);
    assert!(events.next().unwrap().is_ok());
    let err = events.next().unwrap().unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 22 + 7);
    assert!(events.next().is_none());

    // meta length longer than the track
    let events = collect(&[0x00, 0xFF, 0x01, 0x10, b'a']);
    assert_eq!(events.len(), 1);
    assert!(events[0].unwrap_err().is_out_of_bounds());

    // delta time with the continuation bit set on the last byte
    let events = collect(&[0x00, 0x90, 60, 100, 0x83]);
    assert!(events[1].unwrap_err().is_out_of_bounds());
}
