#![doc = r#"
Meta events (`FF type length payload`).

Only Set Tempo and End of Track change what the player does. Every other
meta event is recognized, its payload consumed, and otherwise ignored.
"#]

mod tempo;
pub use tempo::*;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Meta event types defined by the Standard MIDI File specification
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum MetaType {
    SequenceNumber = 0x00,
    Text = 0x01,
    Copyright = 0x02,
    TrackName = 0x03,
    InstrumentName = 0x04,
    Lyric = 0x05,
    Marker = 0x06,
    CuePoint = 0x07,
    ProgramName = 0x08,
    DeviceName = 0x09,
    ChannelPrefix = 0x20,
    Port = 0x21,
    EndOfTrack = 0x2F,
    Tempo = 0x51,
    SmpteOffset = 0x54,
    TimeSignature = 0x58,
    KeySignature = 0x59,
    SequencerSpecific = 0x7F,
}

/// A decoded meta event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaEvent {
    /// Set Tempo with a well-formed 3-byte payload
    Tempo(Tempo),
    /// End of Track. No further events are read from the chunk.
    EndOfTrack,
    /// Any other meta event, including a Set Tempo whose payload is not 3 bytes
    Other {
        /// The raw meta type byte
        meta_type: u8,
        /// Payload length in bytes
        len: u32,
    },
}

impl MetaEvent {
    /// Interprets the payload of a meta event of type `meta_type`
    pub fn from_payload(meta_type: u8, payload: &[u8]) -> Self {
        let other = Self::Other {
            meta_type,
            len: payload.len() as u32,
        };
        match MetaType::try_from(meta_type) {
            Ok(MetaType::Tempo) => Tempo::new_from_bytes(payload).map_or(other, Self::Tempo),
            Ok(MetaType::EndOfTrack) => Self::EndOfTrack,
            _ => other,
        }
    }

    /// The known type of this event, if it has one
    pub fn meta_type(&self) -> Option<MetaType> {
        match self {
            Self::Tempo(_) => Some(MetaType::Tempo),
            Self::EndOfTrack => Some(MetaType::EndOfTrack),
            Self::Other { meta_type, .. } => MetaType::try_from(*meta_type).ok(),
        }
    }
}

#[test]
fn classify_meta_payloads() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        MetaEvent::from_payload(0x51, &[0x07, 0xA1, 0x20]),
        MetaEvent::Tempo(Tempo::new(500_000))
    );
    assert_eq!(MetaEvent::from_payload(0x2F, &[]), MetaEvent::EndOfTrack);

    let short_tempo = MetaEvent::from_payload(0x51, &[0x07, 0xA1]);
    assert_eq!(
        short_tempo,
        MetaEvent::Other {
            meta_type: 0x51,
            len: 2
        }
    );
    assert_eq!(short_tempo.meta_type(), Some(MetaType::Tempo));

    let unknown = MetaEvent::from_payload(0x60, b"abc");
    assert_eq!(unknown.meta_type(), None);
}
