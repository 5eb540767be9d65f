#![doc = r#"
Channel voice messages as they appear inside a track.

# Hierarchy
```text
           |-----------------|
           | Channel Message |
           |-----------------|
            /       |       \
   |---------|  |----------|  |-------|
   | Note On |  | Note Off |  | Other |
   |---------|  |----------|  |-------|
```

Only note messages reach the outputs. Every other voice message is parsed
with its correct data length so the track stays in sync, then ignored.
"#]

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::Note;

/// The high nibble of a channel status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum VoiceStatus {
    /// `0x8n`
    NoteOff = 0x8,
    /// `0x9n`
    NoteOn = 0x9,
    /// `0xAn`
    PolyphonicAftertouch = 0xA,
    /// `0xBn`
    ControlChange = 0xB,
    /// `0xCn`
    ProgramChange = 0xC,
    /// `0xDn`
    ChannelAftertouch = 0xD,
    /// `0xEn`
    PitchBend = 0xE,
}

impl VoiceStatus {
    /// Classifies a status byte. `None` for data bytes and system bytes (`0xF0`-`0xFF`).
    pub fn from_status(status: u8) -> Option<Self> {
        Self::try_from(status >> 4).ok()
    }

    /// Number of data bytes following the status
    pub const fn data_len(&self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelAftertouch => 1,
            _ => 2,
        }
    }
}

#[doc = r#"
The set of possible Channel messages
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMessage {
    /// `0x9n` with a nonzero velocity
    NoteOn {
        /// The note struck
        note: Note,
        /// Always nonzero
        velocity: u8,
    },
    /// `0x8n`, or `0x9n` with a zero velocity
    NoteOff {
        /// The note released
        note: Note,
        /// Release velocity (zero when sent as a Note On)
        velocity: u8,
    },
    /// Any other voice message
    Other {
        /// The message type
        status: VoiceStatus,
        /// First data byte
        data1: u8,
        /// Second data byte, zero for one-byte messages
        data2: u8,
    },
}

impl ChannelMessage {
    /// Builds the message for `status` from its data bytes
    pub fn new(status: VoiceStatus, data1: u8, data2: u8) -> Self {
        match status {
            VoiceStatus::NoteOn if data2 > 0 => Self::NoteOn {
                note: Note::from_databyte_unchecked(data1),
                velocity: data2,
            },
            VoiceStatus::NoteOn | VoiceStatus::NoteOff => Self::NoteOff {
                note: Note::from_databyte_unchecked(data1),
                velocity: data2,
            },
            status => Self::Other {
                status,
                data1,
                data2,
            },
        }
    }

    /// The note this message strikes or releases
    pub const fn note(&self) -> Option<Note> {
        match self {
            Self::NoteOn { note, .. } | Self::NoteOff { note, .. } => Some(*note),
            Self::Other { .. } => None,
        }
    }
}

#[doc = r#"
A channel message tagged with its channel (0-15)
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelEvent {
    channel: u8,
    message: ChannelMessage,
}

impl ChannelEvent {
    /// Create a new channel event
    pub const fn new(channel: u8, message: ChannelMessage) -> Self {
        Self {
            channel: channel & 0x0F,
            message,
        }
    }

    /// Returns the channel, 0-15
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Returns the message
    pub const fn message(&self) -> &ChannelMessage {
        &self.message
    }
}

#[test]
fn zero_velocity_note_on_is_note_off() {
    use pretty_assertions::assert_eq;
    let note = Note::MIDDLE_C;
    assert_eq!(
        ChannelMessage::new(VoiceStatus::NoteOn, 60, 0),
        ChannelMessage::NoteOff { note, velocity: 0 }
    );
    assert_eq!(
        ChannelMessage::new(VoiceStatus::NoteOn, 60, 1),
        ChannelMessage::NoteOn { note, velocity: 1 }
    );
    assert_eq!(
        ChannelMessage::new(VoiceStatus::NoteOff, 60, 64),
        ChannelMessage::NoteOff { note, velocity: 64 }
    );
}

#[test]
fn status_data_lengths() {
    use pretty_assertions::assert_eq;
    assert_eq!(VoiceStatus::from_status(0xC3), Some(VoiceStatus::ProgramChange));
    assert_eq!(VoiceStatus::ProgramChange.data_len(), 1);
    assert_eq!(VoiceStatus::from_status(0xD0).unwrap().data_len(), 1);
    assert_eq!(VoiceStatus::from_status(0xE0).unwrap().data_len(), 2);
    assert_eq!(VoiceStatus::from_status(0xF0), None);
    assert_eq!(VoiceStatus::from_status(0x45), None);
}
