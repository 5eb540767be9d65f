#![doc = r#"
SMPTE (Society of Motion Picture and Television Engineers) time division

MIDI files can time their events in one of two ways:

1. **Musical Time** - ticks per quarter note, scaled by the current tempo
2. **Absolute Time** - SMPTE frames per second and ticks per frame

In absolute time a tick always lasts `1 / (fps * ticks_per_frame)`
seconds. Set Tempo events are still parsed and tracked, but they do not
change how long a tick lasts.

The standard frame rates are 24, 25, 29 (29.97 drop-frame) and 30. Any
positive rate is accepted here; drop-frame is timed at its nominal 29.
"#]

use crate::TimingError;

/// A representation of the `smpte` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteHeader {
    pub(crate) fps: u8,
    pub(crate) ticks_per_frame: u8,
}

impl SmpteHeader {
    /// `msb` holds -fps in two's complement, `lsb` the ticks per frame
    pub(crate) const fn new(msb: u8, lsb: u8) -> Result<Self, TimingError> {
        let negated = msb as i8;
        if negated >= 0 || negated == i8::MIN {
            return Err(TimingError::InvalidFramesPerSecond(msb));
        }
        if lsb == 0 {
            return Err(TimingError::ZeroTicksPerFrame);
        }
        Ok(Self {
            fps: (-negated) as u8,
            ticks_per_frame: lsb,
        })
    }

    /// Returns the frames per second
    pub const fn frames_per_second(&self) -> u8 {
        self.fps
    }

    /// Returns the ticks per frame
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame
    }

    /// Ticks elapsing in one second
    pub const fn ticks_per_second(&self) -> u32 {
        self.fps as u32 * self.ticks_per_frame as u32
    }
}

#[test]
fn rejects_unusable_rates() {
    use pretty_assertions::assert_eq;
    // 0x80 negates to 128, which does not fit an i8
    assert_eq!(
        SmpteHeader::new(0x80, 40),
        Err(TimingError::InvalidFramesPerSecond(0x80))
    );
    assert_eq!(SmpteHeader::new(0xE7, 0), Err(TimingError::ZeroTicksPerFrame));
    assert_eq!(SmpteHeader::new(0xE3, 80).unwrap().frames_per_second(), 29);
}
