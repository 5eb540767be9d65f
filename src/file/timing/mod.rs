mod smpte;
pub use smpte::*;

use crate::TimingError;

/// The header timing type.
///
/// This is either the number of ticks per quarter note or
/// the alternative SMPTE format, selected by the top bit of the
/// header's time division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// The midi file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(TicksPerQuarterNote),

    /// The midi file's delta times are defined using SMPTE frames
    Smpte(SmpteHeader),
}

impl Timing {
    /// Interprets a header's time division.
    ///
    /// With the top bit clear the division is ticks per quarter note. With
    /// it set, the top byte is a negated frames-per-second value in two's
    /// complement and the bottom byte is ticks per frame.
    ///
    /// # Errors
    /// Any division that would make a delay divide by zero.
    ///
    /// # Example
    /// ```rust
    /// # use midinoid::prelude::*;
    /// let timing = Timing::from_division(0xE728).unwrap();
    /// let Timing::Smpte(smpte) = timing else { panic!() };
    /// assert_eq!(smpte.frames_per_second(), 25);
    /// assert_eq!(smpte.ticks_per_frame(), 40);
    /// ```
    pub const fn from_division(division: u16) -> Result<Self, TimingError> {
        let [msb, lsb] = division.to_be_bytes();
        if msb >> 7 == 0 {
            if division == 0 {
                return Err(TimingError::ZeroTicksPerQuarterNote);
            }
            return Ok(Self::TicksPerQuarterNote(TicksPerQuarterNote { inner: division }));
        }
        match SmpteHeader::new(msb, lsb) {
            Ok(smpte) => Ok(Self::Smpte(smpte)),
            Err(e) => Err(e),
        }
    }

    /// The tickrate per quarter note defines what a "quarter note" means.
    ///
    /// The leading bit of the u16 is disregarded, so 1-32767
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        Self::TicksPerQuarterNote(TicksPerQuarterNote {
            inner: tpqn & 0x7FFF,
        })
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(t.ticks_per_quarter_note()),
            _ => None,
        }
    }

    /// True for SMPTE timing, where tempo changes do not affect delays
    pub const fn is_smpte(&self) -> bool {
        matches!(self, Self::Smpte(_))
    }
}

/// A representation of the `tpqn` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TicksPerQuarterNote {
    pub(crate) inner: u16,
}

impl TicksPerQuarterNote {
    /// Returns the ticks per quarter note for the file.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        self.inner & 0x7FFF
    }
}

#[test]
fn metrical_division() {
    use pretty_assertions::assert_eq;
    let timing = Timing::from_division(480).unwrap();
    assert_eq!(timing.ticks_per_quarter_note(), Some(480));
    assert!(!timing.is_smpte());

    assert_eq!(
        Timing::from_division(0),
        Err(TimingError::ZeroTicksPerQuarterNote)
    );
}

#[test]
fn smpte_division() {
    use pretty_assertions::assert_eq;
    // -24 fps, 4 ticks per frame
    let timing = Timing::from_division(0xE804).unwrap();
    assert!(timing.is_smpte());
    assert_eq!(timing.ticks_per_quarter_note(), None);
    let Timing::Smpte(smpte) = timing else {
        panic!("expected smpte timing");
    };
    assert_eq!(smpte.frames_per_second(), 24);
    assert_eq!(smpte.ticks_per_frame(), 4);
    assert_eq!(smpte.ticks_per_second(), 96);
}
