use core::fmt;

#[doc = r#"
A MIDI note number.

Notes are interpreted as a 7-bit number. Note `0` is `C-1`, note `60` is
middle C (`C4`) and note `127` is `G9`.

# Example
```rust
# use midinoid::prelude::*;
let note = Note::from_databyte(63).unwrap(); // 63 is between 0-127

assert_eq!(note.key(), Key::DSharp);
assert_eq!(note.octave(), 4);
assert!(Note::from_databyte(200).is_none());
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note(u8);

impl Note {
    /// Middle C
    pub const MIDDLE_C: Note = Note(60);

    /// Create a new note.
    ///
    /// Checks for correctness (leading 0 bit).
    pub const fn from_databyte(byte: u8) -> Option<Self> {
        if byte > 127 {
            return None;
        }
        Some(Self(byte))
    }

    /// Wraps a raw byte read out of a track without checking the leading bit.
    ///
    /// A byte above 127 never equals a note built with [`Note::from_databyte`].
    pub const fn from_databyte_unchecked(byte: u8) -> Self {
        Self(byte)
    }

    /// Identifies the key of the note
    #[inline]
    pub const fn key(&self) -> Key {
        Key::from_semitone(self.0 % 12)
    }

    /// Identifies the octave of the note, from -1 to 9
    #[inline]
    pub const fn octave(&self) -> i8 {
        (self.0 / 12) as i8 - 1
    }

    /// Returns the underlying byte of the note
    pub const fn byte(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} ({})", self.key(), self.octave(), self.0)
    }
}

#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[doc = r#"
The pitch class of a [`Note`]
"#]
pub enum Key {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl Key {
    const fn from_semitone(semitone: u8) -> Self {
        use Key::*;
        match semitone {
            0 => C,
            1 => CSharp,
            2 => D,
            3 => DSharp,
            4 => E,
            5 => F,
            6 => FSharp,
            7 => G,
            8 => GSharp,
            9 => A,
            10 => ASharp,
            _ => B,
        }
    }

    /// Returns true if the key is a black key
    #[inline]
    pub const fn is_sharp(&self) -> bool {
        use Key::*;
        matches!(self, CSharp | DSharp | FSharp | GSharp | ASharp)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Key::*;
        match self {
            C => write!(f, "C"),
            CSharp => write!(f, "C#"),
            D => write!(f, "D"),
            DSharp => write!(f, "D#"),
            E => write!(f, "E"),
            F => write!(f, "F"),
            FSharp => write!(f, "F#"),
            G => write!(f, "G"),
            GSharp => write!(f, "G#"),
            A => write!(f, "A"),
            ASharp => write!(f, "A#"),
            B => write!(f, "B"),
        }
    }
}

#[test]
fn test_note() {
    let c = Note::from_databyte(12).unwrap();
    assert_eq!(Key::C, c.key());
    assert_eq!(0, c.octave());

    let a_sharp = Note::from_databyte(94).unwrap();
    assert_eq!(Key::ASharp, a_sharp.key());
    assert_eq!(6, a_sharp.octave());
}

#[test]
fn display_note() {
    use alloc::string::ToString;
    assert_eq!(Note::MIDDLE_C.to_string(), "C4 (60)");
    assert_eq!(Note::from_databyte(0).unwrap().to_string(), "C-1 (0)");
}
