/// Microseconds per quarter note assumed until a Set Tempo event arrives (120 BPM)
pub const DEFAULT_TEMPO: u32 = 500_000;

#[doc = r#"
The payload of a Set Tempo (`FF 51 03 tt tt tt`) meta event: microseconds per quarter note.

# Example
```rust
# use midinoid::prelude::*;
let tempo = Tempo::new_from_bytes(&[0x07, 0xA1, 0x20]).unwrap();
assert_eq!(tempo.micros_per_quarter_note(), 500_000);
assert_eq!(tempo.bpm(), 120.);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Default for Tempo {
    fn default() -> Self {
        Self(DEFAULT_TEMPO)
    }
}

impl Tempo {
    /// Create a tempo from microseconds per quarter note
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self(micros_per_quarter_note)
    }

    /// Create a tempo from beats per minute, rounded to whole microseconds
    pub fn from_bpm(bpm: f64) -> Self {
        // `f64::round` needs std; the quotient is never negative for a positive bpm
        Self((60_000_000. / bpm + 0.5) as u32)
    }

    /// Reads a big-endian 24-bit tempo. Returns `None` unless `bytes` is exactly 3 long.
    pub const fn new_from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [a, b, c] => Some(Self(u32::from_be_bytes([0, *a, *b, *c]))),
            _ => None,
        }
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Quarter notes per minute. Infinite for a zero tempo.
    pub fn bpm(&self) -> f64 {
        60_000_000. / self.0 as f64
    }
}

#[test]
fn tempo_payload_must_be_three_bytes() {
    use pretty_assertions::assert_eq;
    assert_eq!(Tempo::new_from_bytes(&[0x0F, 0x42, 0x40]), Some(Tempo::new(1_000_000)));
    assert_eq!(Tempo::new_from_bytes(&[0x0F, 0x42]), None);
    assert_eq!(Tempo::new_from_bytes(&[0x00, 0x0F, 0x42, 0x40]), None);
    assert_eq!(Tempo::from_bpm(60.), Tempo::new(1_000_000));
    // 857_142.86 rounds up
    assert_eq!(Tempo::from_bpm(70.), Tempo::new(857_143));
}
