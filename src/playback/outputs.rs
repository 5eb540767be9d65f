use alloc::vec::Vec;
use thiserror::Error;

use crate::{Note, platform::OutputPin};

/// Errors building a [`NoteOutputMap`]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// A note number above 127
    #[error("Note number {0} is not a 7-bit MIDI note")]
    InvalidNote(u8),
    /// The same note was mapped to two outputs
    #[error("Note number {0} is mapped more than once")]
    DuplicateNote(u8),
}

#[derive(Debug)]
struct NoteOutput<P> {
    note: Note,
    pin: P,
    active: bool,
}

#[doc = r#"
A fixed mapping from MIDI note numbers to the outputs that sound them.

Lookups are a linear scan: an instrument has a handful of actuators. Notes
without an output are ignored.

# Example
```rust
# use midinoid::prelude::*;
#[derive(Default)]
struct Led(bool);
impl OutputPin for Led {
    fn set_active(&mut self) { self.0 = true }
    fn set_inactive(&mut self) { self.0 = false }
}

let mut map = NoteOutputMap::new([(60, Led::default()), (62, Led::default())]).unwrap();
assert!(map.note_on(Note::MIDDLE_C));
assert!(!map.note_on(Note::from_databyte(61).unwrap()));
assert!(map.is_active(Note::MIDDLE_C));
assert_eq!(map.release_all(), 1);
```
"#]
#[derive(Debug)]
pub struct NoteOutputMap<P> {
    outputs: Vec<NoteOutput<P>>,
}

impl<P: OutputPin> NoteOutputMap<P> {
    /// Maps each note number to its pin, in order.
    ///
    /// Pins are assumed to start inactive.
    pub fn new<I>(mapping: I) -> Result<Self, MapError>
    where
        I: IntoIterator<Item = (u8, P)>,
    {
        let mut outputs: Vec<NoteOutput<P>> = Vec::new();
        for (number, pin) in mapping {
            let note = Note::from_databyte(number).ok_or(MapError::InvalidNote(number))?;
            if outputs.iter().any(|o| o.note == note) {
                return Err(MapError::DuplicateNote(number));
            }
            outputs.push(NoteOutput {
                note,
                pin,
                active: false,
            });
        }
        Ok(Self { outputs })
    }

    fn find(&mut self, note: Note) -> Option<&mut NoteOutput<P>> {
        self.outputs.iter_mut().find(|o| o.note == note)
    }

    /// Energizes the output for `note`. Returns false if no output is mapped to it.
    pub fn note_on(&mut self, note: Note) -> bool {
        let Some(output) = self.find(note) else {
            return false;
        };
        output.pin.set_active();
        output.active = true;
        tracing::debug!("Note On: {note}");
        true
    }

    /// Releases the output for `note`. Returns false if no output is mapped to it.
    pub fn note_off(&mut self, note: Note) -> bool {
        let Some(output) = self.find(note) else {
            return false;
        };
        output.pin.set_inactive();
        output.active = false;
        tracing::debug!("Note Off: {note}");
        true
    }

    /// Releases every output still active. Returns how many were released.
    pub fn release_all(&mut self) -> usize {
        let mut released = 0;
        for output in self.outputs.iter_mut().filter(|o| o.active) {
            output.pin.set_inactive();
            output.active = false;
            released += 1;
            tracing::debug!("Released {}", output.note);
        }
        released
    }
}

impl<P> NoteOutputMap<P> {
    /// The mapped notes, in output order
    pub fn notes(&self) -> impl Iterator<Item = Note> + '_ {
        self.outputs.iter().map(|o| o.note)
    }

    /// True if `note` is mapped and currently active
    pub fn is_active(&self, note: Note) -> bool {
        self.outputs.iter().any(|o| o.note == note && o.active)
    }

    /// Number of outputs
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// True if no outputs are mapped
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// The pins, in output order
    pub fn pins(&self) -> impl Iterator<Item = &P> + '_ {
        self.outputs.iter().map(|o| &o.pin)
    }

    /// Gives the pins back, in output order
    pub fn into_pins(self) -> Vec<P> {
        self.outputs.into_iter().map(|o| o.pin).collect()
    }
}

#[cfg(test)]
#[derive(Debug, Default, PartialEq)]
struct CountingPin {
    on: u32,
    off: u32,
}

#[cfg(test)]
impl OutputPin for CountingPin {
    fn set_active(&mut self) {
        self.on += 1;
    }
    fn set_inactive(&mut self) {
        self.off += 1;
    }
}

#[test]
fn rejects_bad_mappings() {
    use pretty_assertions::assert_eq;
    let err = NoteOutputMap::new([(60, CountingPin::default()), (60, CountingPin::default())])
        .unwrap_err();
    assert_eq!(err, MapError::DuplicateNote(60));

    let err = NoteOutputMap::new([(128, CountingPin::default())]).unwrap_err();
    assert_eq!(err, MapError::InvalidNote(128));
}

#[test]
fn unmapped_notes_touch_nothing() {
    use pretty_assertions::assert_eq;
    let mut map = NoteOutputMap::new((60..64).map(|n| (n, CountingPin::default()))).unwrap();
    assert_eq!(map.len(), 4);
    assert!(!map.note_on(Note::from_databyte(59).unwrap()));
    assert!(!map.note_off(Note::from_databyte_unchecked(188)));
    assert!(map.pins().all(|p| *p == CountingPin::default()));

    assert!(map.note_on(Note::from_databyte(62).unwrap()));
    assert!(map.note_off(Note::from_databyte(62).unwrap()));
    let pins = map.into_pins();
    assert_eq!(pins[2], CountingPin { on: 1, off: 1 });
    assert_eq!(pins[0], CountingPin::default());
}

#[test]
fn release_only_touches_active_outputs() {
    use pretty_assertions::assert_eq;
    let mut map = NoteOutputMap::new((60..64).map(|n| (n, CountingPin::default()))).unwrap();
    map.note_on(Note::from_databyte(61).unwrap());
    map.note_on(Note::from_databyte(63).unwrap());
    map.note_off(Note::from_databyte(63).unwrap());

    assert_eq!(map.release_all(), 1);
    assert_eq!(map.release_all(), 0);
    let pins = map.into_pins();
    assert_eq!(pins[1], CountingPin { on: 1, off: 1 });
    assert_eq!(pins[3], CountingPin { on: 1, off: 1 });
    assert_eq!(pins[0], CountingPin::default());
}
