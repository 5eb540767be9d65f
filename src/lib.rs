#![doc = r#"
Play Standard MIDI Files on solenoid actuators.

`midinoid` decodes a Standard MIDI File one event at a time and drives a
fixed set of digital outputs, one per monitored note number, blocking on a
monotonic clock between events so the actuators strike in real time.

# Layout

- [`reader`]: a bounds-checked byte cursor and the variable-length quantity decoder
- [`file`]: header validation, track chunks, timing and the streaming track event parser
- [`playback`]: the tempo clock, the note-to-output map and the playback engine
- [`platform`]: the clock and output-pin traits the engine drives
- [`jukebox`]: picks files out of a library and hands them to the engine

# Example
```rust
# use midinoid::prelude::*;
# struct Pin;
# impl OutputPin for Pin {
#     fn set_active(&mut self) {}
#     fn set_inactive(&mut self) {}
# }
# struct NoSleep;
# impl Clock for NoSleep {
#     fn now(&self) -> UMicros { UMicros::ZERO }
#     fn sleep(&mut self, _: UMicros) {}
# }
let outputs = NoteOutputMap::new([(60, Pin), (61, Pin), (62, Pin), (63, Pin)]).unwrap();
let mut engine = PlaybackEngine::new(NoSleep, outputs, PlayerConfig::default());

let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0,
    b'M', b'T', b'r', b'k', 0, 0, 0, 13,
    0x00, 0x90, 60, 100,
    0x83, 0x60, 0x80, 60, 0,
    0x00, 0xFF, 0x2F, 0x00,
];
engine.play(&bytes[..]).unwrap();
assert_eq!(engine.state(), PlaybackState::Done);
```

# Features

- `std` (default): std clock, filesystem library, console pins and the `midinoid` binary
- `serde`: (de)serialize configuration types
"#]
#![warn(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod error;
pub use error::*;

pub mod file;
pub mod jukebox;
pub mod message;
pub mod platform;
pub mod playback;
pub mod reader;

mod micros;
pub use micros::*;

mod note;
pub use note::*;

#[doc = r#"
Common re-exports when working with `midinoid`
"#]
pub mod prelude {
    pub use crate::{
        ChunkError, HeaderError, Key, Note, ParseError, TimingError, UMicros,
        file::*,
        jukebox::{
            Dice, DirectoryProfile, Jukebox, JukeboxConfig, Library, MemoryLibrary, Random,
            RoundRobin, SelectionStrategy,
        },
        message::*,
        platform::*,
        playback::*,
        reader::{ReadResult, Reader, ReaderError, ReaderErrorKind, decode_vlq},
    };
}
