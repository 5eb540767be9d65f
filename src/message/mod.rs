#![doc = r#"
MIDI messages found inside track chunks
"#]

mod channel;
pub use channel::*;
