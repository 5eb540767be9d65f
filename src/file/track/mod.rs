mod events;
pub use events::*;

use crate::{file::MetaEvent, message::ChannelEvent};

#[doc = r#"
One event decoded from a track chunk.

Events are produced one at a time by [`TrackEvents`] and are not retained
once the player has acted on them.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackEvent {
    delta_ticks: u32,
    kind: EventKind,
}

impl TrackEvent {
    /// Create a new track event
    pub const fn new(delta_ticks: u32, kind: EventKind) -> Self {
        Self { delta_ticks, kind }
    }

    /// Ticks since the previous event in the same track
    pub const fn delta_ticks(&self) -> u32 {
        self.delta_ticks
    }

    /// What the event is
    pub const fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// True for End of Track
    pub const fn is_end_of_track(&self) -> bool {
        matches!(self.kind, EventKind::Meta(MetaEvent::EndOfTrack))
    }
}

/// The kinds of event a track can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// `FF`: meta event
    Meta(MetaEvent),
    /// `F0` or `F7`: system exclusive data, skipped
    SysEx {
        /// Number of bytes skipped
        len: u32,
    },
    /// A channel voice message
    Channel(ChannelEvent),
    /// A system common or realtime byte found inside a track, skipped
    System {
        /// The status byte
        status: u8,
    },
}
