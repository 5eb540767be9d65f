use alloc::vec::Vec;

use crate::{UMicros, file::Header, reader::ReaderError};

/// What happened to one declared track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// Every event was played
    Completed {
        /// Events decoded and dispatched
        events: u32,
        /// Note on/off events that reached a mapped output
        notes: u32,
    },
    /// The chunk did not start with `MTrk` and was not played
    Skipped(ReaderError),
    /// Playback stopped partway through the track
    Truncated {
        /// Events dispatched before the error
        events: u32,
        /// Why decoding stopped
        error: ReaderError,
    },
    /// The file ended before this and the following declared tracks.
    /// Always the last outcome of a report.
    Missing {
        /// Declared tracks that could not be located, this one included
        count: u16,
        /// Where the file ran out
        error: ReaderError,
    },
}

impl TrackOutcome {
    /// True if every event of the track was played
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// The error that stopped or skipped the track, if any
    pub const fn error(&self) -> Option<&ReaderError> {
        match self {
            Self::Completed { .. } => None,
            Self::Skipped(error) | Self::Truncated { error, .. } | Self::Missing { error, .. } => {
                Some(error)
            }
        }
    }
}

#[doc = r#"
A summary of one file's playback.

One entry per track chunk found in the file, in file order. Declared tracks
the file does not hold share a single [`TrackOutcome::Missing`] entry, so
the report never grows with the header's track count alone.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackReport {
    pub(crate) header: Header,
    pub(crate) tracks: Vec<TrackOutcome>,
    pub(crate) elapsed: UMicros,
}

impl PlaybackReport {
    /// The file's header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Outcomes in track order
    pub fn tracks(&self) -> &[TrackOutcome] {
        &self.tracks
    }

    /// Wall time from the start of the call to the end of the last track
    pub fn elapsed(&self) -> UMicros {
        self.elapsed
    }

    /// True if every track completed
    pub fn is_clean(&self) -> bool {
        self.tracks.iter().all(TrackOutcome::is_completed)
    }
}
