use thiserror::Error;

use crate::{TimingError, reader::ReaderError};

/// Errors that abort a whole file before any output is touched.
///
/// Problems inside a track never surface here: they end that track only and
/// are recorded in the [`PlaybackReport`](super::PlaybackReport).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackError {
    /// The 14-byte header is missing, or its magic or length is wrong
    #[error("Not a valid MIDI file: {0}")]
    Format(#[from] ReaderError),
    /// The header's time division cannot be used
    #[error("Unusable time division: {0}")]
    Timing(#[from] TimingError),
}

/// The result type of [`PlaybackEngine::play`](super::PlaybackEngine::play)
pub type PlaybackResult<T> = Result<T, PlaybackError>;
