#![doc = r#"
Real-time playback of a MIDI file onto note outputs.

[`PlaybackEngine::play`] validates the header, then walks the tracks in file
order. For every event it computes the delay from the event's delta time,
blocks on the [`Clock`] for that long, and only then applies the event:
a tempo change, a note on or off, or nothing.

Tracks are played one after another, never interleaved. A track that cannot
be decoded is skipped or cut short and playback moves on to the next one.
Only an unusable header aborts the file, and it does so before any output
is touched.

```text
Idle --header ok--> HeaderValidated --> PlayingTrack(0) --> .. --> PlayingTrack(n-1) --> Done
  \--header bad--> Aborted
```
"#]

mod clock;
pub use clock::*;

mod error;
pub use error::*;

mod outputs;
pub use outputs::*;

mod report;
pub use report::*;

use alloc::vec::Vec;

use crate::{
    UMicros,
    file::{EventKind, Header, MetaEvent, MetaType, MidiFile, Tempo, TrackChunk, TrackEvent},
    message::ChannelMessage,
    platform::{Clock, OutputPin},
};

/// Settings applied to every file an engine plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerConfig {
    /// Tempo in effect until the file sets one
    pub default_tempo: Tempo,
    /// Minimum time between the call to `play` and the first event.
    /// Time spent validating the file counts towards it.
    pub lead_in: UMicros,
    /// Release outputs still active once the last track ends
    pub release_on_finish: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_tempo: Tempo::default(),
            lead_in: UMicros::ZERO,
            release_on_finish: true,
        }
    }
}

/// Where the engine is in playing the current file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing played yet
    #[default]
    Idle,
    /// The header was accepted; no track has started
    HeaderValidated,
    /// Playing the track with this zero-based index
    PlayingTrack(u16),
    /// Every declared track has been handled
    Done,
    /// The header was rejected; nothing was played
    Aborted,
}

#[doc = r#"
Plays MIDI files on a set of note outputs, blocking on a clock between events.

The engine owns the clock and the outputs for as long as it lives. It keeps
no state between files besides [`PlaybackEngine::state`]: tempo starts over
from [`PlayerConfig::default_tempo`] on every call.
"#]
#[derive(Debug)]
pub struct PlaybackEngine<C, P> {
    clock: C,
    outputs: NoteOutputMap<P>,
    config: PlayerConfig,
    state: PlaybackState,
}

impl<C: Clock, P: OutputPin> PlaybackEngine<C, P> {
    /// Create an idle engine
    pub fn new(clock: C, outputs: NoteOutputMap<P>, config: PlayerConfig) -> Self {
        Self {
            clock,
            outputs,
            config,
            state: PlaybackState::Idle,
        }
    }

    /// Plays `bytes` to the end.
    ///
    /// # Errors
    /// If the header is invalid or its time division unusable. Errors
    /// inside tracks are logged and do not fail the call.
    pub fn play(&mut self, bytes: &[u8]) -> PlaybackResult<()> {
        self.run(bytes, self.config.default_tempo, |_| {}).map(|_| ())
    }

    /// Plays `bytes` to the end and reports what happened to each track
    pub fn play_with_report(&mut self, bytes: &[u8]) -> PlaybackResult<PlaybackReport> {
        self.play_at_tempo(bytes, self.config.default_tempo)
    }

    /// Like [`PlaybackEngine::play_with_report`], starting from `tempo`
    /// instead of the configured default
    pub fn play_at_tempo(&mut self, bytes: &[u8], tempo: Tempo) -> PlaybackResult<PlaybackReport> {
        let mut tracks = Vec::new();
        let (header, elapsed) = self.run(bytes, tempo, |outcome| tracks.push(outcome))?;
        Ok(PlaybackReport {
            header,
            tracks,
            elapsed,
        })
    }

    /// Plays the whole file, handing each track's outcome to `record`.
    /// At most one outcome per chunk present in `bytes`, plus one for any
    /// declared tracks that are not there.
    fn run(
        &mut self,
        bytes: &[u8],
        tempo: Tempo,
        mut record: impl FnMut(TrackOutcome),
    ) -> PlaybackResult<(Header, UMicros)> {
        self.state = PlaybackState::Idle;
        let started = self.clock.now();

        let file = MidiFile::parse(bytes).inspect_err(|e| {
            self.state = PlaybackState::Aborted;
            tracing::warn!("Not a valid MIDI file: {e}");
        })?;
        let header = *file.header();
        let timing = header.timing().inspect_err(|e| {
            self.state = PlaybackState::Aborted;
            tracing::warn!("Unusable time division {:#06X}: {e}", header.time_division());
        })?;
        self.state = PlaybackState::HeaderValidated;
        tracing::info!(
            "MIDI format: {}, Tracks: {}, Time Division: {}",
            header.format_type(),
            header.track_count(),
            header.time_division()
        );

        let mut tempo = TempoClock::new(timing, tempo);

        let remaining = self
            .config
            .lead_in
            .saturating_sub(self.clock.now().saturating_sub(started));
        if !remaining.is_zero() {
            tracing::info!("Waiting {remaining} before starting playback");
            self.clock.sleep(remaining);
        }

        for (index, chunk) in file.tracks().enumerate() {
            let index = index as u16;
            self.state = PlaybackState::PlayingTrack(index);
            match chunk {
                Ok(chunk) => record(self.play_track(&chunk, header.track_count(), &mut tempo)),
                // nothing past this point can be located
                Err(error) if error.is_out_of_bounds() => {
                    let count = header.track_count() - index;
                    tracing::warn!(
                        "Tracks {} to {} are missing or truncated: {error}",
                        index + 1,
                        header.track_count()
                    );
                    record(TrackOutcome::Missing { count, error });
                    break;
                }
                Err(error) => {
                    tracing::warn!("Track {} is not valid: {error}", index + 1);
                    record(TrackOutcome::Skipped(error));
                }
            }
        }

        if self.config.release_on_finish {
            let released = self.outputs.release_all();
            if released > 0 {
                tracing::debug!("Released {released} outputs left active");
            }
        }
        self.state = PlaybackState::Done;

        let elapsed = self.clock.now().saturating_sub(started);
        tracing::info!("Total MIDI processing time: {elapsed}");
        Ok((header, elapsed))
    }

    fn play_track(
        &mut self,
        chunk: &TrackChunk<'_>,
        track_count: u16,
        tempo: &mut TempoClock,
    ) -> TrackOutcome {
        let number = chunk.index() + 1;
        let track_start = self.clock.now();
        tracing::info!(
            "Processing track {number} of {track_count}, length: {} bytes",
            chunk.len()
        );

        let mut events = 0;
        let mut notes = 0;
        for event in chunk.events() {
            let event = match event {
                Ok(event) => event,
                Err(error) => {
                    tracing::warn!("Track {number} stopped after {events} events: {error}");
                    return TrackOutcome::Truncated { events, error };
                }
            };

            let delay = tempo.delay_for(event.delta_ticks());
            if !delay.is_zero() {
                self.clock.sleep(delay);
            }
            events += 1;
            if self.dispatch(&event, tempo) {
                notes += 1;
            }
        }

        let took = self.clock.now().saturating_sub(track_start);
        tracing::info!("Track {number} processed in {took}");
        TrackOutcome::Completed { events, notes }
    }

    /// Applies the side effect of one event. True if a mapped output was switched.
    fn dispatch(&mut self, event: &TrackEvent, tempo: &mut TempoClock) -> bool {
        match event.kind() {
            EventKind::Meta(MetaEvent::Tempo(next)) => {
                tempo.set_tempo(*next);
                tracing::info!("Tempo changed to {:.2} BPM", next.bpm());
                false
            }
            EventKind::Meta(meta @ MetaEvent::Other { len, .. })
                if meta.meta_type() == Some(MetaType::Tempo) =>
            {
                tracing::warn!("Ignoring Set Tempo with a {len} byte payload");
                false
            }
            EventKind::Channel(channel) => match channel.message() {
                ChannelMessage::NoteOn { note, .. } => self.outputs.note_on(*note),
                ChannelMessage::NoteOff { note, .. } => self.outputs.note_off(*note),
                ChannelMessage::Other { .. } => false,
            },
            EventKind::Meta(_) | EventKind::SysEx { .. } | EventKind::System { .. } => false,
        }
    }
}

impl<C, P> PlaybackEngine<C, P> {
    /// Where the engine is in the current or last file
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// The engine's settings
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Change the engine's settings for the next file
    pub fn config_mut(&mut self) -> &mut PlayerConfig {
        &mut self.config
    }

    /// The clock the engine blocks on
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the clock, e.g. to wait between files
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// The note outputs
    pub fn outputs(&self) -> &NoteOutputMap<P> {
        &self.outputs
    }

    /// Gives back the clock and outputs
    pub fn into_parts(self) -> (C, NoteOutputMap<P>) {
        (self.clock, self.outputs)
    }
}
