#![doc = r#"
Chooses what to play next and keeps playing no matter what the files hold.

The jukebox sits outside the playback core. It picks a directory and a file
from a [`Library`] with a [`SelectionStrategy`], looks up the directory's
[`DirectoryProfile`], and hands the bytes to a [`PlaybackEngine`]. A file that
fails to play is logged and the jukebox carries on.

A profile can set the tempo a file starts at, and a chance of resting for a
while after the file ends.
"#]

mod library;
pub use library::*;

mod select;
pub use select::*;

use alloc::{collections::BTreeMap, string::String};
use thiserror::Error;

use crate::{
    UMicros,
    file::Tempo,
    platform::{Clock, OutputPin},
    playback::{PlaybackEngine, PlaybackReport, PlaybackResult},
};

/// How files in one directory are played
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectoryProfile {
    /// Tempo each file starts at. `None` uses the engine's default.
    pub initial_tempo: Option<Tempo>,
    /// Chance, from 0 to 1, of resting after a file
    pub silence_probability: f32,
    /// How long to rest
    pub silence: UMicros,
}

/// Per-directory profiles
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JukeboxConfig {
    /// Profiles by directory identifier
    pub directories: BTreeMap<String, DirectoryProfile>,
    /// Profile for directories without one
    pub fallback: DirectoryProfile,
}

impl JukeboxConfig {
    /// The profile that applies to `directory`
    pub fn profile(&self, directory: &str) -> &DirectoryProfile {
        self.directories.get(directory).unwrap_or(&self.fallback)
    }

    /// Sets the profile for `directory`
    pub fn with_directory(mut self, directory: impl Into<String>, profile: DirectoryProfile) -> Self {
        self.directories.insert(directory.into(), profile);
        self
    }
}

/// Errors that stop the jukebox from finding anything to play
#[derive(Debug, Error)]
pub enum JukeboxError<E> {
    /// The library could not be listed or read
    #[error("Library: {0}")]
    Library(E),
    /// The library holds no directories
    #[error("Library has no directories")]
    NoDirectories,
    /// The chosen directory holds no files
    #[error("Directory {0:?} has no MIDI files")]
    EmptyDirectory(String),
}

/// A file chosen from the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Directory identifier
    pub directory: String,
    /// File name within the directory
    pub file: String,
}

/// The outcome of one [`Jukebox::play_next`]
#[derive(Debug, Clone, PartialEq)]
pub struct Played {
    /// What was played
    pub selection: Selection,
    /// The engine's result. Failures have already been logged.
    pub result: PlaybackResult<PlaybackReport>,
    /// The rest taken afterwards, if any
    pub silence: Option<UMicros>,
}

#[doc = r#"
Plays files from a [`Library`] one after another.
"#]
#[derive(Debug)]
pub struct Jukebox<L, S, D> {
    library: L,
    directories: S,
    /// A fresh file picker for directories not seen yet
    template: S,
    files: BTreeMap<String, S>,
    dice: D,
    config: JukeboxConfig,
}

impl<L: Library, S: SelectionStrategy + Clone, D: Dice> Jukebox<L, S, D> {
    /// Create a jukebox. Directories, and the files of each directory, are
    /// picked by separate copies of `strategy`; `dice` decides the silences.
    pub fn new(library: L, strategy: S, dice: D, config: JukeboxConfig) -> Self {
        Self {
            library,
            directories: strategy.clone(),
            template: strategy,
            files: BTreeMap::new(),
            dice,
            config,
        }
    }

    /// The library
    pub fn library(&self) -> &L {
        &self.library
    }

    /// The directory profiles
    pub fn config(&self) -> &JukeboxConfig {
        &self.config
    }

    /// Chooses a directory, then a file within it
    pub fn select(&mut self) -> Result<Selection, JukeboxError<L::Error>> {
        let mut directories = self.library.directories().map_err(JukeboxError::Library)?;
        let index = self
            .directories
            .pick(directories.len())
            .ok_or(JukeboxError::NoDirectories)?;
        let directory = directories.swap_remove(index);

        let mut files = self
            .library
            .files(&directory)
            .map_err(JukeboxError::Library)?;
        let picker = self
            .files
            .entry(directory.clone())
            .or_insert_with(|| self.template.clone());
        let Some(index) = picker.pick(files.len()) else {
            return Err(JukeboxError::EmptyDirectory(directory));
        };
        let file = files.swap_remove(index);
        Ok(Selection { directory, file })
    }

    /// Selects a file and plays it on `engine`, then maybe rests.
    ///
    /// # Errors
    /// Only when nothing could be selected or read. A file that fails to
    /// play is reported in [`Played::result`].
    pub fn play_next<C, P>(
        &mut self,
        engine: &mut PlaybackEngine<C, P>,
    ) -> Result<Played, JukeboxError<L::Error>>
    where
        C: Clock,
        P: OutputPin,
    {
        let selection = self.select()?;
        let bytes = self
            .library
            .read(&selection.directory, &selection.file)
            .map_err(JukeboxError::Library)?;
        let profile = *self.config.profile(&selection.directory);

        tracing::info!(
            "Starting to play {}/{}",
            selection.directory,
            selection.file
        );
        let tempo = profile
            .initial_tempo
            .unwrap_or(engine.config().default_tempo);
        let result = engine.play_at_tempo(&bytes, tempo);
        match &result {
            Ok(report) if !report.is_clean() => {
                tracing::warn!("Finished {} with damaged tracks", selection.file)
            }
            Ok(_) => tracing::info!("Finished playing {}", selection.file),
            Err(e) => tracing::warn!("Error playing {}: {e}", selection.file),
        }

        let silence = self.dice.chance(profile.silence_probability).then(|| {
            tracing::info!("Resting for {}", profile.silence);
            engine.clock_mut().sleep(profile.silence);
            profile.silence
        });

        Ok(Played {
            selection,
            result,
            silence,
        })
    }
}
