use std::{path::PathBuf, process::ExitCode};

use midinoid::{
    jukebox::{FsLibrary, JukeboxError, ThreadDice},
    prelude::*,
};
use tracing_subscriber::EnvFilter;

/// One solenoid per note
const NOTES: [u8; 4] = [60, 61, 62, 63];

/// Time from opening a file to its first event
const LEAD_IN: UMicros = UMicros::from_secs(3);

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: midinoid <file.mid | directory>");
        return ExitCode::FAILURE;
    };

    let outputs = match NoteOutputMap::new(
        NOTES.map(|note| (note, ConsolePin::new(format!("noid {note}")))),
    ) {
        Ok(outputs) => outputs,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let config = PlayerConfig {
        lead_in: LEAD_IN,
        ..Default::default()
    };
    let mut engine = PlaybackEngine::new(StdClock::new(), outputs, config);

    if path.is_dir() {
        let mut jukebox = Jukebox::new(
            FsLibrary::new(path),
            Random::new(ThreadDice::default()),
            ThreadDice::default(),
            JukeboxConfig::default(),
        );
        loop {
            match jukebox.play_next(&mut engine) {
                Ok(_) => {}
                // emptied since it was listed
                Err(e @ JukeboxError::EmptyDirectory(_)) => tracing::warn!("{e}"),
                Err(e) => {
                    tracing::error!("{e}");
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("MIDI file not found at {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("MIDI file size: {} bytes", bytes.len());
    match engine.play(&bytes) {
        Ok(()) => {
            tracing::info!("Finished playing MIDI file.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
