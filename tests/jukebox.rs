mod common;

use common::{Action::*, TrackBuilder, engine, smf_tracks, take};
use midinoid::{
    jukebox::{JukeboxError, Loaded, Selection},
    prelude::*,
};
use pretty_assertions::assert_eq;

fn one_beat(note: u8) -> Vec<u8> {
    let track = TrackBuilder::new()
        .note_on(0, note, 100)
        .note_off(480, note, 0)
        .end(0);
    smf_tracks(0x01E0, &[track])
}

fn selection(directory: &str, file: &str) -> Selection {
    Selection {
        directory: directory.into(),
        file: file.into(),
    }
}

#[test]
fn keeps_playing_past_broken_files() {
    let (mut engine, log) = engine(PlayerConfig::default());
    let mut library = MemoryLibrary::new();
    library
        .insert("songs", "a_broken.mid", b"RIFF....".to_vec())
        .insert("songs", "b_good.mid", one_beat(60));
    let mut jukebox = Jukebox::new(
        library,
        RoundRobin::default(),
        Loaded::new([0.5]),
        JukeboxConfig::default(),
    );

    let first = jukebox.play_next(&mut engine).unwrap();
    assert_eq!(first.selection, selection("songs", "a_broken.mid"));
    assert!(matches!(first.result, Err(PlaybackError::Format(_))));
    assert!(take(&log).is_empty());

    let second = jukebox.play_next(&mut engine).unwrap();
    assert_eq!(second.selection, selection("songs", "b_good.mid"));
    assert!(second.result.unwrap().is_clean());
    assert_eq!(take(&log), [On(60), Sleep(500_000), Off(60)]);

    // back to the start
    let third = jukebox.play_next(&mut engine).unwrap();
    assert_eq!(third.selection.file, "a_broken.mid");
}

#[test]
fn round_robin_visits_every_file_of_every_directory() {
    let (mut engine, _log) = engine(PlayerConfig::default());
    let mut library = MemoryLibrary::new();
    library
        .insert("bach", "one.mid", one_beat(60))
        .insert("satie", "one.mid", one_beat(61))
        .insert("satie", "two.mid", one_beat(62));
    let mut jukebox = Jukebox::new(
        library,
        RoundRobin::default(),
        Loaded::new([0.9]),
        JukeboxConfig::default(),
    );

    let played: Vec<_> = (0..6)
        .map(|_| jukebox.play_next(&mut engine).unwrap().selection)
        .collect();
    assert_eq!(
        played,
        [
            selection("bach", "one.mid"),
            selection("satie", "one.mid"),
            selection("bach", "one.mid"),
            selection("satie", "two.mid"),
            selection("bach", "one.mid"),
            selection("satie", "one.mid"),
        ]
    );
}

#[test]
fn profile_sets_tempo_and_silence() {
    let (mut engine, log) = engine(PlayerConfig::default());
    let mut library = MemoryLibrary::new();
    library.insert("fast", "song.mid", one_beat(63));
    let config = JukeboxConfig::default().with_directory(
        "fast",
        DirectoryProfile {
            initial_tempo: Some(Tempo::new(250_000)),
            silence_probability: 0.5,
            silence: UMicros::from_secs(10),
        },
    );
    let mut jukebox = Jukebox::new(
        library,
        RoundRobin::default(),
        Loaded::new([0.25, 0.75]),
        config,
    );

    let rested = jukebox.play_next(&mut engine).unwrap();
    assert_eq!(rested.silence, Some(UMicros::from_secs(10)));
    assert_eq!(
        take(&log),
        [On(63), Sleep(250_000), Off(63), Sleep(10_000_000)]
    );

    let straight_on = jukebox.play_next(&mut engine).unwrap();
    assert_eq!(straight_on.silence, None);
    assert_eq!(take(&log), [On(63), Sleep(250_000), Off(63)]);

    // the engine's own default is untouched
    assert_eq!(engine.config().default_tempo, Tempo::default());
}

#[test]
fn fallback_profile_never_rests() {
    let (mut engine, log) = engine(PlayerConfig::default());
    let mut library = MemoryLibrary::new();
    library.insert("misc", "song.mid", one_beat(60));
    let mut jukebox = Jukebox::new(
        library,
        Random::new(Loaded::new([0.0])),
        Loaded::new([0.0]),
        JukeboxConfig::default(),
    );

    let played = jukebox.play_next(&mut engine).unwrap();

    assert_eq!(played.silence, None);
    assert_eq!(take(&log), [On(60), Sleep(500_000), Off(60)]);
}

#[test]
fn empty_library_is_an_error() {
    let (mut engine, _log) = engine(PlayerConfig::default());
    let mut jukebox = Jukebox::new(
        MemoryLibrary::new(),
        RoundRobin::default(),
        Loaded::new([0.0]),
        JukeboxConfig::default(),
    );

    assert!(matches!(
        jukebox.play_next(&mut engine),
        Err(JukeboxError::NoDirectories)
    ));
}

#[test]
fn folders_without_midi_files_are_never_chosen() {
    use midinoid::jukebox::FsLibrary;
    use std::fs;

    let root = std::env::temp_dir().join(format!("midinoid-jukebox-{}", std::process::id()));
    let _ = fs::remove_dir_all(&root);
    fs::create_dir_all(root.join("a_empty")).unwrap();
    fs::create_dir_all(root.join("songs")).unwrap();
    fs::write(root.join("songs").join("x.mid"), one_beat(61)).unwrap();

    let (mut engine, log) = engine(PlayerConfig::default());
    let mut jukebox = Jukebox::new(
        FsLibrary::new(&root),
        RoundRobin::default(),
        Loaded::new([0.9]),
        JukeboxConfig::default(),
    );

    for _ in 0..2 {
        let played = jukebox.play_next(&mut engine).unwrap();
        assert_eq!(played.selection, selection("songs", "x.mid"));
    }
    assert_eq!(
        take(&log),
        [
            On(61),
            Sleep(500_000),
            Off(61),
            On(61),
            Sleep(500_000),
            Off(61)
        ]
    );

    fs::remove_dir_all(&root).unwrap();
}
