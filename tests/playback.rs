mod common;

use common::{Action::*, TrackBuilder, engine, smf, smf_tracks, take};
use midinoid::prelude::*;
use pretty_assertions::assert_eq;

const DIVISION_480: u16 = 0x01E0;

#[test]
fn plays_one_note_in_real_time() {
    let (mut engine, log) = engine(PlayerConfig::default());
    let track = TrackBuilder::new()
        .note_on(0, 60, 100)
        .note_off(480, 60, 0)
        .build();

    let report = engine
        .play_with_report(&smf_tracks(DIVISION_480, &[track]))
        .unwrap();

    assert_eq!(take(&log), [On(60), Sleep(500_000), Off(60)]);
    assert_eq!(engine.state(), PlaybackState::Done);
    assert_eq!(
        report.tracks(),
        [TrackOutcome::Completed {
            events: 2,
            notes: 2
        }]
    );
    assert!(report.is_clean());
    assert_eq!(report.elapsed(), UMicros::new(500_000));
}

#[test]
fn zero_velocity_note_on_releases() {
    let (mut engine, log) = engine(PlayerConfig::default());
    let with_note_off = TrackBuilder::new()
        .note_on(0, 61, 100)
        .note_off(240, 61, 64)
        .end(0);
    let with_note_on = TrackBuilder::new()
        .note_on(0, 61, 100)
        .note_on(240, 61, 0)
        .end(0);

    engine
        .play(&smf_tracks(DIVISION_480, &[with_note_off]))
        .unwrap();
    let expected = take(&log);
    engine
        .play(&smf_tracks(DIVISION_480, &[with_note_on]))
        .unwrap();

    assert_eq!(expected, [On(61), Sleep(250_000), Off(61)]);
    assert_eq!(take(&log), expected);
}

#[test]
fn tempo_change_applies_to_later_events() {
    let (mut engine, log) = engine(PlayerConfig::default());
    let track = TrackBuilder::new()
        .note_on(0, 60, 100)
        .tempo(480, 1_000_000)
        .note_off(480, 60, 0)
        .end(0);

    engine.play(&smf_tracks(DIVISION_480, &[track])).unwrap();

    // the tempo event itself still waits at the old tempo
    assert_eq!(
        take(&log),
        [On(60), Sleep(500_000), Sleep(1_000_000), Off(60)]
    );
}

#[test]
fn tempo_starts_over_for_each_file() {
    let (mut engine, log) = engine(PlayerConfig::default());
    let slow = TrackBuilder::new().tempo(0, 2_000_000).note_on(480, 62, 1).end(0);
    let plain = TrackBuilder::new().note_on(480, 62, 1).end(0);

    engine.play(&smf_tracks(DIVISION_480, &[slow])).unwrap();
    engine.play(&smf_tracks(DIVISION_480, &[plain])).unwrap();

    assert_eq!(
        take(&log),
        [
            Sleep(2_000_000),
            On(62),
            Off(62),
            Sleep(500_000),
            On(62),
            Off(62)
        ]
    );
}

#[test]
fn smpte_timing_ignores_tempo() {
    let (mut engine, log) = engine(PlayerConfig::default());
    let track = TrackBuilder::new()
        .note_on(0, 63, 100)
        .tempo(0, 1_000_000)
        .note_off(1000, 63, 0)
        .end(0);

    // 25 frames per second, 40 ticks per frame
    engine.play(&smf_tracks(0xE728, &[track])).unwrap();

    assert_eq!(take(&log), [On(63), Sleep(1_000_000), Off(63)]);
}

#[test]
fn running_status_drives_outputs() {
    let (mut engine, log) = engine(PlayerConfig::default());
    let track = TrackBuilder::new()
        .raw(0, &[0x90, 60, 100])
        .raw(0, &[61, 100])
        .raw(120, &[60, 0])
        .raw(0, &[61, 0])
        .end(0);

    engine.play(&smf_tracks(DIVISION_480, &[track])).unwrap();

    assert_eq!(
        take(&log),
        [On(60), On(61), Sleep(125_000), Off(60), Off(61)]
    );
}

#[test]
fn unmapped_notes_only_take_time() {
    let (mut engine, log) = engine(PlayerConfig::default());
    let track = TrackBuilder::new()
        .note_on(0, 72, 100)
        .note_off(480, 72, 0)
        .end(0);

    let report = engine
        .play_with_report(&smf_tracks(DIVISION_480, &[track]))
        .unwrap();

    assert_eq!(take(&log), [Sleep(500_000)]);
    assert_eq!(
        report.tracks(),
        [TrackOutcome::Completed {
            events: 3,
            notes: 0
        }]
    );
}

#[test]
fn corrupt_track_magic_skips_that_track() {
    let (mut engine, log) = engine(PlayerConfig::default());
    let note = |n| TrackBuilder::new().note_on(0, n, 1).note_off(0, n, 0).end(0);
    let bytes = smf(
        DIVISION_480,
        &[(b"MTrk", note(60)), (b"MTrX", note(61)), (b"MTrk", note(62))],
    );

    let report = engine.play_with_report(&bytes).unwrap();

    assert_eq!(take(&log), [On(60), Off(60), On(62), Off(62)]);
    assert_eq!(report.tracks().len(), 3);
    assert!(matches!(report.tracks()[1], TrackOutcome::Skipped(_)));
    assert_eq!(
        report.tracks()[1].error().unwrap().error_kind(),
        &ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::InvalidMagic(*b"MTrX")))
    );
    assert!(report.tracks()[2].is_completed());
    assert_eq!(engine.state(), PlaybackState::Done);
}

#[test]
fn truncated_track_moves_on_and_releases() {
    let (mut engine, log) = engine(PlayerConfig::default());
    // the second note on is missing its velocity
    let truncated = vec![0x00, 0x90, 60, 100, 0x00, 0x90, 61];
    let next = TrackBuilder::new()
        .note_on(0, 62, 100)
        .note_off(240, 62, 0)
        .end(0);

    let report = engine
        .play_with_report(&smf_tracks(DIVISION_480, &[truncated, next]))
        .unwrap();

    // 60 is still held when the file ends
    assert_eq!(
        take(&log),
        [On(60), On(62), Sleep(250_000), Off(62), Off(60)]
    );
    assert!(matches!(
        report.tracks()[0],
        TrackOutcome::Truncated { events: 1, error } if error.is_out_of_bounds()
    ));
    assert!(!report.is_clean());
    assert!(!engine.outputs().is_active(Note::MIDDLE_C));
}

#[test]
fn held_notes_stay_active_without_release() {
    let (mut engine, log) = engine(PlayerConfig {
        release_on_finish: false,
        ..Default::default()
    });
    let track = TrackBuilder::new().note_on(0, 61, 100).end(0);

    engine.play(&smf_tracks(DIVISION_480, &[track])).unwrap();

    assert_eq!(take(&log), [On(61)]);
    assert!(engine.outputs().is_active(Note::from_databyte_unchecked(61)));
}

#[test]
fn lead_in_waits_before_the_first_event() {
    let (mut engine, log) = engine(PlayerConfig {
        lead_in: UMicros::from_secs(3),
        ..Default::default()
    });
    let track = TrackBuilder::new().note_on(0, 60, 1).note_off(0, 60, 0).end(0);

    engine.play(&smf_tracks(DIVISION_480, &[track])).unwrap();

    assert_eq!(take(&log), [Sleep(3_000_000), On(60), Off(60)]);
}

#[test]
fn bad_header_touches_nothing() {
    let (mut engine, log) = engine(PlayerConfig {
        lead_in: UMicros::from_secs(3),
        ..Default::default()
    });
    let track = TrackBuilder::new().note_on(0, 60, 1).end(0);

    let mut bad_magic = smf_tracks(DIVISION_480, &[track.clone()]);
    bad_magic[3] = b'x';
    let err = engine.play(&bad_magic).unwrap_err();
    assert!(matches!(err, PlaybackError::Format(e) if !e.is_out_of_bounds()));
    assert_eq!(engine.state(), PlaybackState::Aborted);

    let mut bad_length = smf_tracks(DIVISION_480, &[track.clone()]);
    bad_length[7] = 7;
    let err = engine.play(&bad_length).unwrap_err();
    assert_eq!(
        err,
        PlaybackError::Format(ReaderError::parse_error(
            4,
            ParseError::Header(HeaderError::InvalidLength(7))
        ))
    );

    let err = engine.play(b"MThd\0\0\0\x06\0\0").unwrap_err();
    assert!(matches!(err, PlaybackError::Format(e) if e.is_out_of_bounds()));

    let err = engine.play(&smf_tracks(0, &[track])).unwrap_err();
    assert_eq!(
        err,
        PlaybackError::Timing(TimingError::ZeroTicksPerQuarterNote)
    );
    assert_eq!(engine.state(), PlaybackState::Aborted);

    assert!(take(&log).is_empty());
}

#[test]
fn missing_tracks_end_playback() {
    let (mut engine, log) = engine(PlayerConfig::default());
    let track = TrackBuilder::new().note_on(0, 60, 1).note_off(0, 60, 0).end(0);
    let mut bytes = smf_tracks(DIVISION_480, &[track]);
    // declare a second track that is not there
    bytes[11] = 2;

    let report = engine.play_with_report(&bytes).unwrap();

    assert_eq!(take(&log), [On(60), Off(60)]);
    assert_eq!(report.header().track_count(), 2);
    assert!(report.tracks()[0].is_completed());
    assert!(matches!(
        report.tracks()[1],
        TrackOutcome::Missing { count: 1, error } if error.is_out_of_bounds()
    ));
    assert_eq!(engine.state(), PlaybackState::Done);
}

#[test]
fn declared_track_count_does_not_size_the_report() {
    let (mut engine, log) = engine(PlayerConfig::default());
    let bytes = b"MThd\0\0\0\x06\0\x01\xFF\xFF\x01\xE0";

    let report = engine.play_with_report(bytes).unwrap();

    assert_eq!(report.header().track_count(), u16::MAX);
    assert_eq!(report.tracks().len(), 1);
    assert!(matches!(
        report.tracks()[0],
        TrackOutcome::Missing { count: u16::MAX, .. }
    ));

    engine.play(bytes).unwrap();
    assert_eq!(engine.state(), PlaybackState::Done);
    assert!(take(&log).is_empty());
}

#[test]
fn overlong_track_ends_the_file() {
    let (mut engine, log) = engine(PlayerConfig::default());
    let note = |n| TrackBuilder::new().note_on(0, n, 1).note_off(0, n, 0).end(0);
    let mut bytes = smf_tracks(DIVISION_480, &[note(60), note(61), note(62)]);
    // the second chunk claims more bytes than the file holds
    let second_len = 14 + 8 + note(60).len() + 4;
    bytes[second_len..second_len + 4].copy_from_slice(&0x1000u32.to_be_bytes());

    let report = engine.play_with_report(&bytes).unwrap();

    assert_eq!(take(&log), [On(60), Off(60)]);
    assert_eq!(report.tracks().len(), 2);
    assert!(matches!(
        report.tracks()[1],
        TrackOutcome::Missing { count: 2, .. }
    ));
}
