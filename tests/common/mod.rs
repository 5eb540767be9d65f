#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use midinoid::prelude::*;

/// Something the player did, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Sleep(u64),
    On(u8),
    Off(u8),
}

pub type Log = Rc<RefCell<Vec<Action>>>;

/// A clock that advances only when slept on
pub struct MockClock {
    now: u64,
    log: Log,
}

impl Clock for MockClock {
    fn now(&self) -> UMicros {
        UMicros::new(self.now)
    }

    fn sleep(&mut self, duration: UMicros) {
        self.now += duration.us();
        self.log.borrow_mut().push(Action::Sleep(duration.us()));
    }
}

pub struct MockPin {
    note: u8,
    log: Log,
}

impl OutputPin for MockPin {
    fn set_active(&mut self) {
        self.log.borrow_mut().push(Action::On(self.note));
    }

    fn set_inactive(&mut self) {
        self.log.borrow_mut().push(Action::Off(self.note));
    }
}

/// The solenoid notes used by every test
pub const NOTES: [u8; 4] = [60, 61, 62, 63];

pub fn engine(config: PlayerConfig) -> (PlaybackEngine<MockClock, MockPin>, Log) {
    let log = Log::default();
    let outputs = NoteOutputMap::new(NOTES.map(|note| {
        (
            note,
            MockPin {
                note,
                log: log.clone(),
            },
        )
    }))
    .unwrap();
    let clock = MockClock {
        now: 0,
        log: log.clone(),
    };
    (PlaybackEngine::new(clock, outputs, config), log)
}

pub fn take(log: &Log) -> Vec<Action> {
    std::mem::take(&mut *log.borrow_mut())
}

pub fn vlq(value: u32) -> Vec<u8> {
    let mut bytes = vec![(value & 0x7F) as u8];
    let mut rest = value >> 7;
    while rest > 0 {
        bytes.insert(0, (rest & 0x7F) as u8 | 0x80);
        rest >>= 7;
    }
    bytes
}

/// Builds the body of an `MTrk` chunk
#[derive(Default, Clone)]
pub struct TrackBuilder(Vec<u8>);

impl TrackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn event(mut self, delta: u32, bytes: &[u8]) -> Self {
        self.0.extend(vlq(delta));
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn note_on(self, delta: u32, note: u8, velocity: u8) -> Self {
        self.event(delta, &[0x90, note, velocity])
    }

    pub fn note_off(self, delta: u32, note: u8, velocity: u8) -> Self {
        self.event(delta, &[0x80, note, velocity])
    }

    pub fn tempo(self, delta: u32, micros_per_quarter: u32) -> Self {
        let [_, a, b, c] = micros_per_quarter.to_be_bytes();
        self.event(delta, &[0xFF, 0x51, 0x03, a, b, c])
    }

    pub fn raw(self, delta: u32, bytes: &[u8]) -> Self {
        self.event(delta, bytes)
    }

    pub fn end(self, delta: u32) -> Vec<u8> {
        self.event(delta, &[0xFF, 0x2F, 0x00]).0
    }

    pub fn build(self) -> Vec<u8> {
        self.0
    }
}

/// A complete file: header then one chunk per entry, declaring as many tracks as chunks
pub fn smf(division: u16, chunks: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut bytes = b"MThd".to_vec();
    bytes.extend(6u32.to_be_bytes());
    bytes.extend(u16::from(chunks.len() > 1).to_be_bytes());
    bytes.extend((chunks.len() as u16).to_be_bytes());
    bytes.extend(division.to_be_bytes());
    for (magic, body) in chunks {
        bytes.extend_from_slice(&magic[..]);
        bytes.extend((body.len() as u32).to_be_bytes());
        bytes.extend_from_slice(body);
    }
    bytes
}

/// A file of well-formed `MTrk` chunks
pub fn smf_tracks(division: u16, tracks: &[Vec<u8>]) -> Vec<u8> {
    let chunks: Vec<_> = tracks.iter().map(|t| (b"MTrk", t.clone())).collect();
    smf(division, &chunks)
}
