use crate::{
    UMicros,
    file::{Tempo, Timing},
};

#[doc = r#"
Converts delta times into wall-clock delays.

Holds the file's [`Timing`] and the current tempo. A new `TempoClock` is
built for every file, starting from the configured default tempo.

- Metrical timing: `delay = ticks * tempo / ticks_per_quarter_note`
- SMPTE timing: `delay = ticks / (frames_per_second * ticks_per_frame)`.
  The tempo is still tracked but does not affect the delay.

Tempo changes only affect delays computed afterwards.

# Example
```rust
# use midinoid::prelude::*;
let mut clock = TempoClock::new(Timing::new_ticks_per_quarter_note(480), Tempo::default());
assert_eq!(clock.delay_for(480), UMicros::new(500_000));

clock.set_tempo(Tempo::new(250_000));
assert_eq!(clock.delay_for(480), UMicros::new(250_000));
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoClock {
    timing: Timing,
    tempo: Tempo,
}

impl TempoClock {
    /// Create a clock for a file's timing, starting at `tempo`
    pub const fn new(timing: Timing, tempo: Tempo) -> Self {
        Self { timing, tempo }
    }

    /// The file's timing
    pub const fn timing(&self) -> Timing {
        self.timing
    }

    /// The current tempo
    pub const fn tempo(&self) -> Tempo {
        self.tempo
    }

    /// Replaces the tempo for every delay computed from now on
    pub fn set_tempo(&mut self, tempo: Tempo) {
        self.tempo = tempo;
    }

    /// The real time `delta_ticks` lasts at the current tempo
    pub const fn delay_for(&self, delta_ticks: u32) -> UMicros {
        let ticks = delta_ticks as u64;
        match self.timing {
            Timing::TicksPerQuarterNote(tpqn) => {
                // µs = ticks * µs_per_quarter_note / ticks_per_quarter_note
                let micros_per_quarter = self.tempo.micros_per_quarter_note() as u64;
                let tpqn = tpqn.ticks_per_quarter_note() as u64;
                // a zero tpqn can only come from `Timing::new_ticks_per_quarter_note(0)`
                match (ticks * micros_per_quarter).checked_div(tpqn) {
                    Some(micros) => UMicros::new(micros),
                    None => UMicros::ZERO,
                }
            }
            Timing::Smpte(smpte) => {
                // µs = ticks * 1_000_000 / (fps * ticks_per_frame)
                UMicros::new(ticks * 1_000_000 / smpte.ticks_per_second() as u64)
            }
        }
    }
}

#[test]
fn metrical_delay() {
    use pretty_assertions::assert_eq;
    let clock = TempoClock::new(Timing::from_division(480).unwrap(), Tempo::new(500_000));
    assert_eq!(clock.delay_for(480), UMicros::new(500_000));
    assert_eq!(clock.delay_for(240), UMicros::new(250_000));
    assert_eq!(clock.delay_for(0), UMicros::ZERO);
    // largest delta and tempo must not overflow
    let slow = TempoClock::new(Timing::from_division(1).unwrap(), Tempo::new(0x00FF_FFFF));
    assert_eq!(
        slow.delay_for(u32::MAX),
        UMicros::new(u32::MAX as u64 * 0x00FF_FFFF)
    );
}

#[test]
fn smpte_delay_ignores_tempo() {
    use pretty_assertions::assert_eq;
    // 25 fps, 40 ticks per frame
    let mut clock = TempoClock::new(Timing::from_division(0xE728).unwrap(), Tempo::default());
    assert_eq!(clock.delay_for(1000), UMicros::from_secs(1));

    clock.set_tempo(Tempo::new(1_000_000));
    assert_eq!(clock.tempo(), Tempo::new(1_000_000));
    assert_eq!(clock.delay_for(1000), UMicros::from_secs(1));
}
