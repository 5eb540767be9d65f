use alloc::string::String;
use bevy_platform::time::Instant;

use super::{Clock, OutputPin};
use crate::UMicros;

/// [`Clock`] backed by the operating system's monotonic clock
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    /// A clock whose zero is now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn now(&self) -> UMicros {
        self.origin.elapsed().into()
    }

    fn sleep(&mut self, duration: UMicros) {
        std::thread::sleep(duration.to_duration());
    }
}

/// An [`OutputPin`] that logs its state changes instead of switching hardware
#[derive(Debug, Clone)]
pub struct ConsolePin {
    name: String,
    active: bool,
}

impl ConsolePin {
    /// Create an inactive pin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: false,
        }
    }

    /// The pin's label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True while energized
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl OutputPin for ConsolePin {
    fn set_active(&mut self) {
        self.active = true;
        tracing::info!(pin = %self.name, "active");
    }

    fn set_inactive(&mut self) {
        self.active = false;
        tracing::info!(pin = %self.name, "inactive");
    }
}

#[test]
fn std_clock_is_monotonic() {
    let mut clock = StdClock::new();
    let before = clock.now();
    clock.sleep(UMicros::from_ms(2));
    assert!(clock.now().saturating_sub(before) >= UMicros::from_ms(2));
}
