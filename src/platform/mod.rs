#![doc = r#"
The hardware the player drives: a monotonic clock and digital outputs.

On a microcontroller these wrap the board's timer and GPIO pins. With the
`std` feature, [`StdClock`] and [`ConsolePin`] stand in for both.
"#]

#[cfg(feature = "std")]
mod std_impl;
#[cfg(feature = "std")]
pub use std_impl::*;

use crate::UMicros;

/// A monotonic clock that can block the caller
pub trait Clock {
    /// Time elapsed since an arbitrary fixed point. Never decreases.
    fn now(&self) -> UMicros;

    /// Blocks for `duration`. Not interruptible.
    fn sleep(&mut self, duration: UMicros);
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now(&self) -> UMicros {
        (**self).now()
    }
    fn sleep(&mut self, duration: UMicros) {
        (**self).sleep(duration)
    }
}

/// A digital output driving one actuator
pub trait OutputPin {
    /// Energize the actuator
    fn set_active(&mut self);

    /// Release the actuator
    fn set_inactive(&mut self);
}
