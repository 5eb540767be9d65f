use core::time::Duration;

/// Unsigned Microseconds
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UMicros(u64);

impl UMicros {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Creates a new instance of microseconds
    #[inline]
    pub const fn new(microseconds: u64) -> Self {
        Self(microseconds)
    }

    /// Returns the microseconds as a u64
    #[inline]
    pub const fn us(&self) -> u64 {
        self.0
    }

    /// ms -> us
    #[inline]
    pub const fn from_ms(ms: u64) -> Self {
        Self(ms * 1_000)
    }

    /// s -> us
    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs * 1_000_000)
    }

    /// Returns seconds
    #[inline]
    pub const fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000.
    }

    /// True for a zero-length span
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns no time if I am less than other.
    pub const fn saturating_sub(&self, other: Self) -> UMicros {
        if self.0 < other.0 {
            UMicros(0)
        } else {
            UMicros(self.0 - other.0)
        }
    }

    /// Converts self into a [`Duration`]
    #[inline]
    pub const fn to_duration(&self) -> Duration {
        Duration::from_micros(self.0)
    }
}

impl From<Duration> for UMicros {
    fn from(value: Duration) -> Self {
        Self(value.as_micros() as u64)
    }
}

impl core::fmt::Display for UMicros {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.3}s", self.as_secs_f64())
    }
}

#[test]
fn elapsed_time_never_goes_negative() {
    use pretty_assertions::assert_eq;
    let lead_in = UMicros::from_secs(3);
    let spent = UMicros::from(Duration::from_millis(3_500));
    assert_eq!(spent, UMicros::from_ms(3_500));
    assert_eq!(lead_in.saturating_sub(spent), UMicros::ZERO);
    assert_eq!(spent.saturating_sub(lead_in), UMicros::new(500_000));
    assert_eq!(alloc::format!("{}", UMicros::new(1_250_000)), "1.250s");
}
