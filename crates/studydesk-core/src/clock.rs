//! Wall-clock access, injectable for deterministic parsing and tests.

use jiff::{tz::TimeZone, Timestamp, Zoned};

/// Source of "now" in the user's local time zone.
pub trait Clock: Send + Sync {
    fn now(&self) -> Zoned;
}

/// Reads the system clock and renders it in a configured time zone.
#[derive(Debug, Clone)]
pub struct SystemClock {
    time_zone: TimeZone,
}

impl SystemClock {
    /// A clock in the system's time zone.
    pub fn new() -> Self {
        Self::with_time_zone(TimeZone::system())
    }

    pub fn with_time_zone(time_zone: TimeZone) -> Self {
        Self { time_zone }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Zoned {
        Timestamp::now().to_zoned(self.time_zone.clone())
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone)]
pub struct FixedClock(pub Zoned);

impl Clock for FixedClock {
    fn now(&self) -> Zoned {
        self.0.clone()
    }
}
