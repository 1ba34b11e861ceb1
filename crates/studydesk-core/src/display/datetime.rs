//! Date, time and duration display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// A wrapper around `Timestamp` that formats it in the system time zone as
/// `YYYY-MM-DD HH:MM TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M %Z")
        )
    }
}

/// Minutes of effort rendered as hours and minutes, e.g. `1h 30m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effort(pub u64);

impl From<u32> for Effort {
    fn from(minutes: u32) -> Self {
        Self(u64::from(minutes))
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, minutes) = (self.0 / 60, self.0 % 60);
        match (hours, minutes) {
            (0, m) => write!(f, "{m}m"),
            (h, 0) => write!(f, "{h}h"),
            (h, m) => write!(f, "{h}h {m}m"),
        }
    }
}
