//! Time-of-day values as minutes since midnight.
//!
//! The whole scheduling domain works in whole minutes within a single day,
//! so a `u16` in `0..1440` is the canonical representation. The `"HH:MM"`
//! textual form is used on the wire and in the catalog config file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Number of minutes in a day; `TimeOfDay` values are strictly below this.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A time of day in minutes since midnight. Invariant: `0..1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(pub(crate) u16);

impl TimeOfDay {
    /// Construct from minutes since midnight, rejecting out-of-day values.
    pub fn new(minutes: u16) -> Result<Self, CoreError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(CoreError::Validation(format!(
                "Time of day out of range: {minutes} minutes (max {})",
                MINUTES_PER_DAY - 1
            )));
        }
        Ok(Self(minutes))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Minute within the hour (`0..60`), used by the slot alignment filter.
    pub fn minute_of_hour(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = CoreError;

    /// Parse `"HH:MM"` (zero-padded or not) into a time of day.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(format!("Invalid time of day: '{s}' (expected HH:MM)"));

        let (hours, minutes) = s.split_once(':').ok_or_else(invalid)?;
        let hours: u16 = hours.parse().map_err(|_| invalid())?;
        let minutes: u16 = minutes.parse().map_err(|_| invalid())?;

        if hours >= 24 || minutes >= 60 {
            return Err(invalid());
        }
        Ok(Self(hours * 60 + minutes))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Half-open interval overlap: `[a_start, a_end)` vs `[b_start, b_end)`.
///
/// Intervals that only touch at an endpoint do NOT overlap. Signed minutes
/// so that buffer-inflated intervals may start before midnight without
/// wrapping.
pub fn ranges_overlap(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> bool {
    a_start.max(b_start) < a_end.min(b_end)
}
