//! Wall-clock times of day.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{parse_digits, ValueError};

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day with minute precision, `0:00` to `23:59`.
///
/// Ordering compares the hour first, then the minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Midnight, `0:00`.
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };

    /// # Errors
    ///
    /// Returns [`ValueError::InvalidTime`] unless `hour < 24` and `minute < 60`.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValueError> {
        if hour < 24 && minute < 60 {
            Ok(Self { hour, minute })
        } else {
            Err(ValueError::InvalidTime { hour, minute })
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    fn minute_of_day(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }

    /// Minutes elapsed from `start` to this time.
    ///
    /// If this time is earlier than `start` the interval is taken to run past
    /// midnight, so `1:00` is 150 minutes after `22:30`.  Equal times are 0
    /// minutes apart.
    pub fn minutes_since(&self, start: ClockTime) -> u32 {
        let (end, start) = (self.minute_of_day(), start.minute_of_day());
        if end >= start {
            end - start
        } else {
            MINUTES_PER_DAY - (start - end)
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

/// Parses `H:MM` or `HH:MM`.
impl FromStr for ClockTime {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValueError::MalformedTime(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(malformed)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(malformed());
        }
        let hour = parse_digits(hour).ok_or_else(malformed)?;
        let minute = parse_digits(minute).ok_or_else(malformed)?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}
