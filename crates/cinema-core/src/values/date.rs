//! Calendar dates.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Local, NaiveDate};

use super::{parse_digits, ValueError};

/// A validated Gregorian calendar date.
///
/// Dates are ordered chronologically and rendered as `d.m.yyyy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date from its day (1..=31), month (1..=12) and year.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidDate`] if the components do not denote a
    /// real date (e.g. 30 February).
    pub fn new(day: u32, month: u32, year: i32) -> Result<Self, ValueError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(ValueError::InvalidDate { day, month, year })
    }

    /// Returns `true` if the components denote a real date.
    pub fn is_valid(day: u32, month: u32, year: i32) -> bool {
        NaiveDate::from_ymd_opt(year, month, day).is_some()
    }

    /// Today's date in the local time zone.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the date `days` days later, saturating at the last
    /// representable date.
    pub fn plus_days(self, days: u64) -> Self {
        Self(self.0.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX))
    }

    /// Returns the date `days` days earlier, saturating at the first
    /// representable date.
    pub fn minus_days(self, days: u64) -> Self {
        Self(self.0.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN))
    }

    pub fn next_day(self) -> Self {
        self.plus_days(1)
    }

    pub fn previous_day(self) -> Self {
        self.minus_days(1)
    }

    /// Number of days from `start` to this date; negative if `start` is later.
    pub fn days_since(&self, start: CalendarDate) -> i64 {
        self.0.signed_duration_since(start.0).num_days()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.day(), self.month(), self.year())
    }
}

/// Parses `d.m.yyyy` (leading zeros allowed).
impl FromStr for CalendarDate {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValueError::MalformedDate(s.to_string());
        let mut parts = s.trim().split('.');
        let (Some(day), Some(month), Some(year), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        let day = parse_digits(day).ok_or_else(malformed)?;
        let month = parse_digits(month).ok_or_else(malformed)?;
        let year = parse_digits(year).ok_or_else(malformed)?;
        Self::new(day, month, year)
    }
}
