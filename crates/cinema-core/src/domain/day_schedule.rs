//! The programme of a single day.

use std::slice;

use thiserror::Error;

use crate::domain::showing::Showing;
use crate::values::CalendarDate;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// A showing on another date was offered to a day's schedule.
    #[error("showing on {found} does not belong to the schedule for {expected}")]
    DateMismatch {
        expected: CalendarDate,
        found: CalendarDate,
    },
}

/// The showings of one date, ordered by start time.
///
/// Showings starting at the same time are ordered by hall name.  A schedule
/// borrows its showings from whoever owns them, usually a
/// [`Cinema`](crate::domain::cinema::Cinema).
#[derive(Debug, Clone)]
pub struct DaySchedule<'a> {
    date: CalendarDate,
    showings: Vec<&'a Showing>,
}

impl<'a> DaySchedule<'a> {
    /// Builds the schedule for `date` from `showings`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::DateMismatch`] if any showing runs on another date.
    pub fn new<I>(date: CalendarDate, showings: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = &'a Showing>,
    {
        let showings: Vec<&'a Showing> = showings.into_iter().collect();
        if let Some(stray) = showings.iter().find(|s| s.date() != date) {
            return Err(ScheduleError::DateMismatch {
                expected: date,
                found: stray.date(),
            });
        }
        Ok(Self::sorted(date, showings))
    }

    /// A schedule with no showings.
    pub fn empty(date: CalendarDate) -> Self {
        Self {
            date,
            showings: Vec::new(),
        }
    }

    /// Builds a schedule from showings already known to run on `date`.
    pub(crate) fn sorted(date: CalendarDate, mut showings: Vec<&'a Showing>) -> Self {
        showings.sort_by(|a, b| {
            a.start()
                .cmp(&b.start())
                .then_with(|| a.hall().name().cmp(b.hall().name()))
        });
        Self { date, showings }
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn showings(&self) -> &[&'a Showing] {
        &self.showings
    }

    /// The showing at `index` in start-time order.
    pub fn get(&self, index: usize) -> Option<&'a Showing> {
        self.showings.get(index).copied()
    }

    /// The earliest showing of the day.
    pub fn first(&self) -> Option<&'a Showing> {
        self.get(0)
    }

    pub fn len(&self) -> usize {
        self.showings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.showings.is_empty()
    }

    pub fn iter(&self) -> std::iter::Copied<slice::Iter<'_, &'a Showing>> {
        self.showings.iter().copied()
    }
}

impl<'s, 'a> IntoIterator for &'s DaySchedule<'a> {
    type Item = &'a Showing;
    type IntoIter = std::iter::Copied<slice::Iter<'s, &'a Showing>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
