//! [`Calendar`] implementations.

use cinema_core::CalendarDate;

use crate::application::showing_picker::Calendar;

/// Reads today's date from the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCalendar;

impl Calendar for SystemCalendar {
    fn today(&self) -> CalendarDate {
        CalendarDate::today()
    }
}

/// A calendar pinned to one date, for replaying a programme and for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCalendar(pub CalendarDate);

impl Calendar for FixedCalendar {
    fn today(&self) -> CalendarDate {
        self.0
    }
}
