//! ShowingPicker: which date and which showing the cashier is looking at.
//!
//! The picker starts on today's date and pre-selects the earliest showing of
//! that day.  Every date change pre-selects the earliest showing of the new
//! day, or nothing if the day has no showings.

use cinema_core::{CalendarDate, Cinema, DaySchedule, ShowingId};
use thiserror::Error;
use tracing::debug;

/// Source of "today".
///
/// Infrastructure implementation reads the system clock; tests use a mock
/// pinned to a fixed date.
#[cfg_attr(test, mockall::automock)]
pub trait Calendar {
    fn today(&self) -> CalendarDate;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PickError {
    /// There is no showing at that position in the day's schedule.
    #[error("no showing number {index} on {date}")]
    NoSuchShowing { index: usize, date: CalendarDate },
}

/// The selected date and showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowingPicker {
    date: CalendarDate,
    selected: Option<ShowingId>,
}

impl ShowingPicker {
    /// Starts on today's date with its first showing selected.
    pub fn new(calendar: &dyn Calendar, cinema: &Cinema) -> Self {
        Self::on_date(calendar.today(), cinema)
    }

    /// Starts on `date` with its first showing selected.
    pub fn on_date(date: CalendarDate, cinema: &Cinema) -> Self {
        let mut picker = Self {
            date,
            selected: None,
        };
        picker.go_to(date, cinema);
        picker
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn selected(&self) -> Option<ShowingId> {
        self.selected
    }

    /// The schedule of the selected date.
    pub fn schedule<'a>(&self, cinema: &'a Cinema) -> DaySchedule<'a> {
        cinema.day_schedule(self.date)
    }

    /// Moves to `date` and selects its first showing.
    pub fn go_to(&mut self, date: CalendarDate, cinema: &Cinema) {
        let schedule = cinema.day_schedule(date);
        self.date = date;
        self.selected = schedule.first().map(|showing| showing.id());
        debug!("picked date {date}, {} showing(s)", schedule.len());
    }

    pub fn next_day(&mut self, cinema: &Cinema) {
        self.go_to(self.date.next_day(), cinema);
    }

    pub fn previous_day(&mut self, cinema: &Cinema) {
        self.go_to(self.date.previous_day(), cinema);
    }

    /// Returns to today's date.
    pub fn today(&mut self, calendar: &dyn Calendar, cinema: &Cinema) {
        self.go_to(calendar.today(), cinema);
    }

    /// Selects the showing at `index` (zero-based, start-time order) of the
    /// selected date.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::NoSuchShowing`] if the day has fewer showings.
    pub fn pick(&mut self, index: usize, cinema: &Cinema) -> Result<ShowingId, PickError> {
        let id = self
            .schedule(cinema)
            .get(index)
            .map(|showing| showing.id())
            .ok_or(PickError::NoSuchShowing {
                index,
                date: self.date,
            })?;
        self.selected = Some(id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinema_core::{AgeRating, ClockTime, Film, MoneyAmount, SeatingHall, Showing};

    fn day(n: u32) -> CalendarDate {
        CalendarDate::new(n, 5, 2011).unwrap()
    }

    fn calendar_on(date: CalendarDate) -> MockCalendar {
        let mut calendar = MockCalendar::new();
        calendar.expect_today().return_const(date);
        calendar
    }

    /// Two showings on the 20th (17:30 and 20:00), none on the 21st, one on the 22nd.
    fn make_cinema() -> Cinema {
        let hall = SeatingHall::new("Saal 1", 4, 4).unwrap();
        let film = Film::new("Rio", 96, AgeRating::Fsk0, false).unwrap();
        let showing = |date: CalendarDate, hour: u8, minute: u8| {
            Showing::new(
                hall.clone(),
                film.clone(),
                date,
                ClockTime::new(hour, minute).unwrap(),
                ClockTime::new(23, 0).unwrap(),
                MoneyAmount::from_cents(500),
            )
            .unwrap()
        };
        let showings = vec![
            showing(day(20), 20, 0),
            showing(day(20), 17, 30),
            showing(day(22), 17, 30),
        ];
        Cinema::new(vec![hall.clone()], showings).unwrap()
    }

    #[test]
    fn test_new_starts_today_with_first_showing_selected() {
        // Arrange
        let cinema = make_cinema();
        let calendar = calendar_on(day(20));

        // Act
        let picker = ShowingPicker::new(&calendar, &cinema);

        // Assert
        assert_eq!(picker.date(), day(20));
        let first = cinema.day_schedule(day(20)).first().unwrap().id();
        assert_eq!(picker.selected(), Some(first));
        assert_eq!(cinema.showing(first).unwrap().start().to_string(), "17:30");
    }

    #[test]
    fn test_day_without_showings_selects_nothing() {
        let cinema = make_cinema();
        let mut picker = ShowingPicker::on_date(day(20), &cinema);

        picker.next_day(&cinema);

        assert_eq!(picker.date(), day(21));
        assert_eq!(picker.selected(), None);
    }

    #[test]
    fn test_previous_and_next_day_reselect_first_showing() {
        let cinema = make_cinema();
        let mut picker = ShowingPicker::on_date(day(21), &cinema);

        picker.next_day(&cinema);
        let on_22nd = picker.selected();
        picker.previous_day(&cinema);
        picker.previous_day(&cinema);

        assert!(on_22nd.is_some());
        assert_eq!(picker.date(), day(20));
        assert_eq!(picker.selected(), cinema.day_schedule(day(20)).first().map(|s| s.id()));
    }

    #[test]
    fn test_today_returns_to_calendar_date() {
        let cinema = make_cinema();
        let calendar = calendar_on(day(22));
        let mut picker = ShowingPicker::on_date(day(1), &cinema);

        picker.today(&calendar, &cinema);

        assert_eq!(picker.date(), day(22));
        assert!(picker.selected().is_some());
    }

    #[test]
    fn test_pick_selects_by_start_time_order() {
        let cinema = make_cinema();
        let mut picker = ShowingPicker::on_date(day(20), &cinema);

        let id = picker.pick(1, &cinema).unwrap();

        assert_eq!(picker.selected(), Some(id));
        assert_eq!(cinema.showing(id).unwrap().start().to_string(), "20:00");
    }

    #[test]
    fn test_pick_out_of_range_keeps_selection() {
        let cinema = make_cinema();
        let mut picker = ShowingPicker::on_date(day(20), &cinema);
        let before = picker.selected();

        let result = picker.pick(2, &cinema);

        assert_eq!(
            result,
            Err(PickError::NoSuchShowing {
                index: 2,
                date: day(20)
            })
        );
        assert_eq!(picker.selected(), before);
    }
}
