//! The cinema aggregate: halls, showings and the per-date index.

use thiserror::Error;
use tracing::debug;

use crate::collections::ValueHashMap;
use crate::domain::day_schedule::DaySchedule;
use crate::domain::hall::SeatingHall;
use crate::domain::showing::{Showing, ShowingId};
use crate::values::CalendarDate;

/// Errors that can occur when assembling a cinema.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CinemaError {
    /// The showing is scheduled in a hall this cinema does not have.
    #[error("hall {0:?} does not belong to this cinema")]
    UnknownHall(String),

    #[error("showing {0} is already scheduled")]
    DuplicateShowing(ShowingId),
}

/// A cinema with its halls and every scheduled showing.
///
/// The cinema owns its showings.  It keeps an index from date to showing ids
/// so that [`Cinema::day_schedule`] does not scan the whole programme.
#[derive(Debug, Clone, Default)]
pub struct Cinema {
    halls: Vec<SeatingHall>,
    showings: ValueHashMap<ShowingId, Showing>,
    by_date: ValueHashMap<CalendarDate, Vec<ShowingId>>,
}

impl Cinema {
    /// Creates a cinema with the given halls and showings.
    ///
    /// # Errors
    ///
    /// Returns [`CinemaError::UnknownHall`] if a showing uses a hall not in
    /// `halls`, or [`CinemaError::DuplicateShowing`] if two showings share an id.
    pub fn new(
        halls: Vec<SeatingHall>,
        showings: impl IntoIterator<Item = Showing>,
    ) -> Result<Self, CinemaError> {
        let mut cinema = Self {
            halls,
            ..Self::default()
        };
        for showing in showings {
            cinema.add_showing(showing)?;
        }
        Ok(cinema)
    }

    /// Schedules a showing and returns its id.
    ///
    /// # Errors
    ///
    /// See [`Cinema::new`].
    pub fn add_showing(&mut self, showing: Showing) -> Result<ShowingId, CinemaError> {
        if !self.has_hall(showing.hall()) {
            return Err(CinemaError::UnknownHall(showing.hall().name().to_string()));
        }
        let id = showing.id();
        if self.showings.contains(&id) {
            return Err(CinemaError::DuplicateShowing(id));
        }

        let date = showing.date();
        match self.by_date.get_mut(&date) {
            Some(ids) => ids.push(id),
            None => {
                self.by_date.put(date, vec![id]);
            }
        }
        debug!(
            "scheduled {} in {} on {date} at {}",
            showing.film().title(),
            showing.hall().name(),
            showing.start()
        );
        self.showings.put(id, showing);
        Ok(id)
    }

    /// Returns `true` if `hall` (same name and dimensions) belongs to the cinema.
    pub fn has_hall(&self, hall: &SeatingHall) -> bool {
        self.halls.contains(hall)
    }

    pub fn halls(&self) -> &[SeatingHall] {
        &self.halls
    }

    pub fn showing(&self, id: ShowingId) -> Option<&Showing> {
        self.showings.get(&id)
    }

    pub fn showing_mut(&mut self, id: ShowingId) -> Option<&mut Showing> {
        self.showings.get_mut(&id)
    }

    pub fn showing_count(&self) -> usize {
        self.showings.size()
    }

    /// The showings on `date` in start-time order; empty for dates with none.
    pub fn day_schedule(&self, date: CalendarDate) -> DaySchedule<'_> {
        match self.by_date.get(&date) {
            Some(ids) => DaySchedule::sorted(
                date,
                ids.iter().filter_map(|id| self.showings.get(id)).collect(),
            ),
            None => DaySchedule::empty(date),
        }
    }

    /// Every date with at least one showing, earliest first.
    pub fn dates(&self) -> Vec<CalendarDate> {
        let mut dates: Vec<CalendarDate> = self.by_date.keys().copied().collect();
        dates.sort_unstable();
        dates
    }
}
